//! Static demo credential table.
//!
//! Demo-grade by design: passwords are plaintext and compared by exact
//! equality. A production deployment must replace this with salted-hash
//! verification before going anywhere near real users. Passwords are never
//! logged.

use serde::{Deserialize, Serialize};

use crate::shared::ApiError;

/// Closed set of dashboard roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Director,
    CityManager,
    Operator,
    PublicViewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "DIRECTOR",
            Self::CityManager => "CITY_MANAGER",
            Self::Operator => "OPERATOR",
            Self::PublicViewer => "PUBLIC_VIEWER",
        }
    }
}

/// Set of capability strings gating actions. The wildcard `*` grants all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(Vec<String>);

impl PermissionSet {
    pub const WILDCARD: &'static str = "*";

    pub fn of(permissions: &[&str]) -> Self {
        Self(permissions.iter().map(|p| p.to_string()).collect())
    }

    /// Grants every capability.
    pub fn all() -> Self {
        Self(vec![Self::WILDCARD.to_string()])
    }

    /// True iff the set contains the wildcard or the exact permission string.
    pub fn allows(&self, permission: &str) -> bool {
        self.0
            .iter()
            .any(|p| p == Self::WILDCARD || p == permission)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// One known user: identity, role and permission scope.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub display_name: String,
    pub department: String,
    pub permissions: PermissionSet,
}

/// Immutable credential table, built once at startup.
#[derive(Debug)]
pub struct CredentialTable {
    records: Vec<CredentialRecord>,
}

impl CredentialTable {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// The fixed demo accounts.
    pub fn demo() -> Self {
        let record = |username: &str,
                      password: &str,
                      role: Role,
                      display_name: &str,
                      department: &str,
                      permissions: PermissionSet| CredentialRecord {
            username: username.to_string(),
            password: password.to_string(),
            role,
            display_name: display_name.to_string(),
            department: department.to_string(),
            permissions,
        };

        Self::new(vec![
            record(
                "director",
                "director2024",
                Role::Director,
                "Executive Director",
                "Office of the Director",
                PermissionSet::all(),
            ),
            record(
                "admin",
                "admin123",
                Role::CityManager,
                "City Administrator",
                "Municipal Operations",
                PermissionSet::of(&["dashboard:read", "reports:read", "reports:export"]),
            ),
            record(
                "operator",
                "operator123",
                Role::Operator,
                "Operations Analyst",
                "City Operations",
                PermissionSet::of(&["dashboard:read"]),
            ),
            record(
                "viewer",
                "viewer123",
                Role::PublicViewer,
                "Public Display",
                "Public Affairs",
                PermissionSet::of(&["demo:read"]),
            ),
        ])
    }

    pub fn find(&self, username: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    /// Validate a username/password pair.
    ///
    /// Unknown username and wrong password both return
    /// [`ApiError::InvalidCredentials`] so the response cannot reveal which
    /// check failed.
    pub fn verify(&self, username: &str, password: &str) -> Result<&CredentialRecord, ApiError> {
        match self.find(username) {
            Some(record) if record.password == password => Ok(record),
            _ => Err(ApiError::InvalidCredentials),
        }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }
}
