//! Authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{AuthenticatedUser, CredentialRecord, Role};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "admin",
    "password": "admin123"
}))]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful login: session token plus the public profile view.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token. Pass as `Authorization: Bearer <token>`.
    pub token: String,
    pub user: UserProfile,
}

/// Public view of a credential record. Never carries the password.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
    pub display_name: String,
    pub department: String,
    pub login_time: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_record(record: &CredentialRecord, login_time: DateTime<Utc>) -> Self {
        Self {
            username: record.username.clone(),
            role: record.role,
            display_name: record.display_name.clone(),
            department: record.department.clone(),
            login_time,
        }
    }

    pub fn from_authenticated(user: &AuthenticatedUser, login_time: DateTime<Utc>) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            display_name: user.display_name.clone(),
            department: user.department.clone(),
            login_time,
        }
    }
}
