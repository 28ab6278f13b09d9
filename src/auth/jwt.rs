//! Session token handling.
//!
//! Tokens are self-contained HS256 JWTs carrying the full authorization
//! scope (role + permissions). There is no server-side session store and no
//! revocation list: a token stays valid until its expiry window elapses.
//! Known limitation of the demo design, not an oversight.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::credentials::{CredentialRecord, PermissionSet, Role};
use crate::config::AppConfig;
use crate::shared::ApiError;

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration time in hours.
    pub expiration_hours: i64,
    /// Issuer claim.
    pub issuer: String,
}

impl JwtConfig {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            secret: config.jwt_secret().to_string(),
            expiration_hours: config.security.jwt_expiration_hours,
            issuer: "beifi-dashboard".to_string(),
        }
    }
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Dashboard role.
    pub role: Role,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub department: String,
    /// Capability strings; `*` grants all.
    pub permissions: PermissionSet,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// Claims for a freshly authenticated user.
    pub fn new(record: &CredentialRecord, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: record.username.clone(),
            role: record.role,
            display_name: record.display_name.clone(),
            department: record.department.clone(),
            permissions: record.permissions.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issue a signed session token for an authenticated user.
pub fn create_token(record: &CredentialRecord, config: &JwtConfig) -> Result<String, ApiError> {
    let claims = Claims::new(record, config);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token encoding failed: {}", e)))
}

/// Verify signature and expiry of a token and return its claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, ApiError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(ApiError::TokenExpired),
            _ => Err(ApiError::TokenInvalid),
        },
    }
}

/// Validate a token and check it grants the required permission.
///
/// Fails with `TokenExpired` / `TokenInvalid` on a bad token and `Forbidden`
/// when the permission set covers neither the wildcard nor the exact string.
pub fn authorize(token: &str, required: &str, config: &JwtConfig) -> Result<Claims, ApiError> {
    let claims = verify_token(token, config)?;
    if claims.permissions.allows(required) {
        Ok(claims)
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::CredentialTable;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 8,
            issuer: "beifi-dashboard".to_string(),
        }
    }

    fn admin_record() -> CredentialRecord {
        CredentialTable::demo().find("admin").unwrap().clone()
    }

    #[test]
    fn fresh_token_round_trips() {
        let config = test_config();
        let record = admin_record();
        let token = create_token(&record, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, Role::CityManager);
        assert_eq!(claims.permissions, record.permissions);
        assert!(!claims.is_expired());
        // 8-hour window
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn garbage_token_is_invalid() {
        let config = test_config();
        let err = verify_token("not-a-token", &config).unwrap_err();
        assert!(matches!(err, ApiError::TokenInvalid));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let config = test_config();
        let token = create_token(&admin_record(), &config).unwrap();

        let other = JwtConfig {
            secret: "different-secret".to_string(),
            ..test_config()
        };
        let err = verify_token(&token, &other).unwrap_err();
        assert!(matches!(err, ApiError::TokenInvalid));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let record = admin_record();

        // Hand-roll claims whose window elapsed well past the decoder leeway.
        let mut claims = Claims::new(&record, &config);
        claims.iat -= 10 * 3600;
        claims.exp -= 10 * 3600;
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert!(matches!(err, ApiError::TokenExpired));
    }

    #[test]
    fn authorize_checks_permission_set() {
        let config = test_config();
        let token = create_token(&admin_record(), &config).unwrap();

        assert!(authorize(&token, "dashboard:read", &config).is_ok());
        assert!(authorize(&token, "reports:export", &config).is_ok());
        let err = authorize(&token, "users:write", &config).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn wildcard_grants_any_permission() {
        let config = test_config();
        let director = CredentialTable::demo().find("director").unwrap().clone();
        let token = create_token(&director, &config).unwrap();

        assert!(authorize(&token, "dashboard:read", &config).is_ok());
        assert!(authorize(&token, "anything:else", &config).is_ok());
    }
}
