//! Authentication middleware for Axum.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use super::credentials::{PermissionSet, Role};
use super::jwt::{verify_token, Claims, JwtConfig};
use crate::shared::ApiError;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user extracted from a verified session token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
    pub display_name: String,
    pub department: String,
    pub permissions: PermissionSet,
    /// When the session token was issued.
    pub issued_at: DateTime<Utc>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
            display_name: claims.display_name,
            department: claims.department,
            permissions: claims.permissions,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_else(Utc::now),
        }
    }
}

impl AuthenticatedUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.allows(permission)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Requires a valid bearer token; inserts [`AuthenticatedUser`] into the
/// request extensions on success.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return ApiError::MissingToken.into_response();
    };

    let Some(token) = extract_bearer(&auth_header) else {
        return ApiError::TokenInvalid.into_response();
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser::from(claims));
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Permission required by a protected route. Used as middleware state.
#[derive(Clone)]
pub struct RequiredPermission(pub &'static str);

/// Permission gate; must be layered after [`auth_middleware`].
///
/// Passes iff the authenticated user's permission set contains the wildcard
/// or the exact required string.
pub async fn permission_middleware(
    State(RequiredPermission(required)): State<RequiredPermission>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.has_permission(required) => next.run(request).await,
        Some(_) => ApiError::Forbidden.into_response(),
        None => ApiError::MissingToken.into_response(),
    }
}
