//! Authentication API handlers.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use tracing::info;

use crate::api::dto::{LoginRequest, LoginResponse, UserProfile};
use crate::api::validated_json::ValidatedJson;
use crate::auth::{create_token, AuthenticatedUser, CredentialTable, JwtConfig};
use crate::shared::ApiError;

/// State for authentication handlers.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub credentials: Arc<CredentialTable>,
    pub jwt_config: JwtConfig,
}

/// Demo login: validate credentials and issue a session token.
///
/// Unknown username and wrong password return the same 401 response.
/// The password is compared against the static demo table and never logged.
#[utoipa::path(
    post,
    path = "/api/auth/demo-login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn demo_login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let record = state
        .credentials
        .verify(&request.username, &request.password)?;

    let token = create_token(record, &state.jwt_config)?;
    info!(
        username = %record.username,
        role = record.role.as_str(),
        "demo login successful"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserProfile::from_record(record, Utc::now()),
    }))
}

/// Profile of the authenticated user, reconstructed from token claims.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn me(
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<UserProfile>, ApiError> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::MissingToken);
    };
    let issued_at = user.issued_at;
    Ok(Json(UserProfile::from_authenticated(&user, issued_at)))
}
