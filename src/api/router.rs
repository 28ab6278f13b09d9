//! API Router with Swagger UI.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto;
use crate::api::handlers::auth::{self, AuthHandlerState};
use crate::api::handlers::dashboard::{self, DashboardState};
use crate::api::handlers::health;
use crate::auth::middleware::{
    auth_middleware, permission_middleware, AuthState, RequiredPermission,
};
use crate::auth::{CredentialTable, JwtConfig};
use crate::config::AppConfig;
use crate::dashboard::MetricsProvider;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from /api/auth/demo-login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        health::service_info,
        // Auth
        auth::demo_login,
        auth::me,
        // Dashboard
        dashboard::working_dashboard,
        dashboard::demo_dashboard,
        dashboard::protected_dashboard,
    ),
    components(
        schemas(
            dto::LoginRequest,
            dto::LoginResponse,
            dto::UserProfile,
            crate::auth::Role,
            crate::dashboard::dto::DashboardResponse,
            crate::dashboard::dto::DemoDashboardResponse,
            crate::dashboard::dto::MetricEntry,
            crate::dashboard::dto::HistoryPoint,
            crate::dashboard::dto::AllocationSlice,
            crate::dashboard::dto::InnovationRow,
            crate::dashboard::dto::ProjectInfo,
            health::HealthResponse,
            health::ServiceInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service availability and identification."),
        (name = "Authentication", description = "Demo login flow. The returned token carries role and permission claims and expires after the configured window (8 hours by default). Pass it as `Authorization: Bearer <token>`."),
        (name = "Dashboard", description = "Mock smart-city metrics: current values, trend deltas and synthesized 30-day history, plus static reference datasets."),
    ),
    info(
        title = "Beifi Smart City Dashboard API",
        version = "0.1.0",
        description = "Minimal HTTP backend for the smart-city dashboard demo. \
Serves mock metrics and a demo credential-lookup login flow. \
Error responses use `{\"error\": <code>, \"message\": <text>}`."
    )
)]
pub struct ApiDoc;

/// Build the CORS layer from configuration. `*` allows any origin.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Create the API router with all routes.
pub fn create_api_router(
    credentials: Arc<CredentialTable>,
    provider: Arc<MetricsProvider>,
    jwt_config: JwtConfig,
    config: &AppConfig,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
    };
    let auth_handler_state = AuthHandlerState {
        credentials,
        jwt_config,
    };
    let dashboard_state = DashboardState { provider };

    // Auth routes (public)
    let login_routes = Router::new()
        .route("/api/auth/demo-login", post(auth::demo_login))
        .with_state(auth_handler_state);

    // Auth routes (protected)
    let me_routes = Router::new().route("/api/auth/me", get(auth::me)).layer(
        middleware::from_fn_with_state(auth_state.clone(), auth_middleware),
    );

    // Dashboard routes open in the demo build
    let dashboard_public = Router::new()
        .route("/api/demo/dashboard", get(dashboard::demo_dashboard))
        .route("/api/working/dashboard", get(dashboard::working_dashboard))
        .with_state(dashboard_state.clone());

    // Gated dashboard variant: bearer token + dashboard:read
    let dashboard_protected = Router::new()
        .route("/api/dashboard", get(dashboard::protected_dashboard))
        .layer(middleware::from_fn_with_state(
            RequiredPermission("dashboard:read"),
            permission_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(dashboard_state);

    let service_routes = Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(login_routes)
        .merge(me_routes)
        .merge(dashboard_public)
        .merge(dashboard_protected)
        .merge(service_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::Service;

    fn test_router() -> Router {
        let config = AppConfig::default();
        let jwt_config = JwtConfig::from_config(&config);
        create_api_router(
            Arc::new(CredentialTable::demo()),
            Arc::new(MetricsProvider::new(config.project.clone())),
            jwt_config,
            &config,
        )
    }

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
        let mut svc = router.into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        let body = serde_json::json!({"username": username, "password": password});
        Request::builder()
            .method("POST")
            .uri("/api/auth/demo-login")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(username: &str, password: &str) -> (StatusCode, Value) {
        send(test_router(), login_request(username, password)).await
    }

    #[tokio::test]
    async fn admin_login_returns_token_and_profile() {
        let (status, body) = login("admin", "admin123").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().unwrap().contains('.'));
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["user"]["role"], "CITY_MANAGER");
        assert_eq!(body["user"]["displayName"], "City Administrator");
        assert!(body["user"]["loginTime"].is_string());
        // The profile must not leak the password or the permission internals.
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_401_invalid_credentials() {
        let (status, body) = login("admin", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "InvalidCredentials");
    }

    #[tokio::test]
    async fn unknown_user_gets_the_same_response_as_wrong_password() {
        let (status_a, body_a) = login("admin", "wrong").await;
        let (status_b, body_b) = login("nobody", "whatever").await;
        assert_eq!(status_a, status_b);
        assert_eq!(body_a, body_b);
    }

    #[tokio::test]
    async fn empty_credentials_are_400() {
        let (status, body) = login("", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ValidationError");
    }

    #[tokio::test]
    async fn demo_dashboard_serves_static_baselines() {
        let (status, body) = send(test_router(), get_request("/api/demo/dashboard", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userSatisfaction"]["current"], 85.0);
        assert!(body["userSatisfaction"].get("history").is_none());
        assert_eq!(body["project"]["project"], "Beifi Smart City Dashboard");
    }

    #[tokio::test]
    async fn working_dashboard_has_history_and_reference_data() {
        let (status, body) = send(
            test_router(),
            get_request("/api/working/dashboard", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let history = body["userSatisfaction"]["history"].as_array().unwrap();
        assert_eq!(history.len(), 30);
        let allocation = body["investmentAllocation"].as_array().unwrap();
        let total: f64 = allocation.iter().map(|s| s["value"].as_f64().unwrap()).sum();
        assert_eq!(total, 100.0);
        assert_eq!(body["innovationMetrics"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn gated_dashboard_requires_a_token() {
        let (status, body) = send(test_router(), get_request("/api/dashboard", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "MissingToken");
    }

    #[tokio::test]
    async fn gated_dashboard_accepts_a_scoped_token() {
        let (_, login_body) = login("operator", "operator123").await;
        let token = login_body["token"].as_str().unwrap().to_string();

        let (status, body) =
            send(test_router(), get_request("/api/dashboard", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["trafficFlow"]["history"].is_array());
    }

    #[tokio::test]
    async fn gated_dashboard_rejects_an_unscoped_token() {
        // The viewer account only holds demo:read.
        let (_, login_body) = login("viewer", "viewer123").await;
        let token = login_body["token"].as_str().unwrap().to_string();

        let (status, body) =
            send(test_router(), get_request("/api/dashboard", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
    }

    #[tokio::test]
    async fn me_reflects_token_claims() {
        let (_, login_body) = login("director", "director2024").await;
        let token = login_body["token"].as_str().unwrap().to_string();

        let (status, body) = send(test_router(), get_request("/api/auth/me", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "director");
        assert_eq!(body["role"], "DIRECTOR");
    }

    #[tokio::test]
    async fn garbage_token_is_401_token_invalid() {
        let (status, body) = send(
            test_router(),
            get_request("/api/auth/me", Some("garbage-token")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "TokenInvalid");
    }

    #[tokio::test]
    async fn health_is_open() {
        let (status, body) = send(test_router(), get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (status, body) = send(test_router(), get_request("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Beifi Smart City Dashboard API");
        assert!(!body["endpoints"].as_array().unwrap().is_empty());
    }
}
