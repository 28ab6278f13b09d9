//! Health check and service identification endpoints.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Service health.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the service is up.
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Service identification returned at the root path.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Health check. No auth; use for availability monitoring.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Service identification and endpoint listing.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service identification", body = ServiceInfo)
    )
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Beifi Smart City Dashboard API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "POST /api/auth/demo-login - Demo login".to_string(),
            "GET /api/auth/me - Current user profile".to_string(),
            "GET /api/demo/dashboard - Demo dashboard (no history)".to_string(),
            "GET /api/working/dashboard - Complete dashboard data".to_string(),
            "GET /api/dashboard - Complete dashboard data (authenticated)".to_string(),
            "GET /health - Health check".to_string(),
        ],
    })
}
