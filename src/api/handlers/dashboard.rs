//! Dashboard API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dashboard::dto::{DashboardResponse, DemoDashboardResponse};
use crate::dashboard::MetricsProvider;

/// State for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub provider: Arc<MetricsProvider>,
}

/// Full dashboard payload with 30-day history per metric.
///
/// Open in this demo build; the gated variant lives at `/api/dashboard`.
#[utoipa::path(
    get,
    path = "/api/working/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Full dashboard data", body = DashboardResponse)
    )
)]
pub async fn working_dashboard(State(state): State<DashboardState>) -> Json<DashboardResponse> {
    Json(state.provider.dashboard())
}

/// Demo dashboard payload for the unauthenticated public display.
#[utoipa::path(
    get,
    path = "/api/demo/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Demo dashboard data (no history)", body = DemoDashboardResponse)
    )
)]
pub async fn demo_dashboard(State(state): State<DashboardState>) -> Json<DemoDashboardResponse> {
    Json(state.provider.demo_dashboard())
}

/// Full dashboard behind authentication; requires `dashboard:read`.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Full dashboard data", body = DashboardResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Token lacks the dashboard:read permission")
    )
)]
pub async fn protected_dashboard(State(state): State<DashboardState>) -> Json<DashboardResponse> {
    Json(state.provider.dashboard())
}
