//! Dashboard payload shapes.
//!
//! Field names are camelCase on the wire to match the dashboard frontend
//! contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::baselines::MetricName;

/// One day of synthesized metric history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryPoint {
    /// ISO date (YYYY-MM-DD).
    pub date: NaiveDate,
    pub value: f64,
}

/// A named dashboard indicator: current snapshot, trend delta and, in the
/// full variant, a 30-day history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricEntry {
    /// Current snapshot value.
    pub current: f64,
    /// Signed delta versus the prior baseline.
    pub trend: f64,
    /// Trailing daily series, chronologically ascending. Absent in the demo
    /// variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryPoint>>,
}

/// One slice of the investment allocation breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AllocationSlice {
    pub category: &'static str,
    /// Percentage; slices sum to 100.
    pub value: f64,
    /// Chart color hint.
    pub color: &'static str,
}

/// One month of the innovation breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InnovationRow {
    pub month: &'static str,
    pub new_features: u32,
    pub improvements: u32,
    pub research: u32,
}

/// Full dashboard payload: all seven metrics with history, plus the static
/// reference datasets.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_satisfaction: MetricEntry,
    pub adoption_rate: MetricEntry,
    pub tech_utilization: MetricEntry,
    pub market_competitiveness: MetricEntry,
    pub air_quality: MetricEntry,
    pub energy_consumption: MetricEntry,
    pub traffic_flow: MetricEntry,
    pub investment_allocation: Vec<AllocationSlice>,
    pub innovation_metrics: Vec<InnovationRow>,
    pub last_updated: DateTime<Utc>,
}

impl DashboardResponse {
    pub fn metric(&self, name: MetricName) -> &MetricEntry {
        match name {
            MetricName::UserSatisfaction => &self.user_satisfaction,
            MetricName::AdoptionRate => &self.adoption_rate,
            MetricName::TechUtilization => &self.tech_utilization,
            MetricName::MarketCompetitiveness => &self.market_competitiveness,
            MetricName::AirQuality => &self.air_quality,
            MetricName::EnergyConsumption => &self.energy_consumption,
            MetricName::TrafficFlow => &self.traffic_flow,
        }
    }
}

/// Project identification shown on the public display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectInfo {
    pub institution: String,
    pub center: String,
    pub director: String,
    pub project: String,
}

/// Demo dashboard payload: current/trend only, no history, plus project
/// metadata. Served to the unauthenticated public display.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemoDashboardResponse {
    pub project: ProjectInfo,
    pub user_satisfaction: MetricEntry,
    pub adoption_rate: MetricEntry,
    pub tech_utilization: MetricEntry,
    pub market_competitiveness: MetricEntry,
    pub air_quality: MetricEntry,
    pub energy_consumption: MetricEntry,
    pub traffic_flow: MetricEntry,
    pub last_updated: DateTime<Utc>,
}

impl DemoDashboardResponse {
    pub fn metric(&self, name: MetricName) -> &MetricEntry {
        match name {
            MetricName::UserSatisfaction => &self.user_satisfaction,
            MetricName::AdoptionRate => &self.adoption_rate,
            MetricName::TechUtilization => &self.tech_utilization,
            MetricName::MarketCompetitiveness => &self.market_competitiveness,
            MetricName::AirQuality => &self.air_quality,
            MetricName::EnergyConsumption => &self.energy_consumption,
            MetricName::TrafficFlow => &self.traffic_flow,
        }
    }
}
