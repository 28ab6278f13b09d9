//! Static metric baselines and reference datasets.
//!
//! All values are fixed demo configuration, not derived from anything.

use serde::Serialize;
use utoipa::ToSchema;

use super::dto::{AllocationSlice, InnovationRow};

/// The fixed set of dashboard metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MetricName {
    UserSatisfaction,
    AdoptionRate,
    TechUtilization,
    MarketCompetitiveness,
    AirQuality,
    EnergyConsumption,
    TrafficFlow,
}

impl MetricName {
    pub const ALL: [MetricName; 7] = [
        MetricName::UserSatisfaction,
        MetricName::AdoptionRate,
        MetricName::TechUtilization,
        MetricName::MarketCompetitiveness,
        MetricName::AirQuality,
        MetricName::EnergyConsumption,
        MetricName::TrafficFlow,
    ];

    /// Wire name (camelCase JSON key).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserSatisfaction => "userSatisfaction",
            Self::AdoptionRate => "adoptionRate",
            Self::TechUtilization => "techUtilization",
            Self::MarketCompetitiveness => "marketCompetitiveness",
            Self::AirQuality => "airQuality",
            Self::EnergyConsumption => "energyConsumption",
            Self::TrafficFlow => "trafficFlow",
        }
    }
}

/// Configured anchor for one metric: current snapshot, trend delta, and the
/// range history values are drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    pub current: f64,
    pub trend: f64,
    /// Inclusive lower / exclusive upper bound for synthesized history.
    pub range: (f64, f64),
}

/// Baselines for the full dashboard variant.
pub fn baseline(name: MetricName) -> Baseline {
    match name {
        MetricName::UserSatisfaction => Baseline {
            current: 84.4,
            trend: 2.5,
            range: (80.0, 95.0),
        },
        MetricName::AdoptionRate => Baseline {
            current: 52.6,
            trend: 1.8,
            range: (50.0, 70.0),
        },
        MetricName::TechUtilization => Baseline {
            current: 78.1,
            trend: -0.5,
            range: (70.0, 88.0),
        },
        MetricName::MarketCompetitiveness => Baseline {
            current: 7.5,
            trend: 0.3,
            range: (7.0, 9.0),
        },
        MetricName::AirQuality => Baseline {
            current: 76.0,
            trend: -2.1,
            range: (65.0, 90.0),
        },
        MetricName::EnergyConsumption => Baseline {
            current: 234.0,
            trend: -3.2,
            range: (200.0, 280.0),
        },
        MetricName::TrafficFlow => Baseline {
            current: 82.0,
            trend: 1.5,
            range: (70.0, 100.0),
        },
    }
}

/// Current/trend pairs for the demo (public display) variant.
pub fn demo_baseline(name: MetricName) -> (f64, f64) {
    match name {
        MetricName::UserSatisfaction => (85.0, 2.5),
        MetricName::AdoptionRate => (52.0, 1.8),
        MetricName::TechUtilization => (78.0, -0.5),
        MetricName::MarketCompetitiveness => (7.5, 0.3),
        MetricName::AirQuality => (76.0, -2.1),
        MetricName::EnergyConsumption => (234.0, -3.2),
        MetricName::TrafficFlow => (82.0, 1.5),
    }
}

/// Investment allocation breakdown. Values sum to 100.
pub fn investment_allocation() -> Vec<AllocationSlice> {
    vec![
        AllocationSlice {
            category: "Research",
            value: 35.0,
            color: "#FF6384",
        },
        AllocationSlice {
            category: "Development",
            value: 40.0,
            color: "#36A2EB",
        },
        AllocationSlice {
            category: "Marketing",
            value: 15.0,
            color: "#FFCE56",
        },
        AllocationSlice {
            category: "Operations",
            value: 10.0,
            color: "#4BC0C0",
        },
    ]
}

/// Innovation metrics by month, first half of the year.
pub fn innovation_metrics() -> Vec<InnovationRow> {
    let row = |month, new_features, improvements, research| InnovationRow {
        month,
        new_features,
        improvements,
        research,
    };
    vec![
        row("Jan", 5, 12, 3),
        row("Feb", 7, 8, 2),
        row("Mar", 3, 15, 4),
        row("Apr", 8, 10, 1),
        row("May", 6, 14, 3),
        row("Jun", 9, 7, 5),
    ]
}
