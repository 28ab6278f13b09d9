//! Metrics provider: synthesizes the dashboard payload.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

use super::baselines::{
    baseline, demo_baseline, innovation_metrics, investment_allocation, MetricName,
};
use super::dto::{
    DashboardResponse, DemoDashboardResponse, HistoryPoint, MetricEntry, ProjectInfo,
};
use crate::config::ProjectConfig;

/// Trailing window of synthesized history, in days.
pub const HISTORY_DAYS: usize = 30;

/// Source of history values. Injected so tests can substitute a
/// deterministic sequence; the production impl is unseeded randomness
/// (every call produces a different series, which is fine for a demo).
pub trait ValueGenerator: Send + Sync {
    /// Draw a value from the half-open range `[lo, hi)`.
    fn sample(&self, lo: f64, hi: f64) -> f64;
}

/// Uniform random values, rounded to 2 decimals.
#[derive(Debug, Default)]
pub struct UniformRandom;

impl ValueGenerator for UniformRandom {
    fn sample(&self, lo: f64, hi: f64) -> f64 {
        let value = rand::thread_rng().gen_range(lo..hi);
        (value * 100.0).round() / 100.0
    }
}

/// Produces dashboard payloads from static baselines.
///
/// Read-only after construction; shared across request handlers.
pub struct MetricsProvider {
    generator: Arc<dyn ValueGenerator>,
    project: ProjectConfig,
}

impl MetricsProvider {
    pub fn new(project: ProjectConfig) -> Self {
        Self::with_generator(project, Arc::new(UniformRandom))
    }

    pub fn with_generator(project: ProjectConfig, generator: Arc<dyn ValueGenerator>) -> Self {
        Self { generator, project }
    }

    /// Full dashboard: every metric with current, trend and a 30-day history
    /// ending today, plus the static reference datasets.
    pub fn dashboard(&self) -> DashboardResponse {
        self.dashboard_at(Utc::now().date_naive())
    }

    /// Same as [`dashboard`](Self::dashboard) with an explicit "today".
    pub fn dashboard_at(&self, today: NaiveDate) -> DashboardResponse {
        let entry = |name| self.full_entry(name, today);

        DashboardResponse {
            user_satisfaction: entry(MetricName::UserSatisfaction),
            adoption_rate: entry(MetricName::AdoptionRate),
            tech_utilization: entry(MetricName::TechUtilization),
            market_competitiveness: entry(MetricName::MarketCompetitiveness),
            air_quality: entry(MetricName::AirQuality),
            energy_consumption: entry(MetricName::EnergyConsumption),
            traffic_flow: entry(MetricName::TrafficFlow),
            investment_allocation: investment_allocation(),
            innovation_metrics: innovation_metrics(),
            last_updated: Utc::now(),
        }
    }

    /// Demo dashboard: static current/trend pairs, no history, plus project
    /// identification for the public display.
    pub fn demo_dashboard(&self) -> DemoDashboardResponse {
        let entry = |name| {
            let (current, trend) = demo_baseline(name);
            MetricEntry {
                current,
                trend,
                history: None,
            }
        };

        DemoDashboardResponse {
            project: ProjectInfo {
                institution: self.project.institution.clone(),
                center: self.project.center.clone(),
                director: self.project.director.clone(),
                project: self.project.project.clone(),
            },
            user_satisfaction: entry(MetricName::UserSatisfaction),
            adoption_rate: entry(MetricName::AdoptionRate),
            tech_utilization: entry(MetricName::TechUtilization),
            market_competitiveness: entry(MetricName::MarketCompetitiveness),
            air_quality: entry(MetricName::AirQuality),
            energy_consumption: entry(MetricName::EnergyConsumption),
            traffic_flow: entry(MetricName::TrafficFlow),
            last_updated: Utc::now(),
        }
    }

    fn full_entry(&self, name: MetricName, today: NaiveDate) -> MetricEntry {
        let b = baseline(name);
        MetricEntry {
            current: b.current,
            trend: b.trend,
            history: Some(self.history(name, today)),
        }
    }

    /// 30 points: day offset `i` in `0..30` maps to `today - (29 - i)` days,
    /// so the series is chronologically ascending and ends today.
    fn history(&self, name: MetricName, today: NaiveDate) -> Vec<HistoryPoint> {
        let (lo, hi) = baseline(name).range;
        (0..HISTORY_DAYS)
            .map(|i| HistoryPoint {
                date: today - Duration::days((HISTORY_DAYS - 1 - i) as i64),
                value: self.generator.sample(lo, hi),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the midpoint of the range.
    struct Midpoint;

    impl ValueGenerator for Midpoint {
        fn sample(&self, lo: f64, hi: f64) -> f64 {
            (lo + hi) / 2.0
        }
    }

    fn provider() -> MetricsProvider {
        MetricsProvider::with_generator(ProjectConfig::default(), Arc::new(Midpoint))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn dashboard_has_exactly_the_seven_metrics() {
        let payload = serde_json::to_value(provider().dashboard_at(today())).unwrap();
        let obj = payload.as_object().unwrap();
        for name in MetricName::ALL {
            assert!(obj.contains_key(name.as_str()), "missing {}", name.as_str());
        }
        assert!(obj.contains_key("investmentAllocation"));
        assert!(obj.contains_key("innovationMetrics"));
    }

    #[test]
    fn history_is_30_consecutive_days_ending_today() {
        let dashboard = provider().dashboard_at(today());
        for name in MetricName::ALL {
            let history = dashboard.metric(name).history.as_ref().unwrap();
            assert_eq!(history.len(), HISTORY_DAYS);
            assert_eq!(history[0].date, today() - Duration::days(29));
            assert_eq!(history[29].date, today());
            for pair in history.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
        }
    }

    #[test]
    fn history_values_come_from_the_metric_range() {
        let dashboard = provider().dashboard_at(today());
        for name in MetricName::ALL {
            let (lo, hi) = crate::dashboard::baselines::baseline(name).range;
            for point in dashboard.metric(name).history.as_ref().unwrap() {
                assert!(point.value >= lo && point.value < hi);
            }
        }
    }

    #[test]
    fn random_generator_stays_in_range() {
        let rng = UniformRandom;
        for _ in 0..100 {
            let v = rng.sample(80.0, 95.0);
            assert!((80.0..=95.0).contains(&v));
        }
    }

    #[test]
    fn currents_and_trends_match_baselines() {
        let dashboard = provider().dashboard_at(today());
        let sat = dashboard.metric(MetricName::UserSatisfaction);
        assert_eq!(sat.current, 84.4);
        assert_eq!(sat.trend, 2.5);
        let energy = dashboard.metric(MetricName::EnergyConsumption);
        assert_eq!(energy.current, 234.0);
        assert_eq!(energy.trend, -3.2);
    }

    #[test]
    fn demo_dashboard_has_no_history_and_static_currents() {
        let demo = provider().demo_dashboard();
        for name in MetricName::ALL {
            assert!(demo.metric(name).history.is_none());
        }
        assert_eq!(demo.metric(MetricName::UserSatisfaction).current, 85.0);
        assert_eq!(demo.project.project, "Beifi Smart City Dashboard");
    }

    #[test]
    fn allocation_always_sums_to_100() {
        let dashboard = provider().dashboard_at(today());
        let total: f64 = dashboard
            .investment_allocation
            .iter()
            .map(|s| s.value)
            .sum();
        assert_eq!(total, 100.0);
    }
}
