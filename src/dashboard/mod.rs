//! Dashboard metrics provider: baselines, payload shapes, synthesis.

pub mod baselines;
pub mod dto;
pub mod provider;

pub use baselines::MetricName;
pub use provider::{MetricsProvider, UniformRandom, ValueGenerator, HISTORY_DAYS};
