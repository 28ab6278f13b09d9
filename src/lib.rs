//! # Beifi Smart City Dashboard API
//!
//! Minimal HTTP backend for a smart-city dashboard demo: mock metrics with
//! synthesized 30-day history, static reference datasets, and a demo
//! credential-lookup login flow issuing signed, time-limited session tokens.
//!
//! ## Architecture
//!
//! - **auth**: static credential table, session tokens (JWT), middleware
//! - **dashboard**: metric baselines and payload synthesis
//! - **api**: REST API with Swagger documentation
//! - **config**: TOML configuration with environment overrides
//! - **server**: bootstrap and graceful shutdown
//! - **shared**: error taxonomy

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use api::create_api_router;

pub use shared::ApiError;
