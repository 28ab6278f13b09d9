//! Beifi Smart City Dashboard API binary.
//!
//! Reads configuration from a TOML file
//! (`~/.config/beifi-dashboard/config.toml` by default, overridable via
//! `DASHBOARD_CONFIG`) and serves the dashboard API.

use tracing::{error, info};

use beifi_dashboard::config::{default_config_path, AppConfig};
use beifi_dashboard::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("DASHBOARD_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = if config_path.exists() {
        match AppConfig::load(&config_path) {
            Ok(config) => {
                server::init_tracing(&config);
                info!("Configuration loaded from {}", config_path.display());
                config
            }
            Err(e) => {
                // A present-but-broken config is a hard error; a production
                // config without a signing secret must not limp along on
                // defaults.
                server::init_tracing(&AppConfig::default());
                error!("Failed to load config from {}: {}", config_path.display(), e);
                return Err(e.into());
            }
        }
    } else {
        let config = AppConfig::from_env()?;
        server::init_tracing(&config);
        info!(
            "No config file at {}; using defaults with environment overrides",
            config_path.display()
        );
        config
    };

    server::run(config).await
}
