//! Server bootstrap: tracing, router assembly, graceful shutdown.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::create_api_router;
use crate::auth::{CredentialTable, JwtConfig};
use crate::config::AppConfig;
use crate::dashboard::MetricsProvider;

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup, before [`run`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Run the dashboard API server until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Beifi Smart City Dashboard API...");

    let jwt_config = JwtConfig::from_config(&config);
    if config.security.jwt_secret.is_none() {
        // validate() already refused this combination in production mode.
        warn!("No jwt_secret configured; using the dev default (unsafe outside demos)");
    }
    info!(
        "Session tokens configured with {}h expiration",
        jwt_config.expiration_hours
    );

    // Static configuration, read-only for the lifetime of the process.
    let credentials = Arc::new(CredentialTable::demo());
    let provider = Arc::new(MetricsProvider::new(config.project.clone()));

    let router = create_api_router(credentials, provider, jwt_config, &config);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard API listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard API shutdown complete");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => warn!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
