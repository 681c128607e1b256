//! `claims-api`: serves the claims desk over HTTP.
//!
//! Settings come from `CLAIMS_*` variables (a `.env` file is honoured):
//!
//! | variable | default |
//! |---|---|
//! | `CLAIMS_HOST` | `0.0.0.0` |
//! | `CLAIMS_PORT` | `8080` |
//! | `CLAIMS_DATABASE_URL` | `sqlite://insurance_claims.db` |
//! | `CLAIMS_MAX_CONNECTIONS` | `5` |
//! | `CLAIMS_LOG_LEVEL` | `info` |
//!
//! `RUST_LOG` takes precedence over `CLAIMS_LOG_LEVEL`.

use anyhow::Context;
use infra_db::{create_pool, initialize_schema, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid CLAIMS_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(database_url = %config.database_url, "Starting claims desk");

    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()).max_connections(config.max_connections),
    )
    .await
    .context("Failed to open database")?;

    initialize_schema(&pool)
        .await
        .context("Failed to initialize database schema")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;
    tracing::info!(%addr, "Accepting requests");

    axum::serve(listener, create_router(pool, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Claims desk stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, draining connections");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        }
    }
}
