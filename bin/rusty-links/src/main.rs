//! # Rusty-Links Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::sync::Arc;

use anyhow::Context;
use configs::{AppConfig, LogConfig};
use rl_api::AppState;
use rl_core::traits::SubmissionStore;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Feature-gated imports: the store is chosen when compiling
#[cfg(feature = "db-sqlite")]
use rl_db_sqlite::SqliteSubmissionStore;

#[cfg(all(feature = "db-memory", not(feature = "db-sqlite")))]
use rl_db_memory::MemorySubmissionStore;

#[cfg(not(any(feature = "db-sqlite", feature = "db-memory")))]
compile_error!("enable one of the `db-sqlite` or `db-memory` features");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log);

    // 1. Initialize the store implementation
    let store = build_store(&config).await?;

    // 2. Wrap in AppState (dynamic dispatch over the store)
    let app = rl_api::router(AppState::new(store));

    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("binding {}", config.server.bind_address()))?;
    info!("Rusty-Links starting on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Rusty-Links stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[cfg(feature = "db-sqlite")]
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SubmissionStore>> {
    let db = &config.database;
    let store = SqliteSubmissionStore::connect(&db.url, db.max_connections)
        .await
        .with_context(|| format!("opening database {}", config.database.url))?;
    Ok(Arc::new(store))
}

#[cfg(all(feature = "db-memory", not(feature = "db-sqlite")))]
async fn build_store(_config: &AppConfig) -> anyhow::Result<Arc<dyn SubmissionStore>> {
    tracing::warn!("using the in-memory store; submissions are lost on restart");
    Ok(Arc::new(MemorySubmissionStore::new()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
