//! workqueue -- a priority-ordered work request queue served over HTTP.
//!
//! Requests are admitted with a caller-chosen id and timestamp, ranked by a
//! tier derived from the id, and can be withdrawn, popped, located, and
//! measured for mean wait.

pub mod api;
pub mod config;
pub mod logging;
pub mod queue;
pub mod time;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::queue::{Classifier, SchedulingService};

/// Build the shared scheduling service from configuration.
pub fn build_service(config: &Config) -> Result<SchedulingService> {
    let classifier =
        Classifier::new(config.priority.clone()).context("invalid priority policy")?;
    Ok(SchedulingService::new(classifier))
}

/// Run the HTTP service until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let service = build_service(&config)?;
    let app = api::router(api::state::AppState::new(service));

    let addr = config.server.bind_addr()?;
    tracing::info!(%addr, "workqueue listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("workqueue stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
