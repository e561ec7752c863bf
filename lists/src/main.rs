//! Todo lists HTTP server.
//!
//! Keeps every browser session's lists in memory and serves them over HTTP.

use std::future::IntoFuture;
use std::sync::Arc;
use todo_lists::{
    config::{Config, DEFAULT_LOG_FILTER},
    server::{AppState, build_router, shutdown_signal},
};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting todo lists server");
    config.validate()?;
    info!(
        session_ttl = config.session.ttl,
        purge_interval = config.session.purge_interval,
        id_policy = ?config.lists.id_policy,
        allow_rename_to_self = config.lists.allow_rename_to_self,
        "Configuration loaded"
    );

    let state = AppState::new(&config);
    let purger = state.sessions.spawn_purger(config.purge_interval());
    let app = build_router(state);

    let addr = config.bind_addr();
    info!(address = %addr, "Starting HTTP server");
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "HTTP server listening");

    // Notified once a shutdown signal arrives, starting the grace period
    let shutdown = Arc::new(Notify::new());
    let signalled = Arc::clone(&shutdown);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            signalled.notify_one();
        })
        .into_future();

    let grace = config.shutdown_timeout();
    tokio::select! {
        result = server => result?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                timeout_secs = grace.as_secs(),
                "Graceful shutdown timed out, dropping open connections"
            );
        }
    }

    purger.abort();
    info!("Server shutdown complete");
    Ok(())
}
