//! Listener binding and graceful shutdown

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use axum::Router;
use pixpack_core::Config;

/// Bind on all interfaces and serve `app` until SIGINT or SIGTERM.
///
/// In-flight conversions are allowed to finish before the future resolves.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %listener.local_addr().unwrap_or(addr),
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        request_timeout_secs = config.request_timeout_secs(),
        http_concurrency_limit = config.http_concurrency_limit(),
        workspace_dir = config.workspace_dir().unwrap_or("<system temp>"),
        "Accepting conversion requests"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown_signal().await;
            tracing::info!(signal, "Shutdown requested, draining in-flight requests");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves with the name of the first termination signal received.
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            name = ctrl_c() => name,
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable, only Ctrl+C stops the server");
            ctrl_c().await
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    ctrl_c().await
}

/// Never resolves if the Ctrl+C handler cannot be installed.
async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
