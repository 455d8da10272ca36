// src/server/mod.rs
// =============================================================================
// HTTP front end for the crawler (the `serve` subcommand).
//
// Submodules:
// - routes: Router and request handlers
// - error: Maps failures to status codes and JSON bodies
//
// One EmailCrawler is shared by every request. It only holds configuration
// and a connection pool, so concurrent requests never share crawl state.
// =============================================================================

mod error;
mod routes;

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::crawl::EmailCrawler;

pub use routes::router;

// Binds to host:port and serves until Ctrl+C
pub async fn serve(host: &str, port: u16, crawler: EmailCrawler) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", host, port))?;

    let budget = crawler.budget();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "Email scraper service is running on http://{} (max {} pages, {:?} per site)",
        addr,
        budget.max_pages,
        budget.max_duration
    );

    axum::serve(listener, router(crawler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down gracefully");
}
