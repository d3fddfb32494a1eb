//! eyerise MCP server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use eyerise_client::{CachedFetchClient, FetchConfig};
use eyerise_core::{AppConfig, ResponseStore, SqliteStore};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let store = SqliteStore::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache database at {}", config.db_path.display()))?;
    let store: Arc<dyn ResponseStore> = Arc::new(store);
    let cache = config.build_cache(store);
    let client = CachedFetchClient::new(FetchConfig::from(&config), cache)?;

    tracing::info!(
        db_path = %config.db_path.display(),
        ttl_seconds = config.ttl_seconds,
        ignored = config.ignored_substrings.len(),
        "Starting eyerise server on stdio transport"
    );

    let handler = handler::EyeriseServer::new(Arc::new(client));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
