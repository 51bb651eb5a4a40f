//! asana server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use asana_client::{DdgClient, DdgConfig, OllamaClient, OllamaConfig};
use asana_core::{AppConfig, MediaResolver};
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

    let config = AppConfig::load()?;

    let search = DdgClient::new(DdgConfig {
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
        ..Default::default()
    })?;
    let resolver = Arc::new(MediaResolver::new(Arc::new(search), config.resolver_config()?));

    let generator = OllamaClient::new(OllamaConfig {
        base_url: config.ollama_url.clone(),
        model: config.ollama_model.clone(),
        timeout: config.generation_timeout(),
        user_agent: config.user_agent.clone(),
    })?;

    tracing::info!(
        model = %config.ollama_model,
        cache_ttl_secs = config.cache_ttl_secs,
        cache_capacity = config.cache_capacity,
        "Starting asana server on stdio transport"
    );

    let handler = handler::AsanaServer::new(resolver, Arc::new(generator));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
