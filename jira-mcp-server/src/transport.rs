//! Transport selection: stdio for local embedding, or a long-lived streaming
//! HTTP endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::JiraConfig;
use crate::server::JiraMcpServer;

/// Path the streaming HTTP endpoint is mounted at.
pub const HTTP_ENDPOINT: &str = "/mcp";

/// How the server talks to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
  /// JSON-RPC over standard input/output
  Stdio,
  /// MCP Streamable HTTP at `/mcp` (GET opens the event stream, POST sends
  /// messages). Not the legacy `/sse` + `/messages/` endpoint pair.
  #[value(alias = "http")]
  Sse,
}

/// Serve a single client over stdin/stdout until it disconnects.
pub async fn serve_stdio(config: Arc<JiraConfig>) -> Result<()> {
  info!("serving MCP over stdio");
  let service = JiraMcpServer::new(config)
    .serve(rmcp::transport::io::stdio())
    .await
    .context("Failed to start stdio transport")?;
  service.waiting().await?;
  Ok(())
}

/// Build the axum router exposing the MCP endpoint. Each client session gets
/// its own server instance sharing `config`.
pub fn http_router(config: Arc<JiraConfig>, cancellation_token: CancellationToken) -> axum::Router {
  let service = StreamableHttpService::new(
    move || Ok(JiraMcpServer::new(Arc::clone(&config))),
    LocalSessionManager::default().into(),
    StreamableHttpServerConfig {
      cancellation_token,
      ..Default::default()
    },
  );

  axum::Router::new().nest_service(HTTP_ENDPOINT, service)
}

/// Serve clients over streaming HTTP on all interfaces until Ctrl-C.
pub async fn serve_http(config: Arc<JiraConfig>, port: u16) -> Result<()> {
  let addr = SocketAddr::from(([0, 0, 0, 0], port));
  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;

  let cancellation_token = CancellationToken::new();
  let router = http_router(config, cancellation_token.child_token());
  info!(%addr, endpoint = HTTP_ENDPOINT, "serving MCP over streaming HTTP");

  axum::serve(listener, router)
    .with_graceful_shutdown(async move {
      let _ = tokio::signal::ctrl_c().await;
      info!("shutting down");
      cancellation_token.cancel();
    })
    .await
    .context("HTTP server error")?;

  Ok(())
}
