//! jira-mcp: MCP server exposing Jira ticket lookup and JQL search.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgAction, Parser};
use jira_mcp_server::JiraConfig;
use jira_mcp_server::transport::{self, Transport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "MCP server for Jira ticket lookup and JQL search")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,

  /// Transport used to talk to the MCP client. `sse` (alias `http`) serves MCP
  /// Streamable HTTP at `/mcp`, not the legacy `/sse` + `/messages/` pair
  #[arg(long, value_enum, default_value_t = Transport::Stdio)]
  transport: Transport,

  /// Port to listen on for the streaming HTTP transport
  #[arg(long, default_value_t = 8000)]
  port: u16,

  /// Environment file to load JIRA_URL, JIRA_USERNAME and JIRA_API_TOKEN from
  /// (defaults to ./.env when present)
  #[arg(long = "env-file", value_name = "PATH")]
  env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Tracing to stderr; stdout carries the stdio transport.
  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  let config = Arc::new(JiraConfig::load(cli.env_file.as_deref())?);

  match cli.transport {
    Transport::Stdio => transport::serve_stdio(config).await,
    Transport::Sse => transport::serve_http(config, cli.port).await,
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_cli_defaults() {
    let cli = Cli::parse_from(["jira-mcp"]);
    assert_eq!(cli.transport, Transport::Stdio);
    assert_eq!(cli.port, 8000);
    assert!(cli.env_file.is_none());
    assert_eq!(cli.verbose, 0);
  }

  #[test]
  fn test_cli_sse_transport() {
    let cli = Cli::parse_from(["jira-mcp", "--transport", "sse", "--port", "9100", "-vv"]);
    assert_eq!(cli.transport, Transport::Sse);
    assert_eq!(cli.port, 9100);
    assert_eq!(cli.verbose, 2);
  }

  #[test]
  fn test_transport_help_names_http_endpoint() {
    let help = Cli::command().render_long_help().to_string();
    assert!(help.contains("/mcp"), "{help}");
    assert!(help.contains("legacy"), "{help}");
  }
}
