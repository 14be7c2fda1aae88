//! Error descriptions returned by tool calls.

use thiserror::Error;

/// Everything that can go wrong while serving a tool call.
///
/// None of these are fatal: each becomes a single `"Error: ..."` text item.
#[derive(Debug, Error)]
pub enum ToolError {
  #[error("Missing required argument '{0}'")]
  MissingArgument(&'static str),

  #[error("Invalid argument '{name}': {reason}")]
  InvalidArgument { name: &'static str, reason: String },

  #[error("Unknown tool: {0}")]
  UnknownTool(String),

  #[error("Failed to fetch Jira ticket data: {0:#}")]
  Fetch(anyhow::Error),

  #[error("Failed to search Jira tickets: {0:#}")]
  Search(anyhow::Error),
}

impl ToolError {
  /// Text carried by the error content item.
  pub fn to_text(&self) -> String {
    format!("Error: {self}")
  }
}
