//! Routes tool calls by name to the Jira operations.
//!
//! Arguments arrive as an untyped JSON object. They are checked and converted
//! into typed argument structs here, before any remote call is made, and every
//! outcome (including failures) leaves as a `ToolReply`.

use rmcp::model::JsonObject;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::{FETCH_TICKET, SEARCH_TICKETS};
use crate::config::JiraConfig;
use crate::error::ToolError;
use crate::tickets::{self, DEFAULT_MAX_RESULTS, FetchOptions};
use crate::types::ToolReply;

/// Typed arguments of `fetch_ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicketArgs {
  pub ticket_key: String,
}

impl FetchTicketArgs {
  pub fn parse(arguments: &JsonObject) -> Result<Self, ToolError> {
    Ok(Self {
      ticket_key: required_string(arguments, "ticketKey")?,
    })
  }
}

/// Typed arguments of `search_tickets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicketsArgs {
  pub jql: String,
  pub max_results: u32,
}

impl SearchTicketsArgs {
  pub fn parse(arguments: &JsonObject) -> Result<Self, ToolError> {
    Ok(Self {
      jql: required_string(arguments, "jql")?,
      max_results: optional_count(arguments, "maxResults", DEFAULT_MAX_RESULTS)?,
    })
  }
}

/// Invoke a tool by name.
///
/// Always returns exactly one reply; errors are reported in-band.
pub async fn invoke(config: &JiraConfig, name: &str, arguments: &JsonObject) -> ToolReply {
  info!(tool = name, "tool call");

  let result = match name {
    FETCH_TICKET => fetch_ticket(config, arguments).await,
    SEARCH_TICKETS => search_tickets(config, arguments).await,
    _ => Err(ToolError::UnknownTool(name.to_string())),
  };

  result.unwrap_or_else(|error| {
    warn!(tool = name, %error, "tool call failed");
    ToolReply::error(&error)
  })
}

async fn fetch_ticket(config: &JiraConfig, arguments: &JsonObject) -> Result<ToolReply, ToolError> {
  let args = FetchTicketArgs::parse(arguments)?;
  // Comments and attachments are always included; caller flags are ignored.
  let record = tickets::fetch_ticket(config, &args.ticket_key, FetchOptions::EVERYTHING).await?;
  ToolReply::json(&record).map_err(|e| ToolError::Fetch(e.into()))
}

async fn search_tickets(config: &JiraConfig, arguments: &JsonObject) -> Result<ToolReply, ToolError> {
  let args = SearchTicketsArgs::parse(arguments)?;
  let results = tickets::search_tickets(config, &args.jql, args.max_results).await?;
  ToolReply::json(&results).map_err(|e| ToolError::Search(e.into()))
}

fn required_string(arguments: &JsonObject, name: &'static str) -> Result<String, ToolError> {
  match arguments.get(name) {
    None => Err(ToolError::MissingArgument(name)),
    Some(Value::String(value)) => Ok(value.clone()),
    Some(other) => Err(ToolError::InvalidArgument {
      name,
      reason: format!("expected a string, got {}", json_type(other)),
    }),
  }
}

fn optional_count(arguments: &JsonObject, name: &'static str, default: u32) -> Result<u32, ToolError> {
  match arguments.get(name) {
    None | Some(Value::Null) => Ok(default),
    Some(Value::Number(number)) => number
      .as_u64()
      .and_then(|n| u32::try_from(n).ok())
      .ok_or_else(|| ToolError::InvalidArgument {
        name,
        reason: format!("expected a non-negative integer, got {number}"),
      }),
    Some(other) => Err(ToolError::InvalidArgument {
      name,
      reason: format!("expected an integer, got {}", json_type(other)),
    }),
  }
}

const fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
