//! The static tool catalog advertised to clients.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::tickets::DEFAULT_MAX_RESULTS;

/// Name of the ticket lookup tool.
pub const FETCH_TICKET: &str = "fetch_ticket";
/// Name of the JQL search tool.
pub const SEARCH_TICKETS: &str = "search_tickets";

/// Static metadata for one tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
  pub name: &'static str,
  pub description: &'static str,
  pub input_schema: Value,
}

/// Get all available tools
pub fn tools() -> Vec<ToolDescriptor> {
  vec![
    ToolDescriptor {
      name: FETCH_TICKET,
      description: "Fetches detailed information about a Jira ticket, including basic fields, custom fields, and \
                    optionally comments and attachments.",
      input_schema: json!({
          "type": "object",
          "required": ["ticketKey"],
          "properties": {
              "ticketKey": {
                  "type": "string",
                  "description": "Jira ticket key (e.g., PROJ-123)"
              }
          }
      }),
    },
    ToolDescriptor {
      name: SEARCH_TICKETS,
      description: "Search for Jira tickets using JQL (Jira Query Language)",
      input_schema: json!({
          "type": "object",
          "required": ["jql"],
          "properties": {
              "jql": {
                  "type": "string",
                  "description": "JQL query string"
              },
              "maxResults": {
                  "type": "integer",
                  "description": "Maximum number of results to return",
                  "default": DEFAULT_MAX_RESULTS
              }
          }
      }),
    },
  ]
}

impl From<ToolDescriptor> for Tool {
  fn from(descriptor: ToolDescriptor) -> Self {
    let schema: JsonObject = match descriptor.input_schema {
      Value::Object(map) => map,
      _ => JsonObject::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
  }
}
