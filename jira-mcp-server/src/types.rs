//! Response types for the Jira tools.
//!
//! Every tool call produces a `ToolReply`: a list of content items plus an
//! error flag. Successful calls carry one text item holding pretty-printed
//! JSON built from the record types below.

use std::collections::BTreeMap;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;

/// A single item of tool output.
///
/// Only `Text` is produced today; the other arms mirror the protocol's content
/// union so they can be wired up without touching callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
  Text { text: String },
  Image { data: String, mime_type: String },
  Resource { uri: String, text: String },
}

impl ContentItem {
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text { text: text.into() }
  }

  /// The text payload, if this is a text item.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text { text } => Some(text),
      _ => None,
    }
  }
}

impl From<ContentItem> for Content {
  fn from(item: ContentItem) -> Self {
    match item {
      ContentItem::Text { text } => Content::text(text),
      ContentItem::Image { data, mime_type } => Content::image(data, mime_type),
      ContentItem::Resource { uri, text } => Content::embedded_text(uri, text),
    }
  }
}

/// The outcome of one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
  pub content: Vec<ContentItem>,
  pub is_error: bool,
}

impl ToolReply {
  /// Serialize `payload` as indented JSON into a single text item.
  pub fn json<T: Serialize>(payload: &T) -> serde_json::Result<Self> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(Self {
      content: vec![ContentItem::text(json)],
      is_error: false,
    })
  }

  pub fn error(error: &ToolError) -> Self {
    Self {
      content: vec![ContentItem::text(error.to_text())],
      is_error: true,
    }
  }

  /// Text of the first content item, if any.
  pub fn first_text(&self) -> Option<&str> {
    self.content.first().and_then(ContentItem::as_text)
  }
}

impl From<ToolReply> for CallToolResult {
  fn from(reply: ToolReply) -> Self {
    let content: Vec<Content> = reply.content.into_iter().map(Content::from).collect();
    let mut result = CallToolResult::success(content);
    result.is_error = Some(reply.is_error);
    result
  }
}

// ---------------------------------------------------------------------------
// Ticket records
// ---------------------------------------------------------------------------

/// Full ticket details returned by `fetch_ticket`.
///
/// Optional associations always serialize, as `null` when absent.
#[derive(Debug, Serialize)]
pub struct TicketRecord {
  pub key: String,
  pub summary: String,
  pub description: Option<String>,
  pub status: String,
  pub assignee: Option<String>,
  pub reporter: Option<String>,
  pub created: Option<String>,
  pub updated: Option<String>,
  pub priority: Option<String>,
  pub labels: Vec<String>,
  pub components: Vec<String>,
  pub custom_fields: BTreeMap<String, Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comments: Option<Vec<CommentRecord>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub attachments: Option<Vec<AttachmentRecord>>,
}

#[derive(Debug, Serialize)]
pub struct CommentRecord {
  pub author: Option<String>,
  pub body: String,
  pub created: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttachmentRecord {
  pub filename: String,
  pub size: u64,
  #[serde(rename = "mimeType")]
  pub mime_type: Option<String>,
  pub content: Option<String>,
}

/// Narrow projection returned by `search_tickets`.
#[derive(Debug, Serialize)]
pub struct TicketSummary {
  pub key: String,
  pub summary: String,
  pub status: String,
  pub assignee: Option<String>,
  pub priority: Option<String>,
}
