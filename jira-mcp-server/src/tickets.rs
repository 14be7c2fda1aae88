//! The two Jira operations behind the tools.
//!
//! Each operation opens its own session, makes its remote calls and projects
//! the result into a record. Any failure along the way discards everything
//! gathered so far and comes back as a single `ToolError`.

use jira_mcp_client::{JiraIssue, JiraUser};
use tracing::debug;

use crate::config::JiraConfig;
use crate::error::ToolError;
use crate::session::open_session;
use crate::types::{AttachmentRecord, CommentRecord, TicketRecord, TicketSummary};

/// Default cap on search results.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Optional sections of a fetched ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
  pub include_comments: bool,
  pub include_attachments: bool,
}

impl FetchOptions {
  /// Comments and attachments both included.
  pub const EVERYTHING: Self = Self {
    include_comments: true,
    include_attachments: true,
  };
}

/// Fetch one ticket with its standard fields, custom fields and the requested
/// optional sections.
pub async fn fetch_ticket(config: &JiraConfig, ticket_key: &str, options: FetchOptions) -> Result<TicketRecord, ToolError> {
  debug!(ticket_key, ?options, "fetching ticket");
  let session = open_session(config).map_err(ToolError::Fetch)?;
  let issue = session.get_issue(ticket_key).await.map_err(ToolError::Fetch)?;
  Ok(ticket_record(issue, options))
}

/// Run a JQL query and project each hit into a summary, preserving the
/// tracker's ordering.
pub async fn search_tickets(config: &JiraConfig, jql: &str, max_results: u32) -> Result<Vec<TicketSummary>, ToolError> {
  debug!(jql, max_results, "searching tickets");
  let session = open_session(config).map_err(ToolError::Search)?;
  let issues = session
    .search_issues(jql, max_results)
    .await
    .map_err(ToolError::Search)?;
  Ok(issues.into_iter().map(ticket_summary).collect())
}

/// Project a full issue into a ticket record.
pub fn ticket_record(issue: JiraIssue, options: FetchOptions) -> TicketRecord {
  let fields = issue.fields;

  let custom_fields = fields
    .custom_fields()
    .map(|(name, value)| (name.to_string(), value.clone()))
    .collect();

  let comments = options.include_comments.then(|| {
    fields
      .comments()
      .iter()
      .map(|comment| CommentRecord {
        author: display_name(comment.author.as_ref()),
        body: comment.body.clone(),
        created: comment.created.clone(),
      })
      .collect()
  });

  let attachments = options.include_attachments.then(|| {
    fields
      .attachments
      .iter()
      .map(|attachment| AttachmentRecord {
        filename: attachment.filename.clone(),
        size: attachment.size,
        mime_type: attachment.mime_type.clone(),
        content: attachment.content.clone(),
      })
      .collect()
  });

  TicketRecord {
    key: issue.key,
    summary: fields.summary,
    description: fields.description,
    status: fields.status.name,
    assignee: display_name(fields.assignee.as_ref()),
    reporter: display_name(fields.reporter.as_ref()),
    created: fields.created,
    updated: fields.updated,
    priority: fields.priority.map(|p| p.name),
    labels: fields.labels,
    components: fields.components.into_iter().map(|c| c.name).collect(),
    custom_fields,
    comments,
    attachments,
  }
}

/// Project an issue into the narrow search shape.
pub fn ticket_summary(issue: JiraIssue) -> TicketSummary {
  TicketSummary {
    key: issue.key,
    summary: issue.fields.summary,
    status: issue.fields.status.name,
    assignee: display_name(issue.fields.assignee.as_ref()),
    priority: issue.fields.priority.map(|p| p.name),
  }
}

fn display_name(user: Option<&JiraUser>) -> Option<String> {
  user.map(|u| u.display_name.clone())
}
