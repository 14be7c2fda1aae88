use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::consts::CUSTOM_FIELD_PREFIX;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
///
/// Only the standard fields the server projects are typed. Every other entry
/// of the raw `fields` object lands in `other`, untouched.
#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
  #[serde(default)]
  pub summary: String,
  pub description: Option<String>,
  pub status: JiraIssueStatus,
  pub assignee: Option<JiraUser>,
  pub reporter: Option<JiraUser>,
  pub created: Option<String>,
  pub updated: Option<String>,
  pub priority: Option<JiraNamed>,
  #[serde(default)]
  pub labels: Vec<String>,
  #[serde(default)]
  pub components: Vec<JiraComponent>,
  pub comment: Option<JiraCommentPage>,
  #[serde(default, rename = "attachment")]
  pub attachments: Vec<JiraAttachment>,
  #[serde(flatten)]
  pub other: BTreeMap<String, Value>,
}

impl JiraIssueFields {
  /// Raw `customfield_*` entries, in key order, values exactly as received.
  pub fn custom_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
    self
      .other
      .iter()
      .filter(|(name, _)| name.starts_with(CUSTOM_FIELD_PREFIX))
      .map(|(name, value)| (name.as_str(), value))
  }

  /// Comments on the issue, empty when the comment field was not returned.
  pub fn comments(&self) -> &[JiraComment] {
    self.comment.as_ref().map(|page| page.comments.as_slice()).unwrap_or_default()
  }
}

/// Represents a Jira issue status
#[derive(Debug, Deserialize)]
pub struct JiraIssueStatus {
  pub id: Option<String>,
  pub name: String,
}

/// Any Jira entity that is referenced by name, such as a priority
#[derive(Debug, Deserialize)]
pub struct JiraNamed {
  pub name: String,
}

/// Represents a Jira project component
pub type JiraComponent = JiraNamed;

/// Represents a Jira user
#[derive(Debug, Deserialize)]
pub struct JiraUser {
  #[serde(rename = "displayName", default)]
  pub display_name: String,
}

/// The `comment` field of an issue
#[derive(Debug, Deserialize)]
pub struct JiraCommentPage {
  #[serde(default)]
  pub comments: Vec<JiraComment>,
}

/// Represents a single comment on an issue
#[derive(Debug, Deserialize)]
pub struct JiraComment {
  pub author: Option<JiraUser>,
  #[serde(default)]
  pub body: String,
  pub created: Option<String>,
}

/// Represents an attachment on an issue
#[derive(Debug, Deserialize)]
pub struct JiraAttachment {
  pub filename: String,
  #[serde(default)]
  pub size: u64,
  #[serde(rename = "mimeType")]
  pub mime_type: Option<String>,
  /// URL the attachment body can be downloaded from
  pub content: Option<String>,
}

/// One page of results from the offset-paged `/rest/api/2/search` endpoint
#[derive(Debug, Deserialize)]
pub struct JiraSearchResults {
  #[serde(rename = "startAt", default)]
  pub start_at: u32,
  #[serde(default)]
  pub total: u32,
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
}

/// One page of results from the token-paged `/rest/api/3/search/jql` endpoint
#[derive(Debug, Deserialize)]
pub struct JiraJqlSearchResults {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
  #[serde(rename = "nextPageToken")]
  pub next_page_token: Option<String>,
  #[serde(rename = "isLast", default)]
  pub is_last: bool,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_auth() {
    let auth = JiraAuth {
      username: "test_user".to_string(),
      api_token: "test_token".to_string(),
    };

    assert_eq!(auth.username, "test_user");
    assert_eq!(auth.api_token, "test_token");
  }

  #[test]
  fn test_jira_issue_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "summary": "Test issue",
            "description": "This is a test issue",
            "status": {
                "name": "In Progress"
            },
            "assignee": { "displayName": "Alice" },
            "reporter": null,
            "priority": { "name": "High" },
            "labels": ["backend", "urgent"],
            "components": [{ "name": "API" }],
            "customfield_10010": 8,
            "customfield_10011": null,
            "watches": { "watchCount": 2 }
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.id, "10000");
    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.fields.summary, "Test issue");
    assert_eq!(issue.fields.description, Some("This is a test issue".to_string()));
    assert_eq!(issue.fields.status.name, "In Progress");
    assert_eq!(issue.fields.assignee.as_ref().map(|u| u.display_name.as_str()), Some("Alice"));
    assert!(issue.fields.reporter.is_none());
    assert_eq!(issue.fields.priority.as_ref().map(|p| p.name.as_str()), Some("High"));
    assert_eq!(issue.fields.labels, vec!["backend", "urgent"]);
    assert_eq!(issue.fields.components[0].name, "API");
    assert!(issue.fields.comments().is_empty());
    assert!(issue.fields.attachments.is_empty());

    let custom: Vec<_> = issue.fields.custom_fields().collect();
    assert_eq!(
      custom,
      vec![("customfield_10010", &json!(8)), ("customfield_10011", &Value::Null)]
    );
  }

  #[test]
  fn test_comments_and_attachments_deserialization() {
    let json = json!({
        "summary": "With extras",
        "status": { "name": "Open" },
        "comment": {
            "comments": [
                { "author": { "displayName": "Bob" }, "body": "Looks good", "created": "2024-01-02T10:00:00.000+0000" },
                { "body": "Orphaned", "created": "2024-01-03T10:00:00.000+0000" }
            ],
            "maxResults": 2,
            "total": 2
        },
        "attachment": [
            {
                "filename": "trace.log",
                "size": 2048,
                "mimeType": "text/plain",
                "content": "https://jira.example.com/secure/attachment/1/trace.log"
            }
        ]
    });

    let fields: JiraIssueFields = serde_json::from_value(json).unwrap();

    let comments = fields.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].author.as_ref().map(|a| a.display_name.as_str()), Some("Bob"));
    assert!(comments[1].author.is_none());
    assert_eq!(fields.attachments[0].filename, "trace.log");
    assert_eq!(fields.attachments[0].size, 2048);
    assert_eq!(fields.attachments[0].mime_type.as_deref(), Some("text/plain"));
    assert_eq!(fields.custom_fields().count(), 0);
  }

  #[test]
  fn test_search_results_deserialization() {
    let json = json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 1,
        "issues": [
            { "id": "1", "key": "PROJ-1", "fields": { "summary": "One", "status": { "name": "Done" } } }
        ]
    });

    let page: JiraSearchResults = serde_json::from_value(json).unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.issues.len(), 1);
    assert_eq!(page.issues[0].key, "PROJ-1");
    assert!(page.issues[0].fields.assignee.is_none());
  }

  #[test]
  fn test_jql_search_results_deserialization() {
    let json = json!({
        "issues": [
            { "id": "2", "key": "PROJ-2", "fields": { "summary": "Two", "status": { "name": "To Do" } } }
        ],
        "nextPageToken": "CAEaAggD",
        "isLast": false
    });

    let page: JiraJqlSearchResults = serde_json::from_value(json).unwrap();
    assert_eq!(page.issues[0].key, "PROJ-2");
    assert_eq!(page.next_page_token.as_deref(), Some("CAEaAggD"));
    assert!(!page.is_last);

    let last: JiraJqlSearchResults = serde_json::from_value(json!({ "issues": [] })).unwrap();
    assert!(last.next_page_token.is_none());
    assert!(!last.is_last);
  }
}
