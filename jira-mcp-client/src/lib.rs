//! # Jira API Client
//!
//! Thin Jira REST API client used by the MCP server. Provides the session
//! factory plus the two read-only calls the server needs: fetching a single
//! issue and running a JQL search.

mod client;
mod consts;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use consts::{CUSTOM_FIELD_PREFIX, SEARCH_PAGE_SIZE};
// Re-export models
pub use models::{
  JiraAttachment, JiraAuth, JiraComment, JiraCommentPage, JiraComponent, JiraIssue, JiraIssueFields, JiraIssueStatus,
  JiraJqlSearchResults, JiraNamed, JiraSearchResults, JiraUser,
};
