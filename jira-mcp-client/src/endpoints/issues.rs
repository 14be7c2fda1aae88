//! # Jira Issue Endpoints
//!
//! Fetches a single Jira issue with all of its navigable fields, including
//! comments, attachments and custom fields.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

use super::errors::{FailedCall, status_error};
use crate::client::JiraClient;
use crate::models::JiraIssue;

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    let url = self.endpoint(&["rest", "api", "2", "issue", issue_key])?;
    debug!(%url, issue_key, "fetching Jira issue");

    let response = self.get(url).send().await.context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => {
        let issue = response
          .json::<JiraIssue>()
          .await
          .context("Failed to parse Jira issue")?;
        Ok(issue)
      }
      _ => Err(status_error(response, FailedCall::Issue(issue_key)).await),
    }
  }
}
