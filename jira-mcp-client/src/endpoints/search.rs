//! # Jira Search Endpoint
//!
//! Runs JQL queries, paging through results until the requested number of
//! issues has been collected.
//!
//! Server and Data Center instances serve the offset-paged
//! `/rest/api/2/search`. Jira Cloud has removed it (answering `410 Gone`) in
//! favour of the token-paged `/rest/api/3/search/jql`, which is used instead
//! whenever the first request comes back gone.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::{debug, info};

use super::errors::{FailedCall, status_error};
use crate::client::JiraClient;
use crate::consts::{SEARCH_FIELDS, SEARCH_PAGE_SIZE};
use crate::models::{JiraIssue, JiraJqlSearchResults, JiraSearchResults};

impl JiraClient {
  /// Search for issues matching a JQL query.
  ///
  /// Returns at most `max_results` issues in the order the tracker ranks them.
  /// A `max_results` of zero fetches every match. Issues only carry the
  /// summary, status, assignee and priority fields.
  pub async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<JiraIssue>> {
    let limit = (max_results > 0).then_some(max_results as usize);

    match self.search_by_offset(jql, limit).await? {
      Some(issues) => Ok(issues),
      None => {
        info!("offset search endpoint removed, using /rest/api/3/search/jql");
        self.search_by_token(jql, limit).await
      }
    }
  }

  /// Page through `/rest/api/2/search`. `None` means the endpoint is gone.
  async fn search_by_offset(&self, jql: &str, limit: Option<usize>) -> Result<Option<Vec<JiraIssue>>> {
    let url = self.endpoint(&["rest", "api", "2", "search"])?;
    let mut issues: Vec<JiraIssue> = Vec::new();

    loop {
      let start_at = issues.len();
      let page_size = next_page_size(limit, start_at);
      debug!(jql, start_at, page_size, "searching Jira issues");

      let start_at = start_at.to_string();
      let page_size = page_size.to_string();

      let response = self
        .get(url.clone())
        .query(&[
          ("jql", jql),
          ("startAt", start_at.as_str()),
          ("maxResults", page_size.as_str()),
          ("fields", SEARCH_FIELDS),
        ])
        .send()
        .await
        .context("Failed to search Jira issues")?;

      let page = match response.status() {
        StatusCode::OK => response
          .json::<JiraSearchResults>()
          .await
          .context("Failed to parse Jira search results")?,
        StatusCode::GONE if issues.is_empty() => return Ok(None),
        _ => return Err(status_error(response, FailedCall::Search).await),
      };

      let returned = page.issues.len();
      if collect_page(&mut issues, page.issues, limit) || returned == 0 || issues.len() >= page.total as usize {
        break;
      }
    }

    Ok(Some(issues))
  }

  /// Page through `/rest/api/3/search/jql`, following `nextPageToken` until
  /// the tracker reports the last page.
  async fn search_by_token(&self, jql: &str, limit: Option<usize>) -> Result<Vec<JiraIssue>> {
    let url = self.endpoint(&["rest", "api", "3", "search", "jql"])?;
    let mut issues: Vec<JiraIssue> = Vec::new();
    let mut next_page_token: Option<String> = None;

    loop {
      let page_size = next_page_size(limit, issues.len());
      debug!(jql, collected = issues.len(), page_size, "searching Jira issues");

      let page_size = page_size.to_string();
      let mut request = self.get(url.clone()).query(&[
        ("jql", jql),
        ("maxResults", page_size.as_str()),
        ("fields", SEARCH_FIELDS),
      ]);
      if let Some(token) = &next_page_token {
        request = request.query(&[("nextPageToken", token.as_str())]);
      }

      let response = request.send().await.context("Failed to search Jira issues")?;

      let page = match response.status() {
        StatusCode::OK => response
          .json::<JiraJqlSearchResults>()
          .await
          .context("Failed to parse Jira search results")?,
        _ => return Err(status_error(response, FailedCall::Search).await),
      };

      let returned = page.issues.len();
      if collect_page(&mut issues, page.issues, limit) || returned == 0 || page.is_last {
        break;
      }
      match page.next_page_token {
        Some(token) => next_page_token = Some(token),
        None => break,
      }
    }

    Ok(issues)
  }
}

/// Size of the next page given what has been collected so far.
fn next_page_size(limit: Option<usize>, collected: usize) -> usize {
  limit.map_or(SEARCH_PAGE_SIZE as usize, |limit| limit - collected).min(SEARCH_PAGE_SIZE as usize)
}

/// Append a page, capping at `limit`. Returns true once the limit is reached.
fn collect_page(issues: &mut Vec<JiraIssue>, page: Vec<JiraIssue>, limit: Option<usize>) -> bool {
  issues.extend(page);
  match limit {
    Some(limit) => {
      issues.truncate(limit);
      issues.len() >= limit
    }
    None => false,
  }
}
