use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::consts::USER_AGENT;
use crate::models::JiraAuth;

/// Represents a Jira API client
///
/// A client is a short-lived session: the server builds one per tool call and
/// drops it when the call returns.
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: Url, auth: JiraAuth) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url,
      auth,
    })
  }

  /// The server root every REST path is resolved against
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Build an absolute REST URL from path segments, percent-encoding each one.
  pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| anyhow::anyhow!("Jira URL '{}' cannot be used as a base URL", self.base_url))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  pub(crate) fn get(&self, url: Url) -> reqwest::RequestBuilder {
    self
      .client
      .get(url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
  }
}

/// Create a Jira client from credentials
///
/// This is the session factory: it only parses the base URL and prepares the
/// HTTP client. Connection and credential problems surface on the first call.
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> Result<JiraClient> {
  let base_url = parse_base_url(base_url)?;
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}

/// Parse a Jira base URL, assuming https:// when no scheme is given.
fn parse_base_url(input: &str) -> Result<Url> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Jira URL cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  Url::parse(&candidate).with_context(|| format!("Failed to parse Jira URL: '{input}'"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_jira_client_creation() -> Result<()> {
    let client = create_jira_client("https://test.atlassian.net", "test_user", "test_token")?;

    assert_eq!(client.base_url().as_str(), "https://test.atlassian.net/");
    assert_eq!(client.auth.username, "test_user");
    assert_eq!(client.auth.api_token, "test_token");

    Ok(())
  }

  #[test]
  fn test_base_url_without_scheme_defaults_to_https() -> Result<()> {
    let client = create_jira_client("example.atlassian.net", "u", "t")?;
    assert_eq!(client.base_url().scheme(), "https");
    assert_eq!(client.base_url().host_str(), Some("example.atlassian.net"));
    Ok(())
  }

  #[test]
  fn test_empty_base_url_is_rejected() {
    let error = create_jira_client("   ", "u", "t").err().map(|e| e.to_string());
    assert_eq!(error.as_deref(), Some("Jira URL cannot be empty"));
  }

  #[test]
  fn test_endpoint_keeps_context_path() -> Result<()> {
    let client = create_jira_client("https://jira.example.com/jira/", "u", "t")?;
    let url = client.endpoint(&["rest", "api", "2", "issue", "PROJ-1"])?;
    assert_eq!(url.as_str(), "https://jira.example.com/jira/rest/api/2/issue/PROJ-1");
    Ok(())
  }

  #[test]
  fn test_endpoint_encodes_segments() -> Result<()> {
    let client = create_jira_client("https://jira.example.com", "u", "t")?;
    let url = client.endpoint(&["rest", "api", "2", "issue", "BAD KEY/1"])?;
    assert_eq!(url.as_str(), "https://jira.example.com/rest/api/2/issue/BAD%20KEY%2F1");
    Ok(())
  }
}
