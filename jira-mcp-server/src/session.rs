//! Session factory: a fresh authenticated Jira client per tool call.

use anyhow::Result;
use jira_mcp_client::{JiraClient, create_jira_client};

use crate::config::{ENV_JIRA_URL, JiraConfig};

/// Open a Jira session from the start-up configuration.
///
/// Missing credentials are sent as empty strings so Jira itself reports the
/// authentication failure; only a missing URL is caught here, since there is
/// nothing to connect to.
pub fn open_session(config: &JiraConfig) -> Result<JiraClient> {
  let url = config
    .url
    .as_deref()
    .ok_or_else(|| anyhow::anyhow!("{ENV_JIRA_URL} is not configured"))?;

  create_jira_client(
    url,
    config.username.as_deref().unwrap_or_default(),
    config.api_token.as_deref().unwrap_or_default(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_open_session_uses_configured_url() -> Result<()> {
    let config = JiraConfig {
      url: Some("https://example.atlassian.net".into()),
      username: Some("alice@example.com".into()),
      api_token: Some("secret".into()),
    };

    let session = open_session(&config)?;
    assert_eq!(session.base_url().host_str(), Some("example.atlassian.net"));

    Ok(())
  }

  #[test]
  fn test_open_session_without_url_fails() {
    let error = open_session(&JiraConfig::default()).err().map(|e| e.to_string());
    assert_eq!(error.as_deref(), Some("JIRA_URL is not configured"));
  }

  #[test]
  fn test_open_session_tolerates_missing_credentials() {
    let config = JiraConfig {
      url: Some("jira.internal.example.com".into()),
      ..Default::default()
    };

    assert!(open_session(&config).is_ok());
  }
}
