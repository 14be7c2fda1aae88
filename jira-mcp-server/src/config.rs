//! Start-up configuration for the Jira connection.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Nothing is validated here: a missing value only matters once a tool
//! call tries to reach Jira.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Environment variable holding the Jira server URL.
pub const ENV_JIRA_URL: &str = "JIRA_URL";
/// Environment variable holding the Jira account name.
pub const ENV_JIRA_USERNAME: &str = "JIRA_USERNAME";
/// Environment variable holding the Jira API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Connection settings read once at process start.
#[derive(Clone, Default)]
pub struct JiraConfig {
  pub url: Option<String>,
  pub username: Option<String>,
  pub api_token: Option<String>,
}

impl std::fmt::Debug for JiraConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraConfig")
      .field("url", &self.url)
      .field("username", &self.username)
      .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl JiraConfig {
  /// Load configuration from the environment.
  ///
  /// An explicit `env_file` must exist; without one, a `.env` in the working
  /// directory (or a parent) is used when present. Variables already set in
  /// the environment always win over file entries.
  pub fn load(env_file: Option<&Path>) -> Result<Self> {
    match env_file {
      Some(path) => {
        dotenv::from_path(path).with_context(|| format!("Failed to load environment file {}", path.display()))?;
        debug!(path = %path.display(), "loaded environment file");
      }
      None => {
        if let Ok(path) = dotenv::dotenv() {
          debug!(path = %path.display(), "loaded environment file");
        }
      }
    }

    let config = Self::from_lookup(|name| std::env::var(name).ok());
    config.warn_missing();
    Ok(config)
  }

  /// Build configuration from an arbitrary variable lookup. Empty values are
  /// treated as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
    Self {
      url: read(ENV_JIRA_URL),
      username: read(ENV_JIRA_USERNAME),
      api_token: read(ENV_JIRA_API_TOKEN),
    }
  }

  /// Names of the variables that were not provided.
  pub fn missing(&self) -> Vec<&'static str> {
    [
      (ENV_JIRA_URL, self.url.is_none()),
      (ENV_JIRA_USERNAME, self.username.is_none()),
      (ENV_JIRA_API_TOKEN, self.api_token.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect()
  }

  fn warn_missing(&self) {
    let missing = self.missing();
    if !missing.is_empty() {
      warn!(
        missing = %missing.join(", "),
        "Jira configuration incomplete; tool calls will fail until it is provided"
      );
    }
  }
}
