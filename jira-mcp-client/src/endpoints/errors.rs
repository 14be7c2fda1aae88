use anyhow::Error;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Error body Jira returns alongside 4xx responses
#[derive(Debug, Default, Deserialize)]
struct JiraErrorBody {
  #[serde(rename = "errorMessages", default)]
  error_messages: Vec<String>,
}

/// The call a failed response belongs to
pub(crate) enum FailedCall<'a> {
  Issue(&'a str),
  Search,
}

/// Map a non-success response to the error shared by every endpoint.
pub(crate) async fn status_error(response: Response, call: FailedCall<'_>) -> Error {
  let status = response.status();
  match (status, call) {
    (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
      anyhow::anyhow!("Authentication failed. Please check your Jira credentials.")
    }
    (StatusCode::NOT_FOUND, FailedCall::Issue(key)) => anyhow::anyhow!("Issue {} not found", key),
    (StatusCode::BAD_REQUEST, call) => {
      let messages = response
        .json::<JiraErrorBody>()
        .await
        .unwrap_or_default()
        .error_messages
        .join("; ");
      match call {
        FailedCall::Search => anyhow::anyhow!("Invalid JQL query: {}", messages),
        FailedCall::Issue(key) => anyhow::anyhow!("Bad request for issue {}: {}", key, messages),
      }
    }
    _ => anyhow::anyhow!(
      "Unexpected error: HTTP {} - {}",
      status,
      response.text().await.unwrap_or_default()
    ),
  }
}
