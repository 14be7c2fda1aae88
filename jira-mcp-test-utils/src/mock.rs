//! A mock Jira server backed by `wiremock`.

use wiremock::matchers::{basic_auth, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{self, IssueFixture};

/// Mock Jira instance that only accepts the fixture credentials.
pub struct MockJira {
  server: MockServer,
}

impl MockJira {
  pub const USERNAME: &'static str = "test_user";
  pub const API_TOKEN: &'static str = "test_token";

  pub async fn start() -> Self {
    Self {
      server: MockServer::start().await,
    }
  }

  /// Base URL to point a client at.
  pub fn uri(&self) -> String {
    self.server.uri()
  }

  /// The underlying server, for mounting custom mocks.
  pub fn server(&self) -> &MockServer {
    &self.server
  }

  /// Serve `GET /rest/api/2/issue/{key}` for the given issue.
  pub async fn mount_issue(&self, issue: IssueFixture) {
    Mock::given(method("GET"))
      .and(path(format!("/rest/api/2/issue/{}", issue.key())))
      .and(basic_auth(Self::USERNAME, Self::API_TOKEN))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue.to_json()))
      .mount(&self.server)
      .await;
  }

  /// Serve one page of `GET /rest/api/2/search` for the given query.
  pub async fn mount_search_page(
    &self,
    jql: &str,
    start_at: usize,
    max_results: usize,
    total: usize,
    issues: Vec<IssueFixture>,
  ) {
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(basic_auth(Self::USERNAME, Self::API_TOKEN))
      .and(query_param("jql", jql))
      .and(query_param("startAt", start_at.to_string()))
      .and(query_param("maxResults", max_results.to_string()))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::search_page(start_at, total, &issues)))
      .mount(&self.server)
      .await;
  }

  /// Answer `GET /rest/api/2/search` with `410 Gone`, as Jira Cloud does.
  pub async fn mount_removed_offset_search(&self) {
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(410).set_body_json(fixtures::removed_api()))
      .mount(&self.server)
      .await;
  }

  /// Serve one page of `GET /rest/api/3/search/jql`. `page_token` is the
  /// token the request must carry (`None` for the first page) and
  /// `next_page_token` the one handed back (`None` on the last page).
  pub async fn mount_jql_search_page(
    &self,
    jql: &str,
    max_results: usize,
    page_token: Option<&str>,
    next_page_token: Option<&str>,
    issues: Vec<IssueFixture>,
  ) {
    let mock = Mock::given(method("GET"))
      .and(path("/rest/api/3/search/jql"))
      .and(basic_auth(Self::USERNAME, Self::API_TOKEN))
      .and(query_param("jql", jql))
      .and(query_param("maxResults", max_results.to_string()));
    let mock = match page_token {
      Some(token) => mock.and(query_param("nextPageToken", token)),
      None => mock.and(query_param_is_missing("nextPageToken")),
    };

    mock
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::jql_search_page(&issues, next_page_token)))
      .mount(&self.server)
      .await;
  }
}
