//! Builders for Jira REST API payloads.

use serde_json::{Map, Value, json};

/// Start building an issue payload with the given key.
pub fn issue(key: &str) -> IssueFixture {
  IssueFixture::new(key)
}

/// A Jira issue as the REST API would return it.
///
/// Defaults to a minimal issue: summary "Summary of KEY", status
/// "In Progress", no assignee, reporter or priority.
#[derive(Debug, Clone)]
pub struct IssueFixture {
  key: String,
  fields: Map<String, Value>,
  comments: Vec<Value>,
  attachments: Vec<Value>,
}

impl IssueFixture {
  pub fn new(key: &str) -> Self {
    let mut fields = Map::new();
    fields.insert("summary".into(), json!(format!("Summary of {key}")));
    fields.insert("description".into(), Value::Null);
    fields.insert("status".into(), json!({ "id": "3", "name": "In Progress" }));
    fields.insert("assignee".into(), Value::Null);
    fields.insert("reporter".into(), Value::Null);
    fields.insert("created".into(), json!("2024-01-01T09:00:00.000+0000"));
    fields.insert("updated".into(), json!("2024-01-02T09:00:00.000+0000"));
    fields.insert("priority".into(), Value::Null);
    fields.insert("labels".into(), json!([]));
    fields.insert("components".into(), json!([]));

    Self {
      key: key.to_string(),
      fields,
      comments: Vec::new(),
      attachments: Vec::new(),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn summary(self, summary: &str) -> Self {
    self.field("summary", json!(summary))
  }

  pub fn description(self, description: &str) -> Self {
    self.field("description", json!(description))
  }

  pub fn status(self, name: &str) -> Self {
    self.field("status", json!({ "name": name }))
  }

  pub fn assignee(self, display_name: &str) -> Self {
    self.field("assignee", user(display_name))
  }

  pub fn reporter(self, display_name: &str) -> Self {
    self.field("reporter", user(display_name))
  }

  pub fn priority(self, name: &str) -> Self {
    self.field("priority", json!({ "id": "2", "name": name }))
  }

  pub fn labels(self, labels: &[&str]) -> Self {
    self.field("labels", json!(labels))
  }

  pub fn components(self, names: &[&str]) -> Self {
    let components: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
    self.field("components", Value::Array(components))
  }

  pub fn custom_field(self, name: &str, value: Value) -> Self {
    self.field(name, value)
  }

  /// Add a comment; `None` models a comment whose author was deleted.
  pub fn comment(mut self, author: Option<&str>, body: &str, created: &str) -> Self {
    let mut comment = Map::new();
    if let Some(author) = author {
      comment.insert("author".into(), user(author));
    }
    comment.insert("body".into(), json!(body));
    comment.insert("created".into(), json!(created));
    self.comments.push(Value::Object(comment));
    self
  }

  pub fn attachment(mut self, filename: &str, size: u64, mime_type: &str) -> Self {
    let id = self.attachments.len() + 10000;
    self.attachments.push(json!({
        "id": id.to_string(),
        "filename": filename,
        "size": size,
        "mimeType": mime_type,
        "content": format!("https://jira.example.com/secure/attachment/{id}/{filename}"),
    }));
    self
  }

  /// Set any raw field entry.
  pub fn field(mut self, name: &str, value: Value) -> Self {
    self.fields.insert(name.to_string(), value);
    self
  }

  /// Full payload as returned by `GET /rest/api/2/issue/{key}`.
  pub fn to_json(&self) -> Value {
    let mut fields = self.fields.clone();
    fields.insert(
      "comment".into(),
      json!({
          "comments": self.comments,
          "maxResults": self.comments.len(),
          "total": self.comments.len(),
          "startAt": 0
      }),
    );
    fields.insert("attachment".into(), Value::Array(self.attachments.clone()));

    json!({
        "id": self.numeric_id(),
        "key": self.key,
        "self": format!("https://jira.example.com/rest/api/2/issue/{}", self.numeric_id()),
        "fields": fields,
    })
  }

  /// Narrow payload as returned inside search results.
  pub fn to_search_json(&self) -> Value {
    let mut fields = Map::new();
    for name in ["summary", "status", "assignee", "priority"] {
      if let Some(value) = self.fields.get(name) {
        fields.insert(name.to_string(), value.clone());
      }
    }

    json!({
        "id": self.numeric_id(),
        "key": self.key,
        "fields": fields,
    })
  }

  fn numeric_id(&self) -> String {
    let digits: String = self.key.chars().filter(char::is_ascii_digit).collect();
    format!("1{digits:0>4}")
  }
}

/// A search response page wrapping the given issues.
pub fn search_page(start_at: usize, total: usize, issues: &[IssueFixture]) -> Value {
  let issues: Vec<Value> = issues.iter().map(IssueFixture::to_search_json).collect();
  json!({
      "expand": "names,schema",
      "startAt": start_at,
      "maxResults": issues.len(),
      "total": total,
      "issues": issues,
  })
}

/// A page from the token-paged `/rest/api/3/search/jql` endpoint. The last
/// page carries no `nextPageToken`.
pub fn jql_search_page(issues: &[IssueFixture], next_page_token: Option<&str>) -> Value {
  let issues: Vec<Value> = issues.iter().map(IssueFixture::to_search_json).collect();
  let mut page = json!({
      "issues": issues,
      "isLast": next_page_token.is_none(),
  });
  if let Some(token) = next_page_token {
    page["nextPageToken"] = json!(token);
  }
  page
}

/// Body Jira Cloud sends from the removed `/rest/api/2/search` endpoint.
pub fn removed_api() -> Value {
  json!({
      "errorMessages": [
          "The requested API has been removed. Please migrate to the /rest/api/3/search/jql API. \
           A full migration guideline is available at https://developer.atlassian.com/changelog/#CHANGE-2046"
      ],
      "errors": {}
  })
}

fn user(display_name: &str) -> Value {
  json!({
      "accountId": format!("acct-{}", display_name.to_lowercase()),
      "displayName": display_name,
      "active": true,
  })
}
