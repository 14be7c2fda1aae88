//! MCP server handler wiring the catalog and dispatcher into rmcp.

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use crate::catalog;
use crate::config::JiraConfig;
use crate::dispatch;

/// Stateless MCP server; every call builds its own Jira session.
#[derive(Clone)]
pub struct JiraMcpServer {
  config: Arc<JiraConfig>,
}

impl JiraMcpServer {
  pub fn new(config: Arc<JiraConfig>) -> Self {
    Self { config }
  }
}

impl ServerHandler for JiraMcpServer {
  fn get_info(&self) -> ServerInfo {
    ServerInfo {
      instructions: Some(
        "Jira MCP server. Use `fetch_ticket` to read a ticket with its comments, attachments and custom fields, \
         and `search_tickets` to run a JQL query."
          .into(),
      ),
      capabilities: ServerCapabilities::builder().enable_tools().build(),
      ..Default::default()
    }
  }

  async fn list_tools(
    &self,
    _request: Option<PaginatedRequestParam>,
    _context: RequestContext<RoleServer>,
  ) -> Result<ListToolsResult, McpError> {
    let tools = catalog::tools().into_iter().map(Tool::from).collect();
    Ok(ListToolsResult {
      tools,
      ..Default::default()
    })
  }

  async fn call_tool(
    &self,
    request: CallToolRequestParam,
    _context: RequestContext<RoleServer>,
  ) -> Result<CallToolResult, McpError> {
    let arguments = request.arguments.unwrap_or_default();
    let reply = dispatch::invoke(&self.config, &request.name, &arguments).await;
    Ok(reply.into())
  }
}

#[cfg(test)]
mod tests {
  use rmcp::ServiceExt;
  use serde_json::{Value, json};
  use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};

  use super::*;

  /// Client end of an in-process connection, speaking newline-delimited
  /// JSON-RPC to a served handler.
  struct RawClient {
    writer: WriteHalf<DuplexStream>,
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
  }

  impl RawClient {
    async fn connect(server: JiraMcpServer) -> Self {
      let (client_io, server_io) = tokio::io::duplex(64 * 1024);
      tokio::spawn(async move {
        if let Ok(running) = server.serve(server_io).await {
          let _ = running.waiting().await;
        }
      });

      let (reader, writer) = tokio::io::split(client_io);
      let mut client = Self {
        writer,
        lines: BufReader::new(reader).lines(),
      };

      let init = client
        .request(
          0,
          "initialize",
          json!({
              "protocolVersion": "2025-03-26",
              "capabilities": {},
              "clientInfo": { "name": "raw-client", "version": "0.0.0" }
          }),
        )
        .await;
      assert!(init["result"]["capabilities"]["tools"].is_object(), "{init}");
      client
        .send(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
        .await;

      client
    }

    async fn send(&mut self, message: Value) {
      let mut line = message.to_string();
      line.push('\n');
      self.writer.write_all(line.as_bytes()).await.unwrap();
      self.writer.flush().await.unwrap();
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
      self
        .send(json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))
        .await;
      while let Some(line) = self.lines.next_line().await.unwrap() {
        let message: Value = serde_json::from_str(&line).unwrap();
        if message["id"] == json!(id) {
          return message;
        }
      }
      panic!("connection closed before a reply to {method}");
    }
  }

  fn unconfigured_server() -> JiraMcpServer {
    JiraMcpServer::new(Arc::new(JiraConfig::default()))
  }

  #[test]
  fn test_server_advertises_tools_capability() {
    let info = unconfigured_server().get_info();

    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap_or_default().contains("search_tickets"));
  }

  #[tokio::test]
  async fn test_list_tools_returns_catalog() {
    let mut client = RawClient::connect(unconfigured_server()).await;

    let reply = client.request(1, "tools/list", json!({})).await;

    let tools = reply["result"]["tools"].as_array().unwrap();
    let names: Vec<_> = tools.iter().map(|tool| tool["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["fetch_ticket", "search_tickets"]);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["ticketKey"]));
    assert_eq!(tools[1]["inputSchema"]["required"], json!(["jql"]));
  }

  #[tokio::test]
  async fn test_call_tool_without_arguments() {
    let mut client = RawClient::connect(unconfigured_server()).await;

    let reply = client.request(1, "tools/call", json!({ "name": "fetch_ticket" })).await;

    let result = &reply["result"];
    assert_eq!(result["isError"], json!(true));
    assert_eq!(
      result["content"],
      json!([{ "type": "text", "text": "Error: Missing required argument 'ticketKey'" }])
    );
  }

  #[tokio::test]
  async fn test_call_unknown_tool() {
    let mut client = RawClient::connect(unconfigured_server()).await;

    let reply = client
      .request(1, "tools/call", json!({ "name": "close_ticket", "arguments": { "ticketKey": "PROJ-1" } }))
      .await;

    assert_eq!(reply["result"]["isError"], json!(true));
    assert_eq!(reply["result"]["content"][0]["text"], json!("Error: Unknown tool: close_ticket"));
  }

  #[tokio::test]
  async fn test_call_tool_reports_missing_url() {
    let mut client = RawClient::connect(unconfigured_server()).await;

    let reply = client
      .request(1, "tools/call", json!({ "name": "search_tickets", "arguments": { "jql": "project = PROJ" } }))
      .await;

    assert_eq!(reply["result"]["isError"], json!(true));
    assert_eq!(
      reply["result"]["content"][0]["text"],
      json!("Error: Failed to search Jira tickets: JIRA_URL is not configured")
    );
  }
}
