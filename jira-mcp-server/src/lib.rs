//! # Jira MCP Server
//!
//! Model Context Protocol server exposing two read-only Jira tools:
//! `fetch_ticket` for a single ticket's full details and `search_tickets` for
//! JQL queries. Tool calls are translated into Jira REST calls and the results
//! come back as JSON text content.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod server;
pub mod session;
pub mod tickets;
pub mod transport;
pub mod types;

pub use config::JiraConfig;
pub use error::ToolError;
pub use server::JiraMcpServer;
pub use types::{ContentItem, ToolReply};
