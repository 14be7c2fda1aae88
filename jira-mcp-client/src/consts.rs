//! Constants for the Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jira-mcp/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Key prefix Jira uses for instance-specific custom fields
pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// Largest page requested from the search endpoint in a single round-trip
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Issue fields requested by searches; results only carry this narrow projection
pub(crate) const SEARCH_FIELDS: &str = "summary,status,assignee,priority";
