//! # Jira API Endpoints
//!
//! Endpoint implementations for the read-only Jira resources the server uses:
//! single issues and JQL search.

mod errors;
pub mod issues;
pub mod search;
