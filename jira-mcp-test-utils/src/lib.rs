//! Test utilities shared across the jira-mcp workspace
//!
//! This crate provides common testing infrastructure including:
//! - Jira REST payload builders ([`fixtures`])
//! - A `wiremock`-backed Jira server ([`MockJira`])
//! - Environment variable isolation ([`EnvVarGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod mock;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use fixtures::IssueFixture;
pub use mock::MockJira;
