//! Core traits, types, and error handling for ghbridge.
//!
//! This crate provides the foundational abstractions shared by the GitHub
//! adapter, the output formatter, and the MCP server.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::GitHubApi;
pub use error::{Error, Result};
pub use types::*;
