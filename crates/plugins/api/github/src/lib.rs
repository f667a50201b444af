//! GitHub adapter for ghbridge.
//!
//! This crate implements [`ghbridge_core::GitHubApi`] against the GitHub
//! REST API: one authenticated GET per operation, mapped into the core
//! domain types.

mod client;
mod types;

pub use client::GitHubClient;
pub use types::*;

/// Default GitHub API URL.
pub const DEFAULT_GITHUB_URL: &str = ghbridge_core::config::DEFAULT_BASE_URL;

/// REST API version pinned through the `X-GitHub-Api-Version` header.
pub const API_VERSION: &str = "2022-11-28";

/// Client identity sent as `User-Agent`.
pub const USER_AGENT: &str = concat!("ghbridge/", env!("CARGO_PKG_VERSION"));
