//! MCP (Model Context Protocol) server for ghbridge.
//!
//! This crate implements the stdio JSON-RPC server that exposes the GitHub
//! tools to AI assistants.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use server::McpServer;
pub use tools::ToolRegistry;
pub use transport::StdioTransport;
