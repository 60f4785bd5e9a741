//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the five graph analytics operations as tools for MCP clients
//! over a stdio JSON-RPC 2.0 transport.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::*;
pub use server::McpServer;
