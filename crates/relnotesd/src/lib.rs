//! relnotesd - Model Context Protocol server for relnotes
//!
//! Serves feature queries to MCP clients as JSON-RPC 2.0 over
//! newline-delimited stdin/stdout. The release store is loaded once before
//! the first request and shared read-only afterwards.

pub mod handler;
pub mod protocol;
pub mod server;

pub use handler::{McpHandler, FEATURE_UPDATES_TOOL, LIST_VERSIONS_TOOL};
pub use protocol::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};
pub use server::{serve, TransportError};
