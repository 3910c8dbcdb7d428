//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the workshop's progress and playground operations as MCP tools.
//! The server speaks JSON-RPC 2.0 over a newline-delimited stdio transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MCP Server                          │
//! │                                                             │
//! │   ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    │
//! │   │  Transport  │───▶│   Server    │───▶│   Tools     │    │
//! │   │   (stdio)   │    │  (lifecycle)│    │  (handlers) │    │
//! │   └─────────────┘    └─────────────┘    └─────────────┘    │
//! │                                                │            │
//! │                                                ▼            │
//! │                              ┌──────────────────────────┐   │
//! │                              │  Workshop + progress     │   │
//! │                              │  resolver                │   │
//! │                              └──────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! Protocol versions 2024-11-05, 2025-03-26 and 2025-06-18 are accepted;
//! anything else is answered with 2024-11-05.

pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::{StdioTransport, Transport};
