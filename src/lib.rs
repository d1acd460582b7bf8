//! Gateway MCP Server Library
//!
//! A generic MCP (Model Context Protocol) tool server built around a
//! data-driven dispatch core: tools are declared as catalog entries with
//! input schemas and bound by name to backend capabilities, so adding or
//! removing a tool is a data change rather than new control flow.
//!
//! # Architecture
//!
//! - **core**: Infrastructure - configuration, error handling, the MCP
//!   server handler, and the transport layer
//! - **dispatch**: The reusable dispatch envelope - catalog, validator,
//!   registry, dispatcher
//! - **backends**: Thin capability adapters over backend resources
//! - **toolset**: The assembly point wiring descriptors to capabilities
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_mcp_server::core::{Config, GatewayServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = GatewayServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod core;
pub mod dispatch;
pub mod toolset;

// Re-export commonly used types for convenience
pub use core::{Config, Error, GatewayServer, Result};
pub use dispatch::{
    Capability, CapabilityRegistry, DispatchError, Dispatcher, Schema, ToolCatalog, ToolDescriptor,
};
