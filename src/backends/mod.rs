//! Backend capability adapters.
//!
//! Each adapter wraps one backend resource and exposes thin tools over it:
//!
//! - `rest.rs` - a shared HTTP client over the configured API
//! - `scratch.rs` - a stateful in-memory session
//!
//! Adapters own their backend resource for the process lifetime; the dispatch
//! core only ever sees them through the [`Capability`](crate::dispatch::Capability)
//! trait.

pub mod rest;
pub mod scratch;

pub use rest::{ApiGetTool, ApiPostTool, RestBackend};
pub use scratch::{
    ScratchBackend, ScratchDeleteTool, ScratchGetTool, ScratchListTool, ScratchSetTool,
};
