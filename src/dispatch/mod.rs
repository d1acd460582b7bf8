//! Tool dispatch core.
//!
//! The reusable heart of the server: a data-driven tool catalog, a schema
//! validator, a capability registry, and the dispatcher that ties them
//! together per call.
//!
//! ## Architecture
//!
//! - `schema.rs` - declarative input shapes (fields, kinds, defaults)
//! - `catalog.rs` - the ordered, unique-name list of tool descriptors
//! - `validate.rs` - structural argument validation before any backend I/O
//! - `registry.rs` - the name to [`Capability`] lookup table
//! - `dispatcher.rs` - routing, validating, executing with a per-call deadline
//! - `envelope.rs` - the uniform success/error content envelope
//! - `error.rs` - the dispatch error taxonomy
//!
//! ## Adding a new tool
//!
//! 1. Write (or reuse) a backend adapter implementing [`Capability`]
//! 2. Declare a [`ToolDescriptor`] with its input [`Schema`]
//! 3. Add both to the toolset assembly in `toolset.rs`
//!
//! Dispatch itself never changes: tools are data, not control flow.

mod catalog;
mod dispatcher;
pub mod envelope;
mod error;
mod registry;
mod schema;
mod validate;

pub use catalog::{ToolCatalog, ToolDescriptor};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DuplicateToolError};
pub use registry::{Arguments, Capability, CapabilityRegistry, FnCapability};
pub use schema::{FieldKind, FieldSpec, Schema};
pub use validate::{ValidationError, validate};
