//! Capability registry - the name to handler mapping built at startup.
//!
//! The registry is purely a lookup table: no validation, no error
//! translation. A tool may appear in the catalog without a registered
//! capability (its backend was never configured); the dispatcher reports
//! those calls as unavailable rather than unknown.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::DuplicateToolError;

/// A validated argument bag as handed to a capability.
pub type Arguments = Map<String, Value>;

/// The executable backend implementation bound to a tool name.
///
/// A capability performs exactly one remote operation: it receives the
/// validated argument bag and returns JSON-serializable data or fails.
/// Adapters must not block indefinitely; the dispatcher bounds every
/// invocation with the configured deadline.
#[async_trait::async_trait]
pub trait Capability: Send + Sync {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value>;
}

/// Adapter turning an async closure into a [`Capability`].
pub struct FnCapability<F> {
    f: F,
}

impl<F> FnCapability<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F, Fut> Capability for FnCapability<F>
where
    F: Fn(Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        (self.f)(args).await
    }
}

/// Name to capability mapping, populated at construction time only.
#[derive(Default)]
pub struct CapabilityRegistry {
    handlers: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a capability to a tool name. Fails on duplicates.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        capability: Arc<dyn Capability>,
    ) -> Result<(), DuplicateToolError> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(DuplicateToolError(name));
        }
        self.handlers.insert(name, capability);
        Ok(())
    }

    /// Look up the capability bound to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.handlers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
