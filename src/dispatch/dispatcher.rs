//! The dispatcher - single stateless entry point for tool calls.
//!
//! Each call moves through three phases: routing (catalog and registry
//! lookup), validating (schema check), executing (the one await point). There
//! is no retry loop and no state carried between calls; the catalog and
//! registry are read-only and safely shared across concurrent dispatches.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use super::catalog::ToolCatalog;
use super::error::DispatchError;
use super::registry::{Arguments, CapabilityRegistry};
use super::validate::validate;

/// Turns `{name, arguments}` into a success payload or a classified error.
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
    registry: Arc<CapabilityRegistry>,
    call_deadline: Duration,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<ToolCatalog>,
        registry: Arc<CapabilityRegistry>,
        call_deadline: Duration,
    ) -> Self {
        Self {
            catalog,
            registry,
            call_deadline,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn call_deadline(&self) -> Duration {
        self.call_deadline
    }

    /// Dispatch a single tool call.
    ///
    /// Every failure comes back as a [`DispatchError`]; this method never
    /// panics and never lets an adapter error escape unclassified. The
    /// capability future is dropped when the deadline expires, so a late
    /// completion can never overwrite the already-reported timeout.
    #[instrument(skip(self, arguments), fields(tool = name))]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<Arguments>,
    ) -> Result<serde_json::Value, DispatchError> {
        // Routing
        let descriptor = self
            .catalog
            .find(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let capability = self
            .registry
            .lookup(name)
            .ok_or_else(|| DispatchError::BackendUnavailable(name.to_string()))?;

        // Validating
        let mut args = arguments.unwrap_or_default();
        validate(&descriptor.input, &mut args).map_err(|e| {
            warn!("Validation failed for {}: {}", name, e);
            DispatchError::ValidationFailed {
                tool: name.to_string(),
                detail: e.to_string(),
            }
        })?;

        // Executing - the single suspension point, bounded by the deadline.
        match tokio::time::timeout(self.call_deadline, capability.invoke(args)).await {
            Ok(Ok(payload)) => {
                info!("Tool {} completed", name);
                Ok(payload)
            }
            Ok(Err(error)) => {
                warn!("Tool {} failed: {:#}", name, error);
                Err(DispatchError::backend(name, error))
            }
            Err(_) => {
                warn!("Tool {} exceeded deadline of {:?}", name, self.call_deadline);
                Err(DispatchError::Timeout {
                    tool: name.to_string(),
                    deadline: self.call_deadline,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::catalog::ToolDescriptor;
    use crate::dispatch::registry::{Capability, FnCapability};
    use crate::dispatch::schema::{FieldSpec, Schema};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Capability stub that counts invocations and echoes its arguments.
    struct CountingCapability {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Capability for CountingCapability {
        async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Object(args))
        }
    }

    fn echo_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "echo",
            "Echo a message back in upper case",
            Schema::new().required("msg", FieldSpec::string()),
        )
    }

    fn counting_dispatcher(deadline: Duration) -> (Dispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog = ToolCatalog::new(vec![echo_descriptor()]).unwrap();
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                "echo",
                Arc::new(CountingCapability {
                    calls: calls.clone(),
                }),
            )
            .unwrap();
        (
            Dispatcher::new(Arc::new(catalog), Arc::new(registry), deadline),
            calls,
        )
    }

    fn args(value: Value) -> Option<Arguments> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn test_example_scenario_success() {
        let catalog = ToolCatalog::new(vec![echo_descriptor()]).unwrap();
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                "echo",
                Arc::new(FnCapability::new(|args: Arguments| async move {
                    let msg = args
                        .get("msg")
                        .and_then(|v| v.as_str())
                        .ok_or_else(|| anyhow::anyhow!("missing msg"))?;
                    Ok(json!(msg.to_uppercase()))
                })),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(catalog),
            Arc::new(registry),
            Duration::from_secs(5),
        );

        let result = dispatcher
            .invoke("echo", args(json!({ "msg": "hi" })))
            .await
            .unwrap();
        assert_eq!(result, json!("HI"));
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_backend_call() {
        let (dispatcher, calls) = counting_dispatcher(Duration::from_secs(5));
        let err = dispatcher.invoke("nope", args(json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), "unknown_tool");
        assert_eq!(err.to_string(), "no such tool: nope");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_gate_blocks_capability() {
        let (dispatcher, calls) = counting_dispatcher(Duration::from_secs(5));
        let err = dispatcher.invoke("echo", args(json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), "validation_failed");
        assert!(err.to_string().contains("missing required field `msg`"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extra_fields_reach_the_capability() {
        let (dispatcher, calls) = counting_dispatcher(Duration::from_secs(5));
        let result = dispatcher
            .invoke("echo", args(json!({ "msg": "hi", "trace_id": "abc" })))
            .await
            .unwrap();
        assert_eq!(result["msg"], json!("hi"));
        assert_eq!(result["trace_id"], json!("abc"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cataloged_but_unregistered_is_unavailable() {
        let catalog = ToolCatalog::new(vec![echo_descriptor()]).unwrap();
        let registry = CapabilityRegistry::new();
        let dispatcher = Dispatcher::new(
            Arc::new(catalog),
            Arc::new(registry),
            Duration::from_secs(5),
        );

        let err = dispatcher
            .invoke("echo", args(json!({ "msg": "hi" })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "backend_unavailable");
    }

    #[tokio::test]
    async fn test_adapter_errors_are_contained() {
        let catalog = ToolCatalog::new(vec![echo_descriptor()]).unwrap();
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                "echo",
                Arc::new(FnCapability::new(|_args: Arguments| async move {
                    Err(anyhow::anyhow!("socket closed unexpectedly"))
                })),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(catalog),
            Arc::new(registry),
            Duration::from_secs(5),
        );

        let err = dispatcher
            .invoke("echo", args(json!({ "msg": "hi" })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "backend_error");
        assert!(err.to_string().contains("socket closed unexpectedly"));
    }

    #[tokio::test]
    async fn test_late_completion_is_reported_as_timeout() {
        let completed = Arc::new(AtomicUsize::new(0));
        let completed_probe = completed.clone();

        let catalog = ToolCatalog::new(vec![echo_descriptor()]).unwrap();
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                "echo",
                Arc::new(FnCapability::new(move |_args: Arguments| {
                    let completed = completed_probe.clone();
                    async move {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        completed.fetch_add(1, Ordering::SeqCst);
                        Ok(json!("too late"))
                    }
                })),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(catalog),
            Arc::new(registry),
            Duration::from_millis(20),
        );

        let err = dispatcher
            .invoke("echo", args(json!({ "msg": "hi" })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "timeout");

        // The pending future was dropped at the deadline; the "success" never
        // materialized anywhere.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_defaults_visible_to_capability() {
        let descriptor = ToolDescriptor::new(
            "search",
            "search with a default limit",
            Schema::new()
                .required("query", FieldSpec::string())
                .optional("limit", FieldSpec::number().with_default(10)),
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog = ToolCatalog::new(vec![descriptor]).unwrap();
        let mut registry = CapabilityRegistry::new();
        registry
            .register(
                "search",
                Arc::new(CountingCapability {
                    calls: calls.clone(),
                }),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(catalog),
            Arc::new(registry),
            Duration::from_secs(5),
        );

        let result = dispatcher
            .invoke("search", args(json!({ "query": "rust" })))
            .await
            .unwrap();
        assert_eq!(result["limit"], json!(10));
    }
}
