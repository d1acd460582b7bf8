//! Toolset assembly - catalog plus registry built from configuration.
//!
//! This is the single place where tool descriptors meet their backend
//! capabilities. Every tool is always listed in the catalog; a capability is
//! registered only when its backend is configured, so calls to an unwired
//! tool report "backend not configured" instead of "no such tool".

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::backends::{
    ApiGetTool, ApiPostTool, RestBackend, ScratchBackend, ScratchDeleteTool, ScratchGetTool,
    ScratchListTool, ScratchSetTool,
};
use crate::core::config::Config;
use crate::dispatch::{
    Arguments, CapabilityRegistry, DuplicateToolError, FieldSpec, FnCapability, Schema,
    ToolCatalog, ToolDescriptor,
};

/// The assembled catalog and registry for one server process.
pub struct Toolset {
    pub catalog: Arc<ToolCatalog>,
    pub registry: Arc<CapabilityRegistry>,
}

/// Name of the built-in connectivity-check tool.
pub const ECHO_TOOL: &str = "echo";

/// Build the toolset from configuration.
pub fn build_toolset(config: &Config) -> Result<Toolset, DuplicateToolError> {
    let catalog = ToolCatalog::new(vec![
        echo_descriptor(),
        ApiGetTool::descriptor(),
        ApiPostTool::descriptor(),
        ScratchSetTool::descriptor(),
        ScratchGetTool::descriptor(),
        ScratchDeleteTool::descriptor(),
        ScratchListTool::descriptor(),
    ])?;

    let mut registry = CapabilityRegistry::new();

    registry.register(
        ECHO_TOOL,
        Arc::new(FnCapability::new(|args: Arguments| async move {
            let msg = args
                .get("msg")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow::anyhow!("missing `msg` argument"))?;
            Ok(json!(msg.to_uppercase()))
        })),
    )?;

    match RestBackend::from_config(&config.backend) {
        Some(backend) => {
            registry.register(ApiGetTool::NAME, Arc::new(ApiGetTool::new(backend.clone())))?;
            registry.register(ApiPostTool::NAME, Arc::new(ApiPostTool::new(backend)))?;
        }
        None => {
            warn!(
                "MCP_API_BASE_URL not set - {} and {} stay cataloged but unavailable",
                ApiGetTool::NAME,
                ApiPostTool::NAME
            );
        }
    }

    let session = ScratchBackend::new();
    registry.register(
        ScratchSetTool::NAME,
        Arc::new(ScratchSetTool::new(session.clone())),
    )?;
    registry.register(
        ScratchGetTool::NAME,
        Arc::new(ScratchGetTool::new(session.clone())),
    )?;
    registry.register(
        ScratchDeleteTool::NAME,
        Arc::new(ScratchDeleteTool::new(session.clone())),
    )?;
    registry.register(
        ScratchListTool::NAME,
        Arc::new(ScratchListTool::new(session)),
    )?;

    Ok(Toolset {
        catalog: Arc::new(catalog),
        registry: Arc::new(registry),
    })
}

fn echo_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        ECHO_TOOL,
        "Echo a message back in upper case. Useful as a connectivity check.",
        Schema::new().required("msg", FieldSpec::string().describe("Message to echo")),
    )
}
