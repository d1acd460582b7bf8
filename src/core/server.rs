//! Gateway server implementation and lifecycle management.
//!
//! The server handler implements the MCP protocol by delegating to the
//! dispatch core: `tools/list` reads the catalog, `tools/call` goes through
//! the dispatcher and comes back as the uniform content envelope.
//!
//! The `ServerHandler` methods here are hand-written rather than generated by
//! the `#[tool_handler]` macro because the catalog is runtime data: tools are
//! descriptors assembled in `toolset.rs`, not compile-time parameter structs.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::dispatch::{Dispatcher, envelope};
use crate::toolset::build_toolset;

/// The main gateway server handler.
///
/// Holds the read-only catalog and registry (via the dispatcher) shared by
/// all concurrent calls. A failed tool call is always a normal error-flagged
/// response; it never terminates the stream or affects other in-flight calls.
#[derive(Clone)]
pub struct GatewayServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The dispatch core shared by all transports.
    dispatcher: Arc<Dispatcher>,
}

impl GatewayServer {
    /// Create a new gateway server with the given configuration.
    ///
    /// Fails (and the process does not start) if the toolset declares two
    /// tools under one name.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let toolset = build_toolset(&config)?;
        let dispatcher = Arc::new(Dispatcher::new(
            toolset.catalog,
            toolset.registry,
            config.dispatch.call_deadline(),
        ));

        Ok(Self { config, dispatcher })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the dispatcher (for tests and diagnostics).
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Catalog descriptors rendered as MCP tool models.
    fn tool_models(&self) -> Vec<Tool> {
        self.dispatcher
            .catalog()
            .list()
            .iter()
            .map(|descriptor| Tool {
                name: descriptor.name.clone().into(),
                description: Some(descriptor.description.clone().into()),
                input_schema: Arc::new(descriptor.input.to_input_schema()),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
                title: None,
            })
            .collect()
    }
}

impl ServerHandler for GatewayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Generic tool gateway. Call `echo` to verify connectivity; the remaining \
                 tools map 1:1 onto configured backend operations."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_models(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let outcome = self
            .dispatcher
            .invoke(&request.name, request.arguments)
            .await;
        Ok(envelope::call_result(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> GatewayServer {
        GatewayServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_construction() {
        let server = server();
        assert_eq!(server.name(), "gateway-mcp-server");
        assert!(!server.version().is_empty());
    }

    #[test]
    fn test_tool_models_match_catalog() {
        let server = server();
        let models = server.tool_models();
        assert_eq!(models.len(), server.dispatcher().catalog().len());

        let echo = models.iter().find(|t| t.name == "echo").unwrap();
        let schema = echo.input_schema.as_ref();
        assert_eq!(schema["type"], serde_json::json!("object"));
        assert_eq!(schema["required"], serde_json::json!(["msg"]));
    }

    #[test]
    fn test_listing_is_idempotent() {
        let server = server();
        let first: Vec<_> = server.tool_models().iter().map(|t| t.name.clone()).collect();
        let second: Vec<_> = server.tool_models().iter().map(|t| t.name.clone()).collect();
        assert_eq!(first, second);
    }
}
