//! REST backend adapter.
//!
//! A thin adapter over a single configured HTTP API: one shared client, a
//! base URL, and an optional bearer token. Each tool maps 1:1 onto one
//! request shape; argument-to-request marshaling stays entirely inside this
//! module.

use std::sync::Arc;

use anyhow::{Context, bail};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::core::config::BackendConfig;
use crate::dispatch::{Arguments, Capability, FieldSpec, Schema, ToolDescriptor};

/// Shared client for the configured API.
///
/// The reqwest client is documented as safe to share across concurrent
/// calls, so one instance serves every in-flight dispatch.
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestBackend {
    /// Build the backend from configuration.
    ///
    /// Returns `None` when no base URL is configured; the server still
    /// starts, and calls to REST tools report the backend as unavailable.
    pub fn from_config(config: &BackendConfig) -> Option<Arc<Self>> {
        let base_url = config.base_url.clone()?;
        info!("REST backend configured for {}", base_url);
        Some(Arc::new(Self {
            client: reqwest::Client::new(),
            base_url,
            api_token: config.api_token.clone(),
        }))
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Perform a GET against `path` with optional query parameters.
    pub async fn get(&self, path: &str, query: &Map<String, Value>) -> anyhow::Result<Value> {
        let url = self.url_for(path);
        debug!("GET {}", url);

        let pairs: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.clone(), query_value(v)))
            .collect();

        let response = self
            .authorized(self.client.get(&url).query(&pairs))
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;
        Self::read_body(response).await
    }

    /// Perform a POST against `path` with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        let url = self.url_for(path);
        debug!("POST {}", url);

        let response = self
            .authorized(self.client.post(&url).json(&body))
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        let text = response.text().await.context("failed to read response body")?;

        if !status.is_success() {
            bail!("backend returned {status}: {}", snippet(&text));
        }

        // Not every endpoint returns JSON; fall back to the raw text.
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

// ============================================================================
// Tools
// ============================================================================

/// GET passthrough tool against the configured API.
pub struct ApiGetTool {
    backend: Arc<RestBackend>,
}

impl ApiGetTool {
    pub const NAME: &'static str = "api_get";

    pub const DESCRIPTION: &'static str =
        "Perform a GET request against the configured API. Returns the JSON response body.";

    pub fn new(backend: Arc<RestBackend>) -> Self {
        Self { backend }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::new()
                .required(
                    "path",
                    FieldSpec::string().describe("Request path relative to the base URL"),
                )
                .optional(
                    "query",
                    FieldSpec::object(Schema::new())
                        .describe("Query parameters as a flat object"),
                ),
        )
    }
}

#[async_trait::async_trait]
impl Capability for ApiGetTool {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .context("missing `path` argument")?;
        let empty = Map::new();
        let query = args
            .get("query")
            .and_then(|v| v.as_object())
            .unwrap_or(&empty);
        self.backend.get(path, query).await
    }
}

/// POST passthrough tool against the configured API.
pub struct ApiPostTool {
    backend: Arc<RestBackend>,
}

impl ApiPostTool {
    pub const NAME: &'static str = "api_post";

    pub const DESCRIPTION: &'static str =
        "Perform a POST request with a JSON body against the configured API.";

    pub fn new(backend: Arc<RestBackend>) -> Self {
        Self { backend }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::new()
                .required(
                    "path",
                    FieldSpec::string().describe("Request path relative to the base URL"),
                )
                .optional(
                    "body",
                    FieldSpec::object(Schema::new()).describe("JSON request body"),
                ),
        )
    }
}

#[async_trait::async_trait]
impl Capability for ApiPostTool {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .context("missing `path` argument")?;
        let body = args
            .get("body")
            .cloned()
            .unwrap_or(Value::Object(Map::new()));
        self.backend.post(path, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(base_url: &str) -> Arc<RestBackend> {
        RestBackend::from_config(&BackendConfig {
            base_url: Some(base_url.to_string()),
            api_token: None,
        })
        .unwrap()
    }

    #[test]
    fn test_unconfigured_backend_is_none() {
        let none = RestBackend::from_config(&BackendConfig {
            base_url: None,
            api_token: Some("ignored".to_string()),
        });
        assert!(none.is_none());
    }

    #[test]
    fn test_url_join_handles_slashes() {
        let b = backend("https://api.example.com/v1/");
        assert_eq!(b.url_for("/users"), "https://api.example.com/v1/users");
        assert_eq!(b.url_for("users"), "https://api.example.com/v1/users");
    }

    #[test]
    fn test_query_value_stringification() {
        assert_eq!(query_value(&json!("plain")), "plain");
        assert_eq!(query_value(&json!(42)), "42");
        assert_eq!(query_value(&json!(true)), "true");
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).len(), 200);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_descriptors_declare_path_required() {
        for descriptor in [ApiGetTool::descriptor(), ApiPostTool::descriptor()] {
            assert!(descriptor.input.is_required("path"));
            assert!(!descriptor.input.is_required("query"));
            assert!(!descriptor.input.is_required("body"));
        }
    }
}
