//! Configuration management for the gateway server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables or defaults. Configuration is read once at startup;
//! backend credentials live here and never appear in logs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Main configuration structure for the gateway server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Dispatch behavior (per-call deadline).
    pub dispatch: DispatchConfig,

    /// REST backend configuration.
    pub backend: BackendConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-call deadline in seconds. A capability still running at the
    /// deadline is abandoned and the call reported as timed out.
    pub call_timeout_secs: u64,
}

impl DispatchConfig {
    pub fn call_deadline(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// Configuration for the REST backend.
///
/// When `base_url` is unset the REST tools stay in the catalog but answer
/// every call as unavailable; the server itself still starts.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the upstream API.
    pub base_url: Option<String>,

    /// Bearer token sent with every request, if set.
    pub api_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "gateway-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            dispatch: DispatchConfig {
                call_timeout_secs: 30,
            },
            backend: BackendConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timeout) = std::env::var("MCP_CALL_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.dispatch.call_timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_CALL_TIMEOUT_SECS value: {:?}",
                    timeout
                ),
            }
        }

        if let Ok(base_url) = std::env::var("MCP_API_BASE_URL") {
            config.backend.base_url = Some(base_url);
            info!("REST backend base URL loaded from environment");
        } else {
            warn!("MCP_API_BASE_URL not set - REST tools will report backend unavailable");
        }

        if let Ok(token) = std::env::var("MCP_API_TOKEN") {
            config.backend.api_token = Some(token);
            info!("API token loaded from environment");
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}
