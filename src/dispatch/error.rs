//! Dispatch-specific error types.

use std::time::Duration;

use thiserror::Error;

/// Construction-time error: two tools registered under one name.
#[derive(Debug, Error)]
#[error("duplicate tool name: {0}")]
pub struct DuplicateToolError(pub String);

/// Errors produced while dispatching a single tool call.
///
/// `UnknownTool` and `ValidationFailed` are caller-fault and are detected
/// before any backend I/O. `BackendUnavailable`, `Backend` and `Timeout` are
/// backend-fault; the dispatcher never retries either class.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested name is not in the catalog.
    #[error("no such tool: {0}")]
    UnknownTool(String),

    /// The arguments do not satisfy the tool's declared input shape.
    #[error("invalid arguments for `{tool}`: {detail}")]
    ValidationFailed { tool: String, detail: String },

    /// The tool is cataloged but its backend was never wired up
    /// (missing credentials or configuration).
    #[error("tool `{0}` is not available: backend not configured")]
    BackendUnavailable(String),

    /// The backend adapter's underlying call failed.
    #[error("backend call failed for `{tool}`: {message}")]
    Backend {
        tool: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The call exceeded the configured deadline.
    #[error("call to `{tool}` timed out after {deadline:?}")]
    Timeout { tool: String, deadline: Duration },
}

impl DispatchError {
    /// Wrap an adapter failure, preserving its message and cause.
    pub fn backend(tool: impl Into<String>, error: anyhow::Error) -> Self {
        Self::Backend {
            tool: tool.into(),
            message: error.to_string(),
            source: Some(error.into()),
        }
    }

    /// Short classification name, used for logging and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::Backend { .. } => "backend_error",
            Self::Timeout { .. } => "timeout",
        }
    }

    /// Whether the failure is the caller's fault (bad name or bad arguments).
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::ValidationFailed { .. })
    }
}
