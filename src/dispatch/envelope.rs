//! The uniform success/error content envelope returned for every tool call.
//!
//! Success payloads are pretty-printed JSON (or the raw string for
//! confirmation-style results); failures are error-flagged text carrying the
//! error class and tool name, never a raw backend stack trace and never a
//! dropped stream.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use super::error::DispatchError;

/// Wrap a dispatch outcome into the MCP call-tool response.
pub fn call_result(outcome: Result<Value, DispatchError>) -> CallToolResult {
    match outcome {
        Ok(payload) => CallToolResult::success(vec![Content::text(render_payload(&payload))]),
        Err(error) => CallToolResult::error(vec![Content::text(error.to_string())]),
    }
}

/// Render a payload for the text envelope.
///
/// String payloads (confirmations from void-style operations) are emitted
/// as-is; everything else is pretty-printed JSON.
fn render_payload(payload: &Value) -> String {
    match payload {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
