//! Scratch session backend - a stateful adapter example.
//!
//! Holds one mutable JSON document across calls, the way a browser-automation
//! or database-session adapter holds an open handle. The session is owned
//! exclusively by this one backend instance; the dispatch layer guarantees no
//! cross-call ordering, so callers whose correctness depends on ordering must
//! issue their calls sequentially.

use std::sync::Arc;

use anyhow::{Context, bail};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

use crate::dispatch::{Arguments, Capability, FieldSpec, Schema, ToolDescriptor};

/// In-memory session state: named JSON entries, mutated across calls.
#[derive(Default)]
pub struct ScratchBackend {
    entries: Mutex<Map<String, Value>>,
}

impl ScratchBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    async fn set(&self, key: &str, value: Value) -> Value {
        let mut entries = self.entries.lock().await;
        let replaced = entries.insert(key.to_string(), value).is_some();
        if replaced {
            json!(format!("replaced entry `{key}`"))
        } else {
            json!(format!("stored entry `{key}`"))
        }
    }

    async fn get(&self, key: &str) -> anyhow::Result<Value> {
        let entries = self.entries.lock().await;
        match entries.get(key) {
            Some(value) => Ok(value.clone()),
            None => bail!("no entry for key `{key}`"),
        }
    }

    async fn delete(&self, key: &str) -> anyhow::Result<Value> {
        let mut entries = self.entries.lock().await;
        match entries.remove(key) {
            Some(_) => Ok(json!(format!("deleted entry `{key}`"))),
            None => bail!("no entry for key `{key}`"),
        }
    }

    async fn list(&self) -> Value {
        let entries = self.entries.lock().await;
        Value::Array(entries.keys().map(|k| json!(k)).collect())
    }
}

fn key_arg(args: &Arguments) -> anyhow::Result<&str> {
    args.get("key")
        .and_then(|v| v.as_str())
        .context("missing `key` argument")
}

// ============================================================================
// Tools
// ============================================================================

/// Store a JSON object under a key in the session.
pub struct ScratchSetTool {
    session: Arc<ScratchBackend>,
}

impl ScratchSetTool {
    pub const NAME: &'static str = "scratch_set";

    pub const DESCRIPTION: &'static str =
        "Store a JSON object under a key in the scratch session. Replaces any existing entry.";

    pub fn new(session: Arc<ScratchBackend>) -> Self {
        Self { session }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::new()
                .required("key", FieldSpec::string().describe("Entry name"))
                .required(
                    "value",
                    FieldSpec::object(Schema::new()).describe("JSON object to store"),
                ),
        )
    }
}

#[async_trait::async_trait]
impl Capability for ScratchSetTool {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        let key = key_arg(&args)?;
        let value = args.get("value").cloned().context("missing `value` argument")?;
        Ok(self.session.set(key, value).await)
    }
}

/// Read an entry back from the session.
pub struct ScratchGetTool {
    session: Arc<ScratchBackend>,
}

impl ScratchGetTool {
    pub const NAME: &'static str = "scratch_get";

    pub const DESCRIPTION: &'static str = "Read a previously stored entry from the scratch session.";

    pub fn new(session: Arc<ScratchBackend>) -> Self {
        Self { session }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::new().required("key", FieldSpec::string().describe("Entry name")),
        )
    }
}

#[async_trait::async_trait]
impl Capability for ScratchGetTool {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        self.session.get(key_arg(&args)?).await
    }
}

/// Remove an entry from the session.
pub struct ScratchDeleteTool {
    session: Arc<ScratchBackend>,
}

impl ScratchDeleteTool {
    pub const NAME: &'static str = "scratch_delete";

    pub const DESCRIPTION: &'static str = "Delete an entry from the scratch session.";

    pub fn new(session: Arc<ScratchBackend>) -> Self {
        Self { session }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::new().required("key", FieldSpec::string().describe("Entry name")),
        )
    }
}

#[async_trait::async_trait]
impl Capability for ScratchDeleteTool {
    async fn invoke(&self, args: Arguments) -> anyhow::Result<Value> {
        self.session.delete(key_arg(&args)?).await
    }
}

/// List the keys currently held in the session.
pub struct ScratchListTool {
    session: Arc<ScratchBackend>,
}

impl ScratchListTool {
    pub const NAME: &'static str = "scratch_list";

    pub const DESCRIPTION: &'static str = "List the keys currently stored in the scratch session.";

    pub fn new(session: Arc<ScratchBackend>) -> Self {
        Self { session }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION, Schema::new())
    }
}

#[async_trait::async_trait]
impl Capability for ScratchListTool {
    async fn invoke(&self, _args: Arguments) -> anyhow::Result<Value> {
        Ok(self.session.list().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_survives_across_calls() {
        let session = ScratchBackend::new();
        let set = ScratchSetTool::new(session.clone());
        let get = ScratchGetTool::new(session.clone());

        let mut args = Arguments::new();
        args.insert("key".to_string(), json!("profile"));
        args.insert("value".to_string(), json!({ "name": "ada" }));
        let confirmation = set.invoke(args).await.unwrap();
        assert_eq!(confirmation, json!("stored entry `profile`"));

        let mut args = Arguments::new();
        args.insert("key".to_string(), json!("profile"));
        let value = get.invoke(args).await.unwrap();
        assert_eq!(value, json!({ "name": "ada" }));
    }

    #[tokio::test]
    async fn test_replace_and_delete() {
        let session = ScratchBackend::new();

        assert_eq!(
            session.set("k", json!({ "v": 1 })).await,
            json!("stored entry `k`")
        );
        assert_eq!(
            session.set("k", json!({ "v": 2 })).await,
            json!("replaced entry `k`")
        );
        assert_eq!(session.delete("k").await.unwrap(), json!("deleted entry `k`"));
        assert!(session.delete("k").await.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_key_fails() {
        let session = ScratchBackend::new();
        let err = session.get("absent").await.unwrap_err();
        assert!(err.to_string().contains("absent"));
    }

    #[tokio::test]
    async fn test_list_keys() {
        let session = ScratchBackend::new();
        session.set("b", json!({})).await;
        session.set("a", json!({})).await;

        let list = ScratchListTool::new(session);
        let keys = list.invoke(Arguments::new()).await.unwrap();
        assert_eq!(keys, json!(["a", "b"]));
    }
}
