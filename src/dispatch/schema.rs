//! Declarative input shapes for tools.
//!
//! Tool schemas here are runtime data rather than derived Rust types: a
//! catalog entry declares the fields it accepts, which of them are required,
//! and any defaults, and the same declaration drives both validation and the
//! JSON-schema form advertised to MCP clients.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value, json};

/// The expected shape of a tool's argument bag.
///
/// Field order is deterministic (sorted by name), so the advertised schema is
/// byte-stable across calls.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldSpec>,
    required: BTreeSet<String>,
}

/// Declaration of a single field: its kind, optional description shown to
/// clients, and an optional default filled in when the field is absent.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    kind: FieldKind,
    description: Option<String>,
    default: Option<Value>,
}

/// The accepted value kinds for a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enum(Vec<String>),
    /// An array whose elements all match the given spec.
    Array(Box<FieldSpec>),
    /// A nested object with its own schema.
    Object(Schema),
}

impl Schema {
    /// Create an empty schema (a tool that takes no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn required(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.fields.insert(name, spec);
        self
    }

    /// Declare an optional field.
    pub fn optional(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// All declared fields, in stable (sorted) order.
    pub fn fields(&self) -> &BTreeMap<String, FieldSpec> {
        &self.fields
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Whether the named field is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Serialize to the MCP wire form:
    /// `{"type": "object", "properties": {...}, "required": [...]}`.
    pub fn to_input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for (name, spec) in &self.fields {
            properties.insert(name.clone(), spec.to_property());
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert(
            "required".to_string(),
            Value::Array(self.required.iter().map(|r| json!(r)).collect()),
        );
        schema
    }
}

impl FieldSpec {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
        }
    }

    /// A free-form string field.
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    /// A numeric field (integer or float).
    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    /// A boolean field.
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    /// A string field restricted to the given values.
    pub fn enumeration(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::new(FieldKind::Enum(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// An array field whose elements match `item`.
    pub fn array(item: FieldSpec) -> Self {
        Self::new(FieldKind::Array(Box::new(item)))
    }

    /// A nested object field with its own schema.
    pub fn object(schema: Schema) -> Self {
        Self::new(FieldKind::Object(schema))
    }

    /// Attach a human-readable description shown to clients.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a default applied when the field is absent and not required.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Human-readable name of the expected kind, used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum string",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }

    fn to_property(&self) -> Value {
        let mut prop = Map::new();
        match &self.kind {
            FieldKind::String => {
                prop.insert("type".to_string(), json!("string"));
            }
            FieldKind::Number => {
                prop.insert("type".to_string(), json!("number"));
            }
            FieldKind::Boolean => {
                prop.insert("type".to_string(), json!("boolean"));
            }
            FieldKind::Enum(values) => {
                prop.insert("type".to_string(), json!("string"));
                prop.insert("enum".to_string(), json!(values));
            }
            FieldKind::Array(item) => {
                prop.insert("type".to_string(), json!("array"));
                prop.insert("items".to_string(), item.to_property());
            }
            FieldKind::Object(schema) => {
                let mut nested = schema.to_input_schema();
                if let Some(desc) = &self.description {
                    nested.insert("description".to_string(), json!(desc));
                }
                return Value::Object(nested);
            }
        }
        if let Some(desc) = &self.description {
            prop.insert("description".to_string(), json!(desc));
        }
        if let Some(default) = &self.default {
            prop.insert("default".to_string(), default.clone());
        }
        Value::Object(prop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_schema_shape() {
        let schema = Schema::new()
            .required("path", FieldSpec::string().describe("Request path"))
            .optional("limit", FieldSpec::number().with_default(10));

        let wire = schema.to_input_schema();
        assert_eq!(wire["type"], json!("object"));
        assert_eq!(wire["required"], json!(["path"]));
        assert_eq!(wire["properties"]["path"]["type"], json!("string"));
        assert_eq!(
            wire["properties"]["path"]["description"],
            json!("Request path")
        );
        assert_eq!(wire["properties"]["limit"]["default"], json!(10));
    }

    #[test]
    fn test_enum_and_array_properties() {
        let schema = Schema::new()
            .required("method", FieldSpec::enumeration(["GET", "POST"]))
            .optional("tags", FieldSpec::array(FieldSpec::string()));

        let wire = schema.to_input_schema();
        assert_eq!(wire["properties"]["method"]["enum"], json!(["GET", "POST"]));
        assert_eq!(wire["properties"]["tags"]["type"], json!("array"));
        assert_eq!(wire["properties"]["tags"]["items"]["type"], json!("string"));
    }

    #[test]
    fn test_nested_object_property() {
        let inner = Schema::new().required("key", FieldSpec::string());
        let schema = Schema::new().optional("options", FieldSpec::object(inner));

        let wire = schema.to_input_schema();
        assert_eq!(wire["properties"]["options"]["type"], json!("object"));
        assert_eq!(wire["properties"]["options"]["required"], json!(["key"]));
    }

    #[test]
    fn test_field_order_is_stable() {
        let schema = Schema::new()
            .required("zebra", FieldSpec::string())
            .required("apple", FieldSpec::string());

        let names: Vec<_> = schema.fields().keys().cloned().collect();
        assert_eq!(names, vec!["apple", "zebra"]);
        assert_eq!(schema.to_input_schema(), schema.to_input_schema());
    }
}
