//! Tool catalog - the static, ordered list of tools a server exposes.
//!
//! The catalog is built once at startup from static data and never mutated.
//! It is the single source of truth for tool metadata: both `tools/list`
//! responses and dispatch routing read from it.

use std::collections::HashMap;

use super::error::DuplicateToolError;
use super::schema::Schema;

/// Metadata for one tool: its unique name, a human description, and the
/// declared input shape.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input: Schema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input: Schema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input,
        }
    }
}

/// Immutable, ordered collection of tool descriptors.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    /// Build a catalog from descriptors, preserving their order.
    ///
    /// Fails if two descriptors share a name; the process must not start
    /// with an ambiguous catalog.
    pub fn new(descriptors: Vec<ToolDescriptor>) -> Result<Self, DuplicateToolError> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.name.clone(), position).is_some() {
                return Err(DuplicateToolError(descriptor.name.clone()));
            }
        }
        Ok(Self {
            tools: descriptors,
            index,
        })
    }

    /// All descriptors in registration order. Same result every call.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Look up a descriptor by name.
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::schema::FieldSpec;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            "test tool",
            Schema::new().required("msg", FieldSpec::string()),
        )
    }

    #[test]
    fn test_duplicate_name_fails_construction() {
        let result = ToolCatalog::new(vec![descriptor("echo"), descriptor("echo")]);
        let err = result.err().expect("duplicate must be rejected");
        assert_eq!(err.to_string(), "duplicate tool name: echo");
    }

    #[test]
    fn test_find_and_order() {
        let catalog =
            ToolCatalog::new(vec![descriptor("beta"), descriptor("alpha")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("alpha").is_some());
        assert!(catalog.find("missing").is_none());

        // Registration order is preserved, not sorted.
        let names: Vec<_> = catalog.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_list_is_idempotent() {
        let catalog =
            ToolCatalog::new(vec![descriptor("a"), descriptor("b"), descriptor("c")]).unwrap();
        let first: Vec<_> = catalog.list().iter().map(|t| t.name.clone()).collect();
        let second: Vec<_> = catalog.list().iter().map(|t| t.name.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ToolCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.list().is_empty());
    }
}
