//! Read-only view over the documentation extractor's JSON output.
//!
//! The extractor schema is third-party and only loosely followed by real
//! documents, so declarations are not deserialized into fixed structs. Each
//! node is a [`DeclarationNode`] borrowing its JSON object and exposing lenient
//! accessors: a missing field and a field of the wrong JSON type look the same
//! to callers.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::DocsError;

/// A whole extractor document with a top-level `children` array.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse an extractor document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DocsError> {
        let root: Value = serde_json::from_str(json).map_err(DocsError::Parse)?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value(root: Value) -> Result<Self, DocsError> {
        if !root.get("children").is_some_and(Value::is_array) {
            return Err(DocsError::MissingChildren);
        }
        Ok(Self { root })
    }

    /// Read and parse an extractor document from disk.
    pub fn read(path: &Path) -> Result<Self, DocsError> {
        let contents = fs::read_to_string(path).map_err(|source| DocsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Top-level candidate modules, in document order.
    pub fn modules(&self) -> impl Iterator<Item = DeclarationNode<'_>> {
        DeclarationNode::new(&self.root).children()
    }
}

/// Borrowed view over one declaration object of the extractor output.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationNode<'a> {
    value: &'a Value,
}

impl<'a> DeclarationNode<'a> {
    /// View `value` as a declaration. Non-object values yield empty accessors.
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn field(self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    fn str_field(self, key: &str) -> Option<&'a str> {
        self.field(key).and_then(Value::as_str)
    }

    fn list(self, key: &str) -> &'a [Value] {
        self.field(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// The declaration's `name`, when it is a string.
    pub fn name(self) -> Option<&'a str> {
        self.str_field("name")
    }

    /// The declaration's `kindString` (Module, Class, Method, ...).
    pub fn kind(self) -> Option<&'a str> {
        self.str_field("kindString")
    }

    /// The numeric reflection id.
    pub fn id(self) -> Option<i64> {
        self.field("id").and_then(Value::as_i64)
    }

    /// Nested declarations, in document order.
    pub fn children(self) -> impl Iterator<Item = DeclarationNode<'a>> {
        self.list("children").iter().map(DeclarationNode::new)
    }

    /// The `comment` object, if present.
    pub fn comment(self) -> Option<&'a Map<String, Value>> {
        self.field("comment").and_then(Value::as_object)
    }

    /// The raw `sources` entries.
    pub fn sources(self) -> &'a [Value] {
        self.list("sources")
    }

    /// The `flags` object, if present.
    pub fn flags(self) -> Option<&'a Map<String, Value>> {
        self.field("flags").and_then(Value::as_object)
    }

    /// Names of the `extendedTypes` entries (`""` for unnamed entries).
    pub fn extended_types(self) -> Vec<String> {
        named_entries(self.list("extendedTypes"))
    }

    /// Names of the `implementedTypes` entries (`""` for unnamed entries).
    pub fn implemented_types(self) -> Vec<String> {
        named_entries(self.list("implementedTypes"))
    }

    /// Name of the member this declaration overrides.
    pub fn overwrites(self) -> Option<&'a str> {
        self.field("overwrites")
            .and_then(|o| o.get("name"))
            .and_then(Value::as_str)
    }

    /// Name of the member this declaration is inherited from.
    pub fn inherited_from(self) -> Option<&'a str> {
        self.field("inheritedFrom")
            .and_then(|o| o.get("name"))
            .and_then(Value::as_str)
    }

    /// Call signatures of a method or constructor.
    pub fn signatures(self) -> impl Iterator<Item = DeclarationNode<'a>> {
        self.list("signatures").iter().map(DeclarationNode::new)
    }

    /// Getter signatures of an accessor.
    pub fn get_signatures(self) -> Vec<DeclarationNode<'a>> {
        self.accessor_signatures("getSignature")
    }

    /// Setter signatures of an accessor.
    pub fn set_signatures(self) -> Vec<DeclarationNode<'a>> {
        self.accessor_signatures("setSignature")
    }

    // Older extractor versions emit a list of signatures, newer ones a single object.
    fn accessor_signatures(self, key: &str) -> Vec<DeclarationNode<'a>> {
        match self.field(key) {
            Some(Value::Array(items)) => items.iter().map(DeclarationNode::new).collect(),
            Some(single @ Value::Object(_)) => vec![DeclarationNode::new(single)],
            _ => Vec::new(),
        }
    }

    /// The `type` descriptor, whatever its JSON shape.
    pub fn type_node(self) -> Option<&'a Value> {
        self.field("type")
    }

    /// Parameters of a signature.
    pub fn parameters(self) -> impl Iterator<Item = DeclarationNode<'a>> {
        self.list("parameters").iter().map(DeclarationNode::new)
    }

    /// The parameter's `defaultValue`, if any.
    pub fn default_value(self) -> Option<&'a Value> {
        self.field("defaultValue")
    }

    /// Whether the underlying value is an empty object (or not an object at all).
    pub fn is_empty(self) -> bool {
        self.value.as_object().is_none_or(Map::is_empty)
    }
}

fn named_entries(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_requires_children() {
        assert!(matches!(
            Document::from_json(r#"{"name": "root"}"#),
            Err(DocsError::MissingChildren)
        ));
        assert!(matches!(
            Document::from_json(r#"{"children": {}}"#),
            Err(DocsError::MissingChildren)
        ));
        assert!(matches!(
            Document::from_json("not json"),
            Err(DocsError::Parse(_))
        ));
    }

    #[test]
    fn test_modules_preserve_order() {
        let doc =
            Document::from_json(r#"{"children": [{"name": "b"}, {"name": "a"}, {"name": "c"}]}"#)
                .unwrap();
        let names: Vec<_> = doc.modules().filter_map(DeclarationNode::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lenient_accessors_on_wrong_types() {
        let value = json!({
            "name": 42,
            "kindString": "Class",
            "children": "nope",
            "sources": {"fileName": "x.ts"},
            "flags": [true],
            "comment": "text",
        });
        let node = DeclarationNode::new(&value);
        assert_eq!(node.name(), None);
        assert_eq!(node.kind(), Some("Class"));
        assert_eq!(node.children().count(), 0);
        assert!(node.sources().is_empty());
        assert!(node.flags().is_none());
        assert!(node.comment().is_none());
    }

    #[test]
    fn test_heritage_names() {
        let value = json!({
            "extendedTypes": [{"name": "Base"}, {"type": "reference"}],
            "implementedTypes": [{"name": "Shape"}],
            "overwrites": {"name": "Base.area"},
            "inheritedFrom": {"id": 4},
        });
        let node = DeclarationNode::new(&value);
        assert_eq!(node.extended_types(), vec!["Base", ""]);
        assert_eq!(node.implemented_types(), vec!["Shape"]);
        assert_eq!(node.overwrites(), Some("Base.area"));
        assert_eq!(node.inherited_from(), None);
    }

    #[test]
    fn test_accessor_signatures_list_or_object() {
        let listed = json!({"getSignature": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(DeclarationNode::new(&listed).get_signatures().len(), 2);

        let single = json!({"setSignature": {"name": "a"}});
        let setters = DeclarationNode::new(&single).set_signatures();
        assert_eq!(setters.len(), 1);
        assert_eq!(setters[0].name(), Some("a"));

        assert!(DeclarationNode::new(&single).get_signatures().is_empty());
    }
}
