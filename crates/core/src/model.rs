//! Normalized document model written out for the static site.
//!
//! Field names and value encodings follow the published per-class document
//! format: absent references and defaults are `false` rather than `null`, and
//! nameless members are written as `{}` or `false` placeholders.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// `[fileName, line, character]` location of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation(pub String, pub u64, pub u64);

/// Stand-in emitted for a member that has no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Written as `{}`.
    EmptyObject,
    /// Written as `false`.
    False,
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::EmptyObject => serializer.serialize_map(Some(0))?.end(),
            Self::False => serializer.serialize_bool(false),
        }
    }
}

/// A member record, or the placeholder left where a nameless member stood.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized<T> {
    /// A fully normalized record.
    Record(T),
    /// A nameless member.
    Placeholder(Placeholder),
}

impl<T> Normalized<T> {
    /// The record, if this is not a placeholder.
    pub const fn record(&self) -> Option<&T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Placeholder(_) => None,
        }
    }
}

fn or_false<T: Serialize, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// A kept top-level module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedModule {
    /// Module name with double quotes stripped.
    pub name: String,
    /// Declaration sites.
    pub source: Vec<SourceLocation>,
    /// Always `"Module"`.
    pub kind: &'static str,
    /// Reflection id.
    pub id: Option<i64>,
    /// Comment text.
    pub comment: String,
    /// Simple names of the module's kept classes, in input order.
    pub classes: Vec<String>,
}

/// A kept class or interface with its members bucketed by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedClass {
    /// Simple class name.
    pub name: String,
    /// Declaration sites.
    pub source: Vec<SourceLocation>,
    /// `kindString` of the declaration (Class, Interface, ...).
    pub kind: String,
    /// Reflection id.
    pub id: Option<i64>,
    /// Comment text.
    pub comment: String,
    /// Zero or one constructor.
    pub constructor: Vec<Normalized<NormalizedMethod>>,
    /// Accessor members.
    pub accessors: Vec<Normalized<NormalizedAccessor>>,
    /// Method members.
    pub methods: Vec<Normalized<NormalizedMethod>>,
    /// Variable members.
    pub variables: Vec<Normalized<NormalizedVariable>>,
    /// Property members.
    pub properties: Vec<Normalized<NormalizedProperty>>,
    /// Declaration flags without `isExported`.
    pub flags: Map<String, Value>,
    /// Names of extended types.
    pub extends: Vec<String>,
    /// Names of implemented types.
    pub implements: Vec<String>,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMethod {
    /// Member name.
    pub name: String,
    /// Declaration sites.
    pub source: Vec<SourceLocation>,
    /// Reflection id.
    pub id: Option<i64>,
    /// Declaration flags without `isExported`.
    pub flags: Map<String, Value>,
    /// Name of the overridden member.
    #[serde(serialize_with = "or_false")]
    pub overrides: Option<String>,
    /// Name of the member this one is inherited from.
    #[serde(serialize_with = "or_false")]
    pub inherits: Option<String>,
    /// Call signatures.
    pub signatures: Vec<Signature>,
}

/// One call signature of a method or constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    /// Comment text attached to the signature.
    pub comment: String,
    /// Serialized return type.
    pub returns: String,
    /// Parameters in declaration order.
    pub parameters: Vec<Normalized<Parameter>>,
}

/// A signature parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Comment text.
    pub comment: String,
    /// Serialized type (`"any?"` when the parameter has no type).
    #[serde(rename = "type")]
    pub ty: String,
    /// Default value expression.
    #[serde(serialize_with = "or_false")]
    pub default: Option<Value>,
}

/// A getter/setter pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAccessor {
    /// Member name.
    pub name: String,
    /// Declaration sites.
    pub source: Vec<SourceLocation>,
    /// Reflection id.
    pub id: Option<i64>,
    /// Declaration flags without `isExported`.
    pub flags: Map<String, Value>,
    /// Name of the overridden member.
    #[serde(serialize_with = "or_false")]
    pub overrides: Option<String>,
    /// Name of the member this one is inherited from.
    #[serde(serialize_with = "or_false")]
    pub inherits: Option<String>,
    /// Comment text.
    pub comment: String,
    /// Getter, if declared.
    #[serde(serialize_with = "or_false")]
    pub getter: Option<AccessorSignature>,
    /// Setter, if declared.
    #[serde(serialize_with = "or_false")]
    pub setter: Option<AccessorSignature>,
}

/// Getter or setter descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessorSignature {
    /// Name of the accessor's type.
    #[serde(rename = "type")]
    pub ty: String,
    /// First parameter (setters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Normalized<Parameter>>,
}

/// A variable member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVariable {
    /// Member name.
    pub name: String,
    /// Declaration sites.
    pub source: Vec<SourceLocation>,
    /// Reflection id.
    pub id: Option<i64>,
    /// Declaration flags without `isExported`.
    pub flags: Map<String, Value>,
    /// Serialized type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Name of the overridden member.
    #[serde(serialize_with = "or_false")]
    pub overrides: Option<String>,
    /// Name of the member this one is inherited from.
    #[serde(serialize_with = "or_false")]
    pub inherits: Option<String>,
    /// Comment text.
    pub comment: String,
}

/// Properties share the variable record shape.
pub type NormalizedProperty = NormalizedVariable;

/// `(key, display name, kind)` row of the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry(pub String, pub String, pub String);
