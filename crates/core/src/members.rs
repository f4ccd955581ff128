//! Normalizers for the member kinds found inside a class.
//!
//! Each normalizer is total. A node without a usable `name` becomes a
//! placeholder (`{}` for callables, accessors and parameters, `false` for
//! variables and properties) and the caller appends it like any record.

use serde_json::{Map, Value};

use crate::input::DeclarationNode;
use crate::model::{
    AccessorSignature, Normalized, NormalizedAccessor, NormalizedMethod, NormalizedProperty,
    NormalizedVariable, Parameter, Placeholder, Signature, SourceLocation,
};
use crate::types::type_string;

/// Flag removed from every flag map.
const EXPORTED_FLAG: &str = "isExported";

/// Type name used for parameters that declare no type at all.
const UNTYPED_PARAM: &str = "any?";

/// The node's name, unless it is missing or empty.
fn member_name(node: DeclarationNode<'_>) -> Option<String> {
    node.name().filter(|n| !n.is_empty()).map(str::to_string)
}

/// Comment text: `shortText` when non-empty, else `text`, else `""`.
pub fn comment_text(node: DeclarationNode<'_>) -> String {
    let Some(comment) = node.comment() else {
        return String::new();
    };
    comment
        .get("shortText")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| comment.get("text").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Source triples. Entries that are not objects are skipped.
pub fn source_locations(node: DeclarationNode<'_>) -> Vec<SourceLocation> {
    node.sources()
        .iter()
        .filter_map(Value::as_object)
        .map(|source| {
            SourceLocation(
                source
                    .get("fileName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                source.get("line").and_then(Value::as_u64).unwrap_or(0),
                source.get("character").and_then(Value::as_u64).unwrap_or(0),
            )
        })
        .collect()
}

/// Declaration flags minus `isExported`, in input order.
pub fn public_flags(node: DeclarationNode<'_>) -> Map<String, Value> {
    let mut flags = node.flags().cloned().unwrap_or_default();
    flags.shift_remove(EXPORTED_FLAG);
    flags
}

/// Normalize a method or constructor.
pub fn normalize_method(node: DeclarationNode<'_>) -> Normalized<NormalizedMethod> {
    let Some(name) = member_name(node) else {
        return Normalized::Placeholder(Placeholder::EmptyObject);
    };
    Normalized::Record(NormalizedMethod {
        name,
        source: source_locations(node),
        id: node.id(),
        flags: public_flags(node),
        overrides: node.overwrites().map(str::to_string),
        inherits: node.inherited_from().map(str::to_string),
        signatures: node.signatures().map(normalize_signature).collect(),
    })
}

fn normalize_signature(node: DeclarationNode<'_>) -> Signature {
    Signature {
        comment: comment_text(node),
        returns: node.type_node().map(type_string).unwrap_or_default(),
        parameters: node.parameters().map(normalize_parameter).collect(),
    }
}

/// Normalize a signature parameter.
pub fn normalize_parameter(node: DeclarationNode<'_>) -> Normalized<Parameter> {
    let Some(name) = member_name(node) else {
        return Normalized::Placeholder(Placeholder::EmptyObject);
    };
    let ty = node
        .type_node()
        .map_or_else(|| UNTYPED_PARAM.to_string(), type_string);
    Normalized::Record(Parameter {
        name,
        comment: comment_text(node),
        ty,
        default: node.default_value().cloned(),
    })
}

/// Normalize a getter/setter pair.
pub fn normalize_accessor(node: DeclarationNode<'_>) -> Normalized<NormalizedAccessor> {
    let Some(name) = member_name(node) else {
        return Normalized::Placeholder(Placeholder::EmptyObject);
    };
    Normalized::Record(NormalizedAccessor {
        name,
        source: source_locations(node),
        id: node.id(),
        flags: public_flags(node),
        overrides: node.overwrites().map(str::to_string),
        inherits: node.inherited_from().map(str::to_string),
        comment: comment_text(node),
        getter: node
            .get_signatures()
            .first()
            .and_then(|sig| accessor_signature(*sig)),
        setter: node
            .set_signatures()
            .first()
            .and_then(|sig| accessor_signature(*sig)),
    })
}

fn accessor_signature(node: DeclarationNode<'_>) -> Option<AccessorSignature> {
    if node.is_empty() {
        return None;
    }
    let ty = node
        .type_node()
        .and_then(|t| t.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(AccessorSignature {
        ty,
        parameters: node.parameters().next().map(normalize_parameter),
    })
}

/// Normalize a variable member.
pub fn normalize_variable(node: DeclarationNode<'_>) -> Normalized<NormalizedVariable> {
    normalize_field(node)
}

/// Normalize a property member.
pub fn normalize_property(node: DeclarationNode<'_>) -> Normalized<NormalizedProperty> {
    normalize_field(node)
}

/// The `type` string comes from the member's declared `type` node, never from
/// the member itself (which would render its own name).
fn normalize_field(node: DeclarationNode<'_>) -> Normalized<NormalizedVariable> {
    let Some(name) = member_name(node) else {
        return Normalized::Placeholder(Placeholder::False);
    };
    Normalized::Record(NormalizedVariable {
        name,
        source: source_locations(node),
        id: node.id(),
        flags: public_flags(node),
        ty: node.type_node().map(type_string).unwrap_or_default(),
        overrides: node.overwrites().map(str::to_string),
        inherits: node.inherited_from().map(str::to_string),
        comment: comment_text(node),
    })
}
