//! Type-descriptor serialization.
//!
//! The extractor does not tag type descriptors with a reliable discriminant;
//! the kind of a node is given by which fields it carries. Classification
//! therefore probes fields in a fixed priority order, and some nodes match
//! several shapes (a named array wrapper is `Named`, not `Wrapped`):
//!
//! 1. `name` -> [`TypeShape::Named`]
//! 2. `types` -> [`TypeShape::Union`]
//! 3. `elements` -> [`TypeShape::Tuple`]
//! 4. `elementType` -> [`TypeShape::Wrapped`]
//! 5. `declaration` -> [`TypeShape::FunctionDecl`]
//! 6. anything else -> [`TypeShape::Passthrough`] into the nested `type`
//!
//! Serialization is total. A node that cannot be classified renders as the
//! empty string, and since every recursive step classifies independently, a
//! malformed member only empties its own slot of the enclosing union or tuple.

use serde_json::Value;

/// Parameter names dropped from inline function types.
const HIDDEN_PARAMS: [&str; 2] = ["this", "Z"];

/// Why a type descriptor could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The descriptor is not a JSON object.
    #[error("type descriptor is not an object")]
    NotAnObject,
    /// `name` is present but is not a string.
    #[error("type name is not a string")]
    NameNotString,
    /// `types` or `elements` is present but is not an array.
    #[error("`{0}` is not an array")]
    MembersNotArray(&'static str),
    /// `declaration` has no first signature.
    #[error("function declaration has no signature")]
    MissingSignature,
    /// The first signature has no `parameters` array.
    #[error("function signature has no parameter list")]
    MissingParameters,
    /// A signature parameter is not an object.
    #[error("function parameter is not an object")]
    ParameterNotObject,
}

/// A classified type descriptor.
#[derive(Debug, Clone, Copy)]
pub enum TypeShape<'a> {
    /// Leaf type name: `number`, `Promise`, `T`.
    Named(&'a str),
    /// Union members, joined with `" | "`.
    Union(&'a [Value]),
    /// Tuple elements, joined with `","`.
    Tuple(&'a [Value]),
    /// Array or other wrapper around a single element type.
    Wrapped {
        /// Suffix appended for this wrapper level (`"[]"` for arrays).
        marker: &'a str,
        /// The wrapped element type.
        element: &'a Value,
    },
    /// Inline function type taken from the declaration's first signature.
    FunctionDecl {
        /// The declaration's display name (`""` when absent).
        name: &'a str,
        /// The first signature's parameters.
        parameters: &'a [Value],
    },
    /// No recognized field; defer to the nested `type`, if any.
    Passthrough(Option<&'a Value>),
}

impl<'a> TypeShape<'a> {
    /// Classify `node` by field presence, in priority order.
    pub fn classify(node: &'a Value) -> Result<Self, ShapeError> {
        let obj = node.as_object().ok_or(ShapeError::NotAnObject)?;

        if let Some(name) = obj.get("name") {
            return name.as_str().map(Self::Named).ok_or(ShapeError::NameNotString);
        }
        if let Some(types) = obj.get("types") {
            return members(types, "types").map(Self::Union);
        }
        if let Some(elements) = obj.get("elements") {
            return members(elements, "elements").map(Self::Tuple);
        }
        if let Some(element) = obj.get("elementType") {
            let marker = match obj.get("type").and_then(Value::as_str) {
                Some("array") => "[]",
                Some(other) => other,
                None => "",
            };
            return Ok(Self::Wrapped { marker, element });
        }
        if let Some(declaration) = obj.get("declaration") {
            let signature = declaration
                .get("signatures")
                .and_then(|s| s.get(0))
                .ok_or(ShapeError::MissingSignature)?;
            let parameters = signature
                .get("parameters")
                .and_then(Value::as_array)
                .ok_or(ShapeError::MissingParameters)?;
            let name = declaration
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Ok(Self::FunctionDecl { name, parameters });
        }
        Ok(Self::Passthrough(obj.get("type")))
    }

    /// Render this shape, threading `prefix`/`suffix` into the leaves.
    pub fn render(self, prefix: &str, suffix: &str) -> Result<String, ShapeError> {
        match self {
            Self::Named(name) => Ok(format!("{prefix}{name}{suffix}")),
            Self::Union(types) => Ok(join_members(types, prefix, suffix, " | ")),
            Self::Tuple(elements) => Ok(join_members(elements, prefix, suffix, ",")),
            Self::Wrapped { marker, element } => {
                Ok(serialize_type(element, prefix, &format!("{suffix}{marker}")))
            }
            Self::FunctionDecl { name, parameters } => {
                let mut rendered = Vec::new();
                for param in parameters {
                    let obj = param.as_object().ok_or(ShapeError::ParameterNotObject)?;
                    let param_name = obj.get("name").and_then(Value::as_str).unwrap_or_default();
                    if HIDDEN_PARAMS.contains(&param_name) {
                        continue;
                    }
                    let text = obj.get("type").map_or_else(String::new, |param_type| {
                        serialize_type(param_type, &format!("{prefix}{param_name}:"), "")
                    });
                    if !text.is_empty() {
                        rendered.push(text);
                    }
                }
                let marker = if rendered.is_empty() { "" } else { "Fn" };
                Ok(format!("{name} {marker}({})", rendered.join(", ")))
            }
            Self::Passthrough(Some(inner)) => Ok(serialize_type(inner, prefix, suffix)),
            Self::Passthrough(None) => Ok(String::new()),
        }
    }
}

fn members<'a>(value: &'a Value, field: &'static str) -> Result<&'a [Value], ShapeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ShapeError::MembersNotArray(field))
}

fn join_members(nodes: &[Value], prefix: &str, suffix: &str, sep: &str) -> String {
    nodes
        .iter()
        .map(|node| serialize_type(node, prefix, suffix))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Serialize a type descriptor to its canonical display string.
///
/// Never fails: any descriptor that cannot be classified or rendered yields
/// `""` for its own subtree.
pub fn serialize_type(node: &Value, prefix: &str, suffix: &str) -> String {
    match TypeShape::classify(node).and_then(|shape| shape.render(prefix, suffix)) {
        Ok(text) => text,
        Err(err) => {
            tracing::trace!(%err, "Unrenderable type descriptor, using empty string.");
            String::new()
        }
    }
}

/// Serialize a type descriptor with no prefix or suffix.
pub fn type_string(node: &Value) -> String {
    serialize_type(node, "", "")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_with_prefix_and_suffix() {
        let node = json!({"type": "intrinsic", "name": "number"});
        assert_eq!(type_string(&node), "number");
        assert_eq!(serialize_type(&node, "x:", "[]"), "x:number[]");
    }

    #[test]
    fn test_name_wins_over_other_shapes() {
        let node = json!({
            "name": "Items",
            "type": "array",
            "elementType": {"name": "string"},
            "types": [{"name": "A"}],
        });
        assert!(matches!(
            TypeShape::classify(&node),
            Ok(TypeShape::Named("Items"))
        ));
        assert_eq!(type_string(&node), "Items");
    }

    #[test]
    fn test_union() {
        let node = json!({"type": "union", "types": [{"name": "A"}, {"name": "B"}]});
        assert_eq!(type_string(&node), "A | B");
        assert_eq!(serialize_type(&node, "p:", "?"), "p:A? | p:B?");
    }

    #[test]
    fn test_tuple() {
        let node = json!({"elements": [{"name": "A"}, {"name": "B"}]});
        assert_eq!(type_string(&node), "A,B");
    }

    #[test]
    fn test_array_wrapping() {
        let node = json!({"type": "array", "elementType": {"name": "string"}});
        assert_eq!(type_string(&node), "string[]");

        let nested = json!({
            "type": "array",
            "elementType": {"type": "array", "elementType": {"name": "number"}},
        });
        assert_eq!(type_string(&nested), "number[][]");
    }

    #[test]
    fn test_array_of_union_distributes_suffix() {
        let node = json!({
            "type": "array",
            "elementType": {"types": [{"name": "A"}, {"name": "B"}]},
        });
        assert_eq!(type_string(&node), "A[] | B[]");
    }

    #[test]
    fn test_non_array_wrapper_uses_raw_marker() {
        let node = json!({"type": "readonly", "elementType": {"name": "T"}});
        assert_eq!(type_string(&node), "Treadonly");

        let unmarked = json!({"elementType": {"name": "T"}});
        assert_eq!(type_string(&unmarked), "T");

        let odd = json!({"type": {"name": "X"}, "elementType": {"name": "T"}});
        assert_eq!(type_string(&odd), "T");
    }

    #[test]
    fn test_function_type_with_parameters() {
        let node = json!({
            "type": "reflection",
            "declaration": {
                "name": "Fn1",
                "signatures": [{
                    "parameters": [
                        {"name": "x", "type": {"name": "number"}},
                        {"name": "y", "type": {"name": "string"}},
                    ],
                }],
            },
        });
        assert_eq!(type_string(&node), "Fn1 Fn(x:number, y:string)");
    }

    #[test]
    fn test_function_type_hides_this_and_z() {
        let node = json!({
            "declaration": {
                "name": "Fn1",
                "signatures": [{
                    "parameters": [
                        {"name": "this", "type": {"name": "Window"}},
                        {"name": "Z", "type": {"name": "number"}},
                    ],
                }],
            },
        });
        assert_eq!(type_string(&node), "Fn1 ()");
    }

    #[test]
    fn test_function_type_prefix_flows_into_params() {
        let node = json!({
            "declaration": {
                "signatures": [{"parameters": [{"name": "cb", "type": {"name": "T"}}]}],
            },
        });
        assert_eq!(serialize_type(&node, "fn:", "[]"), " Fn(fn:cb:T)");
    }

    #[test]
    fn test_function_type_drops_empty_param_types() {
        let node = json!({
            "declaration": {
                "name": "f",
                "signatures": [{"parameters": [{"name": "a"}, {"name": "b", "type": {"name": "B"}}]}],
            },
        });
        assert_eq!(type_string(&node), "f Fn(b:B)");
    }

    #[test]
    fn test_function_type_without_parameter_list_is_empty() {
        let node = json!({"declaration": {"name": "f", "signatures": [{"type": {"name": "void"}}]}});
        assert!(matches!(
            TypeShape::classify(&node),
            Err(ShapeError::MissingParameters)
        ));
        assert_eq!(type_string(&node), "");

        let no_sigs = json!({"declaration": {"name": "f", "children": []}});
        assert_eq!(type_string(&no_sigs), "");
    }

    #[test]
    fn test_function_type_bad_parameter_empties_whole_node() {
        let node = json!({
            "declaration": {
                "name": "f",
                "signatures": [{"parameters": [{"name": "a", "type": {"name": "A"}}, 7]}],
            },
        });
        assert_eq!(type_string(&node), "");
    }

    #[test]
    fn test_passthrough_into_nested_type() {
        let node = json!({"type": {"name": "Inner"}});
        assert_eq!(serialize_type(&node, "<", ">"), "<Inner>");

        let literal = json!({"type": "stringLiteral", "value": "on"});
        assert_eq!(type_string(&literal), "");

        assert_eq!(type_string(&json!({})), "");
    }

    #[test]
    fn test_malformed_nodes_are_empty() {
        assert_eq!(type_string(&json!(null)), "");
        assert_eq!(type_string(&json!("number")), "");
        assert_eq!(type_string(&json!([{"name": "A"}])), "");
        assert_eq!(type_string(&json!({"name": 3})), "");
        assert_eq!(type_string(&json!({"types": "A|B"})), "");
    }

    #[test]
    fn test_malformed_member_only_empties_its_slot() {
        let tuple = json!({"elements": [{"name": "A"}, 5, {"name": "C"}]});
        assert_eq!(type_string(&tuple), "A,,C");

        let union = json!({"types": [{"name": "A"}, "oops"]});
        assert_eq!(type_string(&union), "A | ");
    }
}
