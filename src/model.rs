//! Normalizing view over a parsed schema document.
//!
//! Raw `serde_json::Value` nodes are classified into a closed [`SchemaNode`]
//! variant here, so the walk never inspects untyped JSON directly. Keywords
//! present with the wrong JSON type are reported as
//! [`FlattenError::InvalidKeywordType`] at the path being visited.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::FlattenError;
use crate::types::{json_type_name, PropertyType};

/// Children of an object node, ordered lexicographically by field name.
pub type Children<'a> = BTreeMap<&'a str, &'a Value>;

/// Classified schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode<'a> {
    /// `"type": "object"` with its `properties`.
    Object(Children<'a>),
    /// `"type": "string" | "number" | "boolean"`; the raw node carries the bound keywords.
    Scalar(PropertyType, &'a Value),
    /// `$ref` pointer.
    Reference(&'a str),
    /// `allOf` branches in document order.
    Composition(&'a [Value]),
    /// Anything else. Skipped by the walk.
    Unknown,
}

/// Read-only query interface over one schema document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaModel<'a> {
    document: &'a Value,
}

impl<'a> SchemaModel<'a> {
    pub fn new(document: &'a Value) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a Value {
        self.document
    }

    /// Classify `node`, which sits at `path`.
    ///
    /// A `type` keyword decides the kind on its own: `object` must come with
    /// `properties`, unknown or non-string type values are `Unknown`. Without
    /// `type`, `allOf` is checked before `$ref`.
    pub fn type_of(&self, node: &'a Value, path: &str) -> Result<SchemaNode<'a>, FlattenError> {
        let Some(map) = node.as_object() else {
            return Ok(SchemaNode::Unknown);
        };

        if let Some(ty) = map.get("type") {
            return match ty.as_str() {
                Some("object") => self
                    .child_properties(node, path)?
                    .map(SchemaNode::Object)
                    .ok_or_else(|| FlattenError::SchemaStructure {
                        path: path.to_string(),
                        missing_keyword: "properties".to_string(),
                    }),
                Some(s) => Ok(PropertyType::parse(s)
                    .map(|t| SchemaNode::Scalar(t, node))
                    .unwrap_or(SchemaNode::Unknown)),
                None => Ok(SchemaNode::Unknown),
            };
        }

        if let Some(branches) = self.all_of_branches(node, path)? {
            return Ok(SchemaNode::Composition(branches));
        }

        if let Some(pointer) = self.ref_pointer(node, path)? {
            return Ok(SchemaNode::Reference(pointer));
        }

        Ok(SchemaNode::Unknown)
    }

    /// The node's `properties`, ordered by name. `None` when the keyword is absent.
    pub fn child_properties(
        &self,
        node: &'a Value,
        path: &str,
    ) -> Result<Option<Children<'a>>, FlattenError> {
        match node.get("properties") {
            None => Ok(None),
            Some(Value::Object(props)) => Ok(Some(
                props.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            )),
            Some(other) => Err(invalid_keyword(path, "properties", other)),
        }
    }

    /// Integer value of a bound keyword. Fractional values are rounded.
    ///
    /// A number outside the `i64` range is an `InvalidKeywordType` error.
    pub fn constraint_value(
        &self,
        node: &'a Value,
        keyword: &str,
        path: &str,
    ) -> Result<Option<i64>, FlattenError> {
        match node.get(keyword) {
            None => Ok(None),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i));
                }
                match n.as_f64().map(f64::round) {
                    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
                    Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(Some(f as i64)),
                    _ => Err(FlattenError::InvalidKeywordType {
                        path: path.to_string(),
                        keyword: keyword.to_string(),
                        actual: format!("out-of-range number {}", n),
                    }),
                }
            }
            Some(other) => Err(invalid_keyword(path, keyword, other)),
        }
    }

    /// Names listed in the node's `required` keyword, in document order.
    pub fn required_list(
        &self,
        node: &'a Value,
        path: &str,
    ) -> Result<Option<Vec<&'a str>>, FlattenError> {
        match node.get("required") {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| invalid_keyword(path, "required", item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(invalid_keyword(path, "required", other)),
        }
    }

    pub fn ref_pointer(
        &self,
        node: &'a Value,
        path: &str,
    ) -> Result<Option<&'a str>, FlattenError> {
        match node.get("$ref") {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(invalid_keyword(path, "$ref", other)),
        }
    }

    pub fn all_of_branches(
        &self,
        node: &'a Value,
        path: &str,
    ) -> Result<Option<&'a [Value]>, FlattenError> {
        match node.get("allOf") {
            None => Ok(None),
            Some(Value::Array(branches)) => Ok(Some(branches.as_slice())),
            Some(other) => Err(invalid_keyword(path, "allOf", other)),
        }
    }

    /// Top-level `definitions` table. Nested `definitions` are never consulted.
    pub fn definitions(&self) -> Result<Option<&'a Map<String, Value>>, FlattenError> {
        match self.document.get("definitions") {
            None => Ok(None),
            Some(Value::Object(defs)) => Ok(Some(defs)),
            Some(other) => Err(invalid_keyword("#/definitions", "definitions", other)),
        }
    }
}

fn invalid_keyword(path: &str, keyword: &str, actual: &Value) -> FlattenError {
    FlattenError::InvalidKeywordType {
        path: path.to_string(),
        keyword: keyword.to_string(),
        actual: json_type_name(actual).to_string(),
    }
}
