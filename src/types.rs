//! Core types for schema flattening.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the synthetic first path segment.
pub const DEFAULT_ROOT_SEGMENT: &str = "root";

/// Prefix of the only `$ref` form that resolves.
pub const DEFINITIONS_POINTER_PREFIX: &str = "#/definitions/";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scalar type of a leaf property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
}

impl PropertyType {
    /// Parse a scalar `type` keyword value.
    ///
    /// Returns `None` for `object` and for anything this crate does not inventory.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(PropertyType::String),
            "number" => Some(PropertyType::Number),
            "boolean" => Some(PropertyType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One leaf scalar field of a flattened schema.
///
/// Bounds are `None` when the keyword is absent from the source schema;
/// a bound of `0` or a negative bound is a real value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// `/`-joined path starting at the root segment, e.g. `root/addr/zip`.
    pub path: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
}

impl Property {
    /// A property with no bounds.
    pub fn new(path: impl Into<String>, property_type: PropertyType, required: bool) -> Self {
        Self {
            path: path.into(),
            property_type,
            required,
            maximum: None,
            minimum: None,
            max_length: None,
            min_length: None,
        }
    }

    /// The field name, i.e. the last path segment (unescaped).
    pub fn name(&self) -> String {
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        unescape_segment(last)
    }
}

/// Options for schema flattening.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Synthetic first segment of every emitted path.
    pub root_segment: String,
    /// When true, compile the document with the `jsonschema` crate before
    /// flattening and reject it if it is not a valid JSON Schema.
    pub check_schema: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            root_segment: DEFAULT_ROOT_SEGMENT.to_string(),
            check_schema: false,
        }
    }
}

impl FlattenOptions {
    /// Create options with the default `root` segment and schema checking off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synthetic root segment name.
    ///
    /// The name is escaped like any other segment.
    pub fn root_segment(mut self, root: impl Into<String>) -> Self {
        self.root_segment = escape_segment(&root.into());
        self
    }

    /// Enable or disable the JSON Schema meta-check.
    pub fn check_schema(mut self, check: bool) -> Self {
        self.check_schema = check;
        self
    }
}

/// Escape a field name for use as a path segment (JSON Pointer style: `~` → `~0`, `/` → `~1`).
pub fn escape_segment(name: &str) -> String {
    name.replace('~', "~0").replace('/', "~1")
}

/// Reverse of [`escape_segment`].
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Append a field name to a path.
pub fn child_path(path: &str, name: &str) -> String {
    format!("{}/{}", path, escape_segment(name))
}
