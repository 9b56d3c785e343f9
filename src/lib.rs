//! JSON Schema Flattener
//!
//! Turns a nested JSON Schema document into a flat inventory of its leaf
//! scalar fields (`string`, `number`, `boolean`), each with its path, its
//! required flag and its type-specific bounds.
//!
//! # Example
//!
//! ```
//! use schema_flatten::{flatten, FlattenOptions, PropertyType};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "definitions": {
//!         "Pet": {
//!             "properties": { "age": { "type": "number", "minimum": 0 } },
//!             "required": ["age"]
//!         }
//!     },
//!     "properties": {
//!         "name": { "type": "string", "minLength": 1 },
//!         "pet": { "$ref": "#/definitions/Pet" }
//!     },
//!     "required": ["name"]
//! });
//!
//! let props = flatten(&schema, &FlattenOptions::default()).unwrap();
//!
//! assert_eq!(props[0].path, "root/name");
//! assert_eq!(props[0].min_length, Some(1));
//! assert_eq!(props[0].max_length, None);
//! assert_eq!(props[1].path, "root/pet/age");
//! assert_eq!(props[1].property_type, PropertyType::Number);
//! assert!(props[1].required);
//! ```
//!
//! # Supported Keywords
//!
//! | Keyword | Effect |
//! |---------|--------|
//! | `type` | `object` is descended, `string`/`number`/`boolean` are emitted, anything else is skipped |
//! | `properties` | Children, visited in lexicographic order |
//! | `required` | Marks children of the enclosing object |
//! | `$ref` | `#/definitions/<Name>` only, flattened in place |
//! | `allOf` | Branches flattened in order, later leaves replace earlier ones |
//! | `maximum`, `minimum` | Bounds of `number` leaves |
//! | `maxLength`, `minLength` | Bounds of `string` leaves |
//!
//! Other keywords are ignored.

mod check;
mod compose;
mod error;
mod flatten;
mod loader;
mod model;
mod reference;
mod required;
mod store;
mod types;

pub use check::check_schema;
pub use error::{FlattenError, LoadError};
pub use flatten::{flatten, flatten_schema, Flattener};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str};
pub use model::{Children, SchemaModel, SchemaNode};
pub use reference::{definition_name, ReferenceResolver, ResolvedRef};
pub use required::{RequiredKeyResolver, RequiredSet};
pub use store::PropertyStore;
pub use types::{
    escape_segment, unescape_segment, FlattenOptions, Property, PropertyType,
    DEFAULT_ROOT_SEGMENT,
};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
