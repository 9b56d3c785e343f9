//! Schema flattening - walks a schema document and inventories its leaf fields.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::check::check_schema;
use crate::error::FlattenError;
use crate::loader::load_schema;
use crate::model::{Children, SchemaModel, SchemaNode};
use crate::reference::ReferenceResolver;
use crate::required::{RequiredKeyResolver, RequiredSet};
use crate::store::PropertyStore;
use crate::types::{child_path, FlattenOptions, Property, PropertyType};

/// Flatten a schema file into its leaf properties.
///
/// Uses default [`FlattenOptions`].
///
/// # Errors
///
/// Returns `FlattenError::Load` if the file cannot be read or parsed, and
/// any other `FlattenError` if the schema is structurally inconsistent.
pub fn flatten_schema(path: impl AsRef<Path>) -> Result<Vec<Property>, FlattenError> {
    let schema = load_schema(path.as_ref())?;
    flatten(&schema, &FlattenOptions::default())
}

/// Flatten a parsed schema document into its leaf properties.
///
/// Children of every object are visited in lexicographic order of their
/// field names, so the output order is a function of the document alone.
/// The first error aborts the walk and no partial result is returned.
///
/// # Errors
///
/// Returns `FlattenError` if the schema violates its own declared shape,
/// contains an unresolvable or cyclic `$ref`, or (with `check_schema`)
/// is not a valid JSON Schema.
pub fn flatten(schema: &Value, options: &FlattenOptions) -> Result<Vec<Property>, FlattenError> {
    if options.check_schema {
        check_schema(schema)?;
    }

    let flattener = Flattener::new(schema);
    flattener.run(&options.root_segment)
}

/// State of one flatten invocation.
///
/// The required set, the output store and the reference chain all live
/// here and are dropped with the flattener.
#[derive(Debug)]
pub struct Flattener<'a> {
    pub(crate) model: SchemaModel<'a>,
    pub(crate) references: ReferenceResolver<'a>,
    pub(crate) required_keys: RequiredKeyResolver<'a>,
    pub(crate) required: RequiredSet,
    pub(crate) store: PropertyStore,
}

impl<'a> Flattener<'a> {
    pub fn new(document: &'a Value) -> Self {
        let model = SchemaModel::new(document);
        Self {
            model,
            references: ReferenceResolver::new(model),
            required_keys: RequiredKeyResolver::new(model),
            required: RequiredSet::new(),
            store: PropertyStore::new(),
        }
    }

    /// Walk the document from its top-level `properties`.
    pub fn run(mut self, root: &str) -> Result<Vec<Property>, FlattenError> {
        let document = self.model.document();
        let children = self.model.child_properties(document, root)?.ok_or_else(|| {
            FlattenError::SchemaStructure {
                path: root.to_string(),
                missing_keyword: "properties".to_string(),
            }
        })?;

        let required = self.required_keys.resolve_required(root)?;
        self.required.extend(required);
        self.flatten(root, &children)?;

        debug!(
            properties = self.store.len(),
            required = self.required.len(),
            "flattened schema"
        );
        Ok(self.store.into_vec())
    }

    /// Visit `children`, which are the properties of the node at `path`.
    pub(crate) fn flatten(
        &mut self,
        path: &str,
        children: &Children<'a>,
    ) -> Result<(), FlattenError> {
        for (&name, &node) in children {
            let child = child_path(path, name);

            match self.model.type_of(node, &child)? {
                SchemaNode::Object(properties) => {
                    let required = self.model.required_list(node, &child)?.unwrap_or_default();
                    self.register_required(&child, &required);
                    self.flatten(&child, &properties)?;
                }
                SchemaNode::Scalar(property_type, node) => {
                    self.emit(child, property_type, node)?;
                }
                SchemaNode::Composition(branches) => {
                    self.resolve_all_of(&child, branches)?;
                }
                SchemaNode::Reference(pointer) => {
                    self.flatten_reference(&child, pointer)?;
                }
                SchemaNode::Unknown => {
                    trace!(path = %child, "skipping unsupported node");
                }
            }
        }
        Ok(())
    }

    /// Resolve `pointer` and flatten the definition's properties under `path`.
    pub(crate) fn flatten_reference(
        &mut self,
        path: &str,
        pointer: &str,
    ) -> Result<(), FlattenError> {
        let resolved = self.references.enter(pointer, path)?;
        debug!(
            path,
            definition = %resolved.name,
            depth = self.references.chain().len(),
            "resolved reference"
        );

        self.register_required(path, &resolved.required);
        self.flatten(path, &resolved.properties)?;
        self.references.leave();
        Ok(())
    }

    /// Mark `names` as required children of the node at `path`.
    pub(crate) fn register_required(&mut self, path: &str, names: &[&str]) {
        self.required
            .extend(names.iter().map(|name| child_path(path, name)));
    }

    fn emit(
        &mut self,
        path: String,
        property_type: PropertyType,
        node: &'a Value,
    ) -> Result<(), FlattenError> {
        let required = self.required.contains(&path);
        let mut property = Property::new(path, property_type, required);

        match property_type {
            PropertyType::Number => {
                property.maximum = self.model.constraint_value(node, "maximum", &property.path)?;
                property.minimum = self.model.constraint_value(node, "minimum", &property.path)?;
            }
            PropertyType::String => {
                property.max_length =
                    self.model
                        .constraint_value(node, "maxLength", &property.path)?;
                property.min_length =
                    self.model
                        .constraint_value(node, "minLength", &property.path)?;
            }
            PropertyType::Boolean => {}
        }

        trace!(
            path = %property.path,
            kind = %property.property_type,
            required = property.required,
            "emitted property"
        );
        if let Some(previous) = self.store.insert(property) {
            debug!(path = %previous.path, "property redefined, later definition wins");
        }
        Ok(())
    }
}
