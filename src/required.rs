//! Required-key lookup by flattened path.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::FlattenError;
use crate::model::{Children, SchemaModel, SchemaNode};
use crate::reference::ReferenceResolver;
use crate::types::{child_path, unescape_segment};

/// Fully-qualified paths declared required by their parent object.
#[derive(Debug, Default, Clone)]
pub struct RequiredSet {
    paths: HashSet<String>,
}

impl RequiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Extend<String> for RequiredSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.paths.extend(iter);
    }
}

/// Properties and required names of one schema node at a given depth.
struct Level<'a> {
    properties: Children<'a>,
    required: Vec<&'a str>,
}

/// Finds the `required` list of the node addressed by a flattened path.
///
/// Navigation starts at the document root and follows `properties` one
/// segment at a time. A `$ref` node is navigated through its definition and
/// an `allOf` node through each of its branches. Every node a path can
/// address is kept as a candidate, so an object declared in two branches
/// contributes both of its `required` lists and neither hides the other's
/// children.
#[derive(Debug, Clone)]
pub struct RequiredKeyResolver<'a> {
    model: SchemaModel<'a>,
    references: ReferenceResolver<'a>,
}

impl<'a> RequiredKeyResolver<'a> {
    pub fn new(model: SchemaModel<'a>) -> Self {
        Self {
            model,
            references: ReferenceResolver::new(model),
        }
    }

    /// Required child paths of the node at `path`.
    ///
    /// The first segment of `path` is the synthetic root and is not looked
    /// up. Each required name `r` is returned once as `path/r`, in the order
    /// first declared.
    ///
    /// # Errors
    ///
    /// Returns `FlattenError::PathNotFound` if a segment does not name a
    /// property of any candidate parent.
    pub fn resolve_required(&self, path: &str) -> Result<Vec<String>, FlattenError> {
        let mut segments = path.split('/');
        let mut walked = segments.next().unwrap_or_default().to_string();
        let mut levels = vec![self.root_level(&walked)?];

        for segment in segments {
            let name = unescape_segment(segment);
            let nodes: Vec<&'a Value> = levels
                .iter()
                .filter_map(|level| level.properties.get(name.as_str()).copied())
                .collect();
            if nodes.is_empty() {
                return Err(FlattenError::PathNotFound {
                    path: path.to_string(),
                    segment: name,
                });
            }

            walked = format!("{}/{}", walked, segment);
            levels = Vec::new();
            for node in nodes {
                self.levels(node, &walked, &mut levels)?;
            }
        }

        let mut required: Vec<String> = Vec::new();
        for name in levels.iter().flat_map(|level| level.required.iter()) {
            let child = child_path(path, name);
            if !required.contains(&child) {
                required.push(child);
            }
        }
        Ok(required)
    }

    fn root_level(&self, path: &str) -> Result<Level<'a>, FlattenError> {
        let document = self.model.document();
        Ok(Level {
            properties: self
                .model
                .child_properties(document, path)?
                .unwrap_or_default(),
            required: self
                .model
                .required_list(document, path)?
                .unwrap_or_default(),
        })
    }

    /// Push the levels `node` exposes to navigation. Scalars expose none.
    fn levels(
        &self,
        node: &'a Value,
        path: &str,
        out: &mut Vec<Level<'a>>,
    ) -> Result<(), FlattenError> {
        match self.model.type_of(node, path)? {
            SchemaNode::Object(properties) => out.push(Level {
                properties,
                required: self.model.required_list(node, path)?.unwrap_or_default(),
            }),
            SchemaNode::Reference(pointer) => out.push(self.reference_level(pointer, path)?),
            SchemaNode::Composition(branches) => {
                for branch in branches {
                    if let Some(properties) = self.model.child_properties(branch, path)? {
                        out.push(Level {
                            properties,
                            required: self.model.required_list(branch, path)?.unwrap_or_default(),
                        });
                    }
                    if let Some(pointer) = self.model.ref_pointer(branch, path)? {
                        out.push(self.reference_level(pointer, path)?);
                    }
                }
            }
            SchemaNode::Scalar(..) | SchemaNode::Unknown => {}
        }
        Ok(())
    }

    fn reference_level(&self, pointer: &str, path: &str) -> Result<Level<'a>, FlattenError> {
        let resolved = self.references.lookup(pointer, path)?;
        Ok(Level {
            properties: resolved.properties,
            required: resolved.required,
        })
    }
}
