//! `$ref` resolution against the top-level `definitions` table.

use crate::error::FlattenError;
use crate::model::{Children, SchemaModel};
use crate::types::{unescape_segment, DEFINITIONS_POINTER_PREFIX};

/// A definition looked up through a `$ref` pointer.
#[derive(Debug, Clone)]
pub struct ResolvedRef<'a> {
    /// Definition name, with JSON Pointer escapes removed.
    pub name: String,
    pub properties: Children<'a>,
    pub required: Vec<&'a str>,
}

/// Extract the definition name from a `#/definitions/<Name>` pointer.
///
/// Returns `None` for any other pointer form, including deeper pointers
/// such as `#/definitions/Pet/properties/age` and external references.
pub fn definition_name(pointer: &str) -> Option<String> {
    let name = pointer.strip_prefix(DEFINITIONS_POINTER_PREFIX)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(unescape_segment(name))
}

/// Resolves `$ref` pointers and tracks the chain of definitions currently
/// being expanded.
///
/// The chain belongs to one depth-first walk: [`enter`](Self::enter) pushes a
/// definition and [`leave`](Self::leave) pops it once its subtree is done.
/// Entering a definition already on the chain is a cycle.
#[derive(Debug, Clone)]
pub struct ReferenceResolver<'a> {
    model: SchemaModel<'a>,
    chain: Vec<String>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(model: SchemaModel<'a>) -> Self {
        Self {
            model,
            chain: Vec::new(),
        }
    }

    /// Resolve `pointer` without touching the chain.
    ///
    /// `path` is the location of the referencing node, used in errors.
    pub fn lookup(&self, pointer: &str, path: &str) -> Result<ResolvedRef<'a>, FlattenError> {
        let unresolved = || FlattenError::UnresolvedReference {
            path: path.to_string(),
            pointer: pointer.to_string(),
        };

        let name = definition_name(pointer).ok_or_else(unresolved)?;
        let node = self
            .model
            .definitions()?
            .and_then(|defs| defs.get(&name))
            .ok_or_else(unresolved)?;

        let properties = self.model.child_properties(node, path)?.ok_or_else(|| {
            FlattenError::SchemaStructure {
                path: path.to_string(),
                missing_keyword: "properties".to_string(),
            }
        })?;
        let required = self.model.required_list(node, path)?.unwrap_or_default();

        Ok(ResolvedRef {
            name,
            properties,
            required,
        })
    }

    /// Resolve `pointer` and push its definition onto the chain.
    ///
    /// # Errors
    ///
    /// Returns `FlattenError::CyclicReference` if the definition is already
    /// on the chain, plus any error from [`lookup`](Self::lookup).
    pub fn enter(&mut self, pointer: &str, path: &str) -> Result<ResolvedRef<'a>, FlattenError> {
        if let Some(name) = definition_name(pointer) {
            if self.chain.contains(&name) {
                let mut chain = self.chain.clone();
                chain.push(name);
                return Err(FlattenError::CyclicReference {
                    path: path.to_string(),
                    chain,
                });
            }
        }

        let resolved = self.lookup(pointer, path)?;
        self.chain.push(resolved.name.clone());
        Ok(resolved)
    }

    /// Pop the most recently entered definition.
    pub fn leave(&mut self) {
        self.chain.pop();
    }

    /// Definitions currently being expanded, outermost first.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}
