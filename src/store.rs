//! Ordered accumulator for emitted properties.

use std::collections::HashMap;

use crate::types::Property;

/// Properties in emission order, unique by path.
///
/// Inserting a property whose path already exists replaces the earlier
/// record in place, so the later definition wins while the position of the
/// first emission is kept.
#[derive(Debug, Default, Clone)]
pub struct PropertyStore {
    properties: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property. Returns the replaced record, if any.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        let existing = self.index.get(&property.path).copied();
        match existing {
            Some(i) => Some(std::mem::replace(&mut self.properties[i], property)),
            None => {
                self.index
                    .insert(property.path.clone(), self.properties.len());
                self.properties.push(property);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn into_vec(self) -> Vec<Property> {
        self.properties
    }
}
