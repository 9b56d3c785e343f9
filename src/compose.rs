//! `allOf` composition.
//!
//! Each branch contributes its direct `properties`, a `$ref`, or both, all
//! flattened under the path of the composed node. Branches are applied in
//! document order; when two branches emit the same leaf path the later one
//! replaces the earlier record.

use serde_json::Value;
use tracing::debug;

use crate::error::FlattenError;
use crate::flatten::Flattener;

impl<'a> Flattener<'a> {
    /// Flatten every branch of an `allOf` under `path`.
    pub(crate) fn resolve_all_of(
        &mut self,
        path: &str,
        branches: &'a [Value],
    ) -> Result<(), FlattenError> {
        debug!(path, branches = branches.len(), "resolving allOf");

        for branch in branches {
            if let Some(properties) = self.model.child_properties(branch, path)? {
                let required = self.model.required_list(branch, path)?.unwrap_or_default();
                self.register_required(path, &required);
                self.flatten(path, &properties)?;
            }

            if let Some(pointer) = self.model.ref_pointer(branch, path)? {
                self.flatten_reference(path, pointer)?;
            }
        }
        Ok(())
    }
}
