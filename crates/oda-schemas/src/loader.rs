//! Cache-or-fetch loading of code mappings.

use oda_model::{CodeMapping, MappingSpec, merge};
use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::store::MappingStore;

/// Loads mappings from a store, materializing them on a miss.
///
/// Correction tables are read from a separate store when one is given,
/// otherwise from the same store as the base tables.
#[derive(Clone, Copy)]
pub struct MappingLoader<'a> {
    store: &'a dyn MappingStore,
    corrections: &'a dyn MappingStore,
}

impl<'a> MappingLoader<'a> {
    pub fn new(store: &'a dyn MappingStore) -> Self {
        Self {
            store,
            corrections: store,
        }
    }

    /// Read correction tables from `corrections` instead of the main store.
    #[must_use]
    pub fn with_corrections(mut self, corrections: &'a dyn MappingStore) -> Self {
        self.corrections = corrections;
        self
    }

    /// Load the mapping for `spec`.
    ///
    /// A stored table is returned without calling `update`. Otherwise `update`
    /// runs once and the table it should have written is read back.
    ///
    /// # Errors
    ///
    /// - errors returned by `update` are propagated as is
    /// - [`SchemaError::UpdateFailed`] when `update` succeeded but nothing
    ///   was stored at the mapping's location
    /// - [`SchemaError::Model`] when stored keys fail the mapping's key coercion
    pub fn load<F>(&self, spec: &MappingSpec, update: F) -> Result<CodeMapping>
    where
        F: FnOnce() -> Result<()>,
    {
        if self.store.exists(spec.location) {
            debug!(mapping = spec.name, "mapping found in store");
        } else {
            info!(mapping = spec.name, "mapping not found, updating");
            update()?;
            if !self.store.exists(spec.location) {
                return Err(SchemaError::UpdateFailed {
                    name: spec.name.to_string(),
                });
            }
        }
        read_typed(self.store, spec)
    }

    /// Load `base` and overlay the curated `correction` table on it.
    ///
    /// Corrections are never fetched; only `base` may trigger `update`.
    ///
    /// # Errors
    ///
    /// Everything [`load`](Self::load) returns, plus
    /// [`SchemaError::MissingCorrections`] when the correction table is absent.
    /// Corrections are checked first, so a missing table never triggers an update.
    pub fn load_corrected<F>(
        &self,
        base: &MappingSpec,
        correction: &MappingSpec,
        update: F,
    ) -> Result<CodeMapping>
    where
        F: FnOnce() -> Result<()>,
    {
        if !self.corrections.exists(correction.location) {
            return Err(SchemaError::MissingCorrections {
                name: correction.name.to_string(),
            });
        }
        let corrections = read_typed(self.corrections, correction)?;
        let base = self.load(base, update)?;
        debug!(
            base = base.len(),
            corrections = corrections.len(),
            "applying corrections"
        );
        Ok(merge(&base, &corrections))
    }
}

fn read_typed(store: &dyn MappingStore, spec: &MappingSpec) -> Result<CodeMapping> {
    Ok(store.read(spec.location)?.coerce_keys(spec.keys)?)
}
