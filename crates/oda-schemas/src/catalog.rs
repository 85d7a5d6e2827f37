//! Named access to every mapping, backed by injectable store and source.

use oda_model::{CodeMapping, MappingSpec};

use crate::error::{Result, SchemaError};
use crate::families::{
    ALL_SPECS, AREA_CODE_CORRECTIONS, DAC1_AREA, DAC1_FLOW_TYPES, DAC1_PRICES, DAC2, DAC2_AREA,
    MappingFamily, family_for, update_family,
};
use crate::fetch::SchemaSource;
use crate::loader::MappingLoader;
use crate::store::MappingStore;

/// Loads mappings on demand, fetching a family's structure document on a miss.
///
/// Nothing is cached beyond what the store holds; every accessor reads the
/// store again.
#[derive(Clone, Copy)]
pub struct MappingCatalog<'a> {
    store: &'a dyn MappingStore,
    corrections: &'a dyn MappingStore,
    source: &'a dyn SchemaSource,
}

impl<'a> MappingCatalog<'a> {
    pub fn new(store: &'a dyn MappingStore, source: &'a dyn SchemaSource) -> Self {
        Self {
            store,
            corrections: store,
            source,
        }
    }

    /// Read curated correction tables from a separate store.
    #[must_use]
    pub fn with_corrections(mut self, corrections: &'a dyn MappingStore) -> Self {
        self.corrections = corrections;
        self
    }

    fn loader(&self) -> MappingLoader<'a> {
        MappingLoader::new(self.store).with_corrections(self.corrections)
    }

    /// Fetch `family` and store every mapping it provides.
    pub fn update(&self, family: &MappingFamily) -> Result<usize> {
        update_family(family, self.source, self.store)
    }

    /// Load any known mapping.
    ///
    /// Correction tables come from the corrections store and are never fetched.
    pub fn load(&self, spec: &MappingSpec) -> Result<CodeMapping> {
        match family_for(spec) {
            Some(family) => self
                .loader()
                .load(spec, || self.update(family).map(|_| ())),
            None => {
                if !self.corrections.exists(spec.location) {
                    return Err(SchemaError::MissingCorrections {
                        name: spec.name.to_string(),
                    });
                }
                Ok(self.corrections.read(spec.location)?.coerce_keys(spec.keys)?)
            }
        }
    }

    /// DAC1 donor code → area code.
    pub fn dac1_area_codes(&self) -> Result<CodeMapping> {
        self.load(&DAC1_AREA)
    }

    /// DAC1 amount type → price code.
    pub fn dac1_prices(&self) -> Result<CodeMapping> {
        self.load(&DAC1_PRICES)
    }

    pub fn dac1_flow_types(&self) -> Result<CodeMapping> {
        self.load(&DAC1_FLOW_TYPES)
    }

    /// DAC2 area codes with the curated corrections applied.
    pub fn dac2_area_codes(&self) -> Result<CodeMapping> {
        self.loader()
            .load_corrected(&DAC2_AREA, &AREA_CODE_CORRECTIONS, || {
                self.update(&DAC2).map(|_| ())
            })
    }
}

/// Look up a mapping by its logical name.
///
/// # Errors
///
/// [`SchemaError::UnknownMapping`] when no mapping has that name.
pub fn spec_by_name(name: &str) -> Result<&'static MappingSpec> {
    ALL_SPECS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| SchemaError::UnknownMapping {
            name: name.to_string(),
        })
}
