//! Code-mapping tables derived from OECD structure documents.
//!
//! Mappings are extracted from SDMX structure XML published by the statistics
//! API, stored as JSON documents, and loaded on demand:
//!
//! - **store**: durable JSON storage, file-backed or in memory
//! - **fetch / xml**: retrieve and parse structure documents
//! - **extract**: turn one representation map into a [`CodeMapping`]
//! - **loader**: cache-or-fetch loading and correction overlays
//! - **families / catalog**: the DAC1 and DAC2 mappings by name
//!
//! # Schemas Directory
//!
//! ```text
//! schemas/
//! ├── area_code_corrections.json   # curated, shipped with the crate
//! ├── dac1_codes_area.json         # materialized on first use
//! ├── dac1_codes_prices.json
//! ├── dac1_codes_flow_types.json
//! └── dac2_codes_area.json
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use oda_schemas::{FsMappingStore, HttpSchemaSource, MappingCatalog, schemas_root};
//!
//! let store = FsMappingStore::new(schemas_root());
//! let source = HttpSchemaSource::new()?;
//! let catalog = MappingCatalog::new(&store, &source);
//!
//! // Downloads the DAC2 structure document only if the table is not stored yet
//! let area_codes = catalog.dac2_area_codes()?;
//! ```
//!
//! [`CodeMapping`]: oda_model::CodeMapping

pub mod catalog;
pub mod error;
pub mod extract;
pub mod families;
pub mod fetch;
pub mod loader;
pub mod paths;
pub mod store;
pub mod xml;

pub use catalog::{MappingCatalog, spec_by_name};
pub use error::{Result, SchemaError};
pub use extract::{CodeListRef, extract, persist};
pub use families::{
    ALL_SPECS, AREA_CODE_CORRECTIONS, DAC1, DAC1_AREA, DAC1_FLOW_TYPES, DAC1_PRICES, DAC2,
    DAC2_AREA, FAMILIES, MappingFamily, family_for, update_family,
};
pub use fetch::{FileSchemaSource, HttpSchemaSource, SchemaSource};
pub use loader::MappingLoader;
pub use paths::{SCHEMAS_ENV_VAR, bundled_schemas_dir, schemas_root};
pub use store::{FsMappingStore, MappingStore, MemoryMappingStore, decode_mapping, encode_mapping};
pub use xml::{Element, SchemaDocument, parse_schema};
