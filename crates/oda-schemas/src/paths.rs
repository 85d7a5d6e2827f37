//! Schemas directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the schemas directory.
pub const SCHEMAS_ENV_VAR: &str = "ODA_SCHEMAS_DIR";

/// Get the schemas directory holding materialized and correction mappings.
///
/// Resolution order:
/// 1. `ODA_SCHEMAS_DIR` environment variable
/// 2. `schemas/` directory of this crate, which ships the curated corrections
///
/// # Example
///
/// ```rust,ignore
/// let store = oda_schemas::FsMappingStore::new(oda_schemas::schemas_root());
/// ```
pub fn schemas_root() -> PathBuf {
    if let Ok(root) = std::env::var(SCHEMAS_ENV_VAR) {
        return PathBuf::from(root);
    }
    bundled_schemas_dir()
}

/// The `schemas/` directory shipped with this crate.
pub fn bundled_schemas_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas")
}
