//! Durable storage for materialized code mappings.
//!
//! Every mapping is stored as one JSON object keyed by source code:
//!
//! ```json
//! {
//!   "801": "AUS",
//!   "1": "AUT"
//! }
//! ```
//!
//! JSON object keys are always strings, so integer-keyed tables come back
//! with string keys and are re-typed by the loader (see
//! [`oda_model::KeyCoercion`]). Values keep their JSON type.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use oda_model::{Code, CodeMapping};
use serde::ser::Error as _;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, SchemaError};

/// Key/value storage for code mappings, addressed by location.
pub trait MappingStore {
    /// Whether a mapping is stored at `location`.
    fn exists(&self, location: &str) -> bool;

    /// Read the mapping stored at `location`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotFound`] when nothing is stored there.
    fn read(&self, location: &str) -> Result<CodeMapping>;

    /// Store `mapping` at `location`, replacing any previous table.
    ///
    /// Readers observe either the previous or the new table, never a partial one.
    fn write(&self, location: &str, mapping: &CodeMapping) -> Result<()>;
}

type MappingDocument = BTreeMap<String, Code>;

/// Serialize a mapping to its JSON document form.
///
/// # Errors
///
/// Fails when two keys render to the same JSON key, such as `Int(1)` and
/// `Text("1")`, since the document could not hold both entries.
pub fn encode_mapping(mapping: &CodeMapping) -> serde_json::Result<String> {
    let mut document = MappingDocument::new();
    for (source, target) in mapping.iter() {
        let key = source.to_string();
        if document.contains_key(&key) {
            return Err(serde_json::Error::custom(format!(
                "mapping key {key:?} appears in both integer and text form"
            )));
        }
        document.insert(key, target.clone());
    }
    serde_json::to_string_pretty(&document)
}

/// Parse a JSON mapping document. Keys are returned as [`Code::Text`].
pub fn decode_mapping(text: &str) -> serde_json::Result<CodeMapping> {
    let document: MappingDocument = serde_json::from_str(text)?;
    Ok(document
        .into_iter()
        .map(|(source, target)| (Code::Text(source), target))
        .collect())
}

/// Mapping store backed by JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct FsMappingStore {
    root: PathBuf,
}

impl FsMappingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a store location.
    pub fn path_for(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }
}

impl MappingStore for FsMappingStore {
    fn exists(&self, location: &str) -> bool {
        self.path_for(location).is_file()
    }

    fn read(&self, location: &str) -> Result<CodeMapping> {
        let path = self.path_for(location);
        if !path.is_file() {
            return Err(SchemaError::NotFound {
                location: location.to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|e| SchemaError::io("read", &path, e))?;
        let mapping = decode_mapping(&text).map_err(|e| SchemaError::Json {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), entries = mapping.len(), "read mapping");
        Ok(mapping)
    }

    fn write(&self, location: &str, mapping: &CodeMapping) -> Result<()> {
        let path = self.path_for(location);
        let json = encode_mapping(mapping).map_err(|e| SchemaError::Json {
            path: path.clone(),
            source: e,
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SchemaError::io("create directory", parent, e))?;
        }

        // Unique temp file per write; it is removed on drop if never persisted.
        let dir = path.parent().unwrap_or(&self.root);
        let mut file = NamedTempFile::new_in(dir)
            .map_err(|e| SchemaError::io("create temp file in", dir, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SchemaError::io("write", file.path(), e))?;
        file.as_file()
            .sync_all()
            .map_err(|e| SchemaError::io("sync", file.path(), e))?;
        file.persist(&path)
            .map_err(|e| SchemaError::io("rename into place", &path, e.error))?;

        info!(path = %path.display(), entries = mapping.len(), "saved mapping");
        Ok(())
    }
}

/// In-memory mapping store.
///
/// Holds the same JSON documents the file store writes, so key typing after
/// a round trip matches [`FsMappingStore`].
#[derive(Debug, Default)]
pub struct MemoryMappingStore {
    documents: Mutex<BTreeMap<String, String>>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations currently stored, in order.
    pub fn locations(&self) -> Vec<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl MappingStore for MemoryMappingStore {
    fn exists(&self, location: &str) -> bool {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(location)
    }

    fn read(&self, location: &str) -> Result<CodeMapping> {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let text = documents
            .get(location)
            .ok_or_else(|| SchemaError::NotFound {
                location: location.to_string(),
            })?;
        decode_mapping(text).map_err(|e| SchemaError::Json {
            path: PathBuf::from(location),
            source: e,
        })
    }

    fn write(&self, location: &str, mapping: &CodeMapping) -> Result<()> {
        let json = encode_mapping(mapping).map_err(|e| SchemaError::Json {
            path: PathBuf::from(location),
            source: e,
        })?;
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_string(), json);
        Ok(())
    }
}
