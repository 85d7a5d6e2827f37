//! Code list extraction from structure documents.

use oda_model::{CodeMapping, MappingSpec};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::store::MappingStore;
use crate::xml::{Element, SchemaDocument};

const MAPS_PATH: &[&str] = &["Structures", "RepresentationMaps"];
const MAP: &str = "RepresentationMap";
const ENTRY: &str = "RepresentationMapping";
const SOURCE_VALUE: &str = "SourceValue";
const TARGET_VALUE: &str = "TargetValue";

/// Which representation map of a structure document feeds which mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeListRef {
    pub spec: MappingSpec,
    /// Position among the document's `RepresentationMap` elements.
    pub map_index: usize,
}

impl CodeListRef {
    pub const fn new(spec: MappingSpec, map_index: usize) -> Self {
        Self { spec, map_index }
    }
}

/// Build the mapping described by one representation map.
///
/// Entries without a source or target value are skipped. When a source
/// value repeats, the last entry in document order wins. A document without
/// the referenced map yields an empty mapping.
pub fn extract(document: &SchemaDocument, code_list: &CodeListRef) -> CodeMapping {
    let Some(map) = representation_map(document.root(), code_list.map_index) else {
        warn!(
            mapping = code_list.spec.name,
            index = code_list.map_index,
            "representation map not found in structure document"
        );
        return CodeMapping::new();
    };

    let mut mapping = CodeMapping::new();
    let mut skipped = 0usize;
    for entry in map.children_named(ENTRY) {
        let source = entry.child(SOURCE_VALUE).and_then(Element::text);
        let target = entry.child(TARGET_VALUE).and_then(Element::text);
        match (source, target) {
            (Some(source), Some(target)) => {
                if let Some(previous) = mapping.insert(source, target) {
                    debug!(
                        mapping = code_list.spec.name,
                        source,
                        %previous,
                        "duplicate source value, keeping the later entry"
                    );
                }
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(
            mapping = code_list.spec.name,
            skipped, "skipped incomplete representation entries"
        );
    }
    mapping
}

fn representation_map(root: &Element, index: usize) -> Option<&Element> {
    root.path(MAPS_PATH)?.children_named(MAP).nth(index)
}

/// Write an extracted mapping to its store location.
///
/// Returns `false` without touching the store when `mapping` is empty, so
/// a later load reports the update as failed instead of reading nothing.
pub fn persist(store: &dyn MappingStore, spec: &MappingSpec, mapping: &CodeMapping) -> Result<bool> {
    if mapping.is_empty() {
        warn!(mapping = spec.name, "extraction produced no entries, not saving");
        return Ok(false);
    }
    store.write(spec.location, mapping)?;
    info!(mapping = spec.name, entries = mapping.len(), "updated mapping");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use oda_model::{Code, KeyCoercion};

    use super::*;
    use crate::store::MemoryMappingStore;
    use crate::xml::parse_schema;

    const PRICES: MappingSpec = MappingSpec::new("prices", "prices.json", KeyCoercion::Keep);

    #[test]
    fn missing_structure_yields_empty_mapping() {
        let document = parse_schema("<Structure><Header/></Structure>").unwrap();
        assert!(extract(&document, &CodeListRef::new(PRICES, 0)).is_empty());
    }

    #[test]
    fn index_past_the_last_map_yields_empty_mapping() {
        let document = parse_schema(
            "<Structure><Structures><RepresentationMaps>\
             <RepresentationMap><RepresentationMapping>\
             <SourceValue>N</SourceValue><TargetValue>V</TargetValue>\
             </RepresentationMapping></RepresentationMap>\
             </RepresentationMaps></Structures></Structure>",
        )
        .unwrap();
        assert_eq!(extract(&document, &CodeListRef::new(PRICES, 0)).len(), 1);
        assert!(extract(&document, &CodeListRef::new(PRICES, 1)).is_empty());
    }

    #[test]
    fn persist_skips_empty_mappings() {
        let store = MemoryMappingStore::new();
        assert!(!persist(&store, &PRICES, &CodeMapping::new()).unwrap());
        assert!(!store.exists(PRICES.location));

        let mapping: CodeMapping = [("N", "V")].into_iter().collect();
        assert!(persist(&store, &PRICES, &mapping).unwrap());
        assert_eq!(
            store.read(PRICES.location).unwrap().get(&Code::from("N")),
            Some(&Code::from("V"))
        );
    }
}
