//! Mapping families published by the statistics API.
//!
//! A family is one structure document and the code lists extracted from it.

use oda_model::{KeyCoercion, MappingSpec};
use tracing::info;

use crate::error::Result;
use crate::extract::{CodeListRef, extract, persist};
use crate::fetch::SchemaSource;
use crate::store::MappingStore;

pub const DAC1_AREA: MappingSpec =
    MappingSpec::new("dac1_codes_area", "dac1_codes_area.json", KeyCoercion::Integer);
pub const DAC1_PRICES: MappingSpec =
    MappingSpec::new("dac1_codes_prices", "dac1_codes_prices.json", KeyCoercion::Keep);
pub const DAC1_FLOW_TYPES: MappingSpec = MappingSpec::new(
    "dac1_codes_flow_types",
    "dac1_codes_flow_types.json",
    KeyCoercion::Keep,
);
pub const DAC2_AREA: MappingSpec =
    MappingSpec::new("dac2_codes_area", "dac2_codes_area.json", KeyCoercion::Integer);

/// Curated corrections to the DAC2 area table. Shipped, never fetched.
pub const AREA_CODE_CORRECTIONS: MappingSpec = MappingSpec::new(
    "area_code_corrections",
    "area_code_corrections.json",
    KeyCoercion::Integer,
);

/// Every known mapping.
pub const ALL_SPECS: &[MappingSpec] = &[
    DAC1_AREA,
    DAC1_PRICES,
    DAC1_FLOW_TYPES,
    DAC2_AREA,
    AREA_CODE_CORRECTIONS,
];

/// A structure document and the mappings derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingFamily {
    pub name: &'static str,
    pub schema_url: &'static str,
    pub code_lists: &'static [CodeListRef],
}

impl MappingFamily {
    /// Whether `spec` is materialized by this family.
    pub fn provides(&self, spec: &MappingSpec) -> bool {
        self.code_lists.iter().any(|list| list.spec.name == spec.name)
    }
}

pub const DAC1: MappingFamily = MappingFamily {
    name: "dac1",
    schema_url: "https://stats.oecd.org/FileView2.aspx?IDFile=b9613c8b-b31d-4fd9-ba95-5f129729d693",
    code_lists: &[
        CodeListRef::new(DAC1_AREA, 0),
        CodeListRef::new(DAC1_PRICES, 1),
        CodeListRef::new(DAC1_FLOW_TYPES, 2),
    ],
};

pub const DAC2: MappingFamily = MappingFamily {
    name: "dac2",
    schema_url: "https://stats.oecd.org/FileView2.aspx?IDFile=997ad7fb-48f1-4046-945d-067dc5bec7de",
    code_lists: &[CodeListRef::new(DAC2_AREA, 0)],
};

pub const FAMILIES: &[MappingFamily] = &[DAC1, DAC2];

/// The family that materializes `spec`, if any.
pub fn family_for(spec: &MappingSpec) -> Option<&'static MappingFamily> {
    FAMILIES.iter().find(|family| family.provides(spec))
}

/// Fetch the family's structure document once and store every code list in it.
///
/// Returns the number of mappings written. Empty extractions are not written.
pub fn update_family(
    family: &MappingFamily,
    source: &dyn SchemaSource,
    store: &dyn MappingStore,
) -> Result<usize> {
    info!(family = family.name, "updating mappings");
    let document = source.fetch(family.schema_url)?;
    let mut written = 0;
    for code_list in family.code_lists {
        let mapping = extract(&document, code_list);
        if persist(store, &code_list.spec, &mapping)? {
            written += 1;
        }
    }
    info!(
        family = family.name,
        written,
        total = family.code_lists.len(),
        "family update finished"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrections_belong_to_no_family() {
        assert!(family_for(&AREA_CODE_CORRECTIONS).is_none());
        assert_eq!(family_for(&DAC2_AREA).map(|f| f.name), Some("dac2"));
        assert_eq!(family_for(&DAC1_PRICES).map(|f| f.name), Some("dac1"));
    }

    #[test]
    fn spec_names_are_unique() {
        for (i, spec) in ALL_SPECS.iter().enumerate() {
            assert!(
                ALL_SPECS[i + 1..].iter().all(|other| other.name != spec.name),
                "duplicate mapping name {}",
                spec.name
            );
        }
    }
}
