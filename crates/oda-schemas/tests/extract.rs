//! Extraction of code lists from structure documents.

use oda_model::{Code, CodeMapping, KeyCoercion};
use oda_schemas::{
    CodeListRef, DAC1, DAC1_AREA, DAC1_FLOW_TYPES, DAC1_PRICES, MemoryMappingStore, MappingStore,
    SchemaDocument, extract, parse_schema, update_family,
};

const DAC1_XML: &str = include_str!("fixtures/dac1_structure.xml");

fn dac1_document() -> SchemaDocument {
    parse_schema(DAC1_XML).expect("fixture parses")
}

fn outline(mapping: &CodeMapping) -> String {
    mapping
        .iter()
        .map(|(source, target)| format!("{source} -> {target}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn area_codes_skip_incomplete_entries_and_keep_last_duplicate() {
    let mapping = extract(&dac1_document(), &CodeListRef::new(DAC1_AREA, 0));

    insta::assert_snapshot!(outline(&mapping), @r"
    1 -> AUT
    2 -> BE
    801 -> AUS
    ");
    assert!(!mapping.contains_key(&Code::from("918")));
}

#[test]
fn maps_are_selected_by_position() {
    let document = dac1_document();

    let prices = extract(&document, &CodeListRef::new(DAC1_PRICES, 1));
    assert_eq!(prices.get(&Code::from("A")), Some(&Code::from("V")));
    assert_eq!(prices.get(&Code::from("D")), Some(&Code::from("Q")));

    let flows = extract(&document, &CodeListRef::new(DAC1_FLOW_TYPES, 2));
    assert_eq!(flows.get(&Code::from("115")), Some(&Code::from("E & D")));
}

#[test]
fn document_tree_exposes_names_and_attributes() {
    let document = dac1_document();
    let maps: Vec<_> = document
        .root()
        .path(&["Structures", "RepresentationMaps"])
        .expect("maps present")
        .children_named("RepresentationMap")
        .filter_map(|map| map.attr("id"))
        .collect();

    assert_eq!(document.root().name(), "Structure");
    assert_eq!(
        maps,
        vec!["DAC_TO_AREA", "DATATYPE_TO_PRICES", "FLOWTYPE_TO_FLOWTYPE"]
    );
}

#[test]
fn family_update_writes_every_code_list() {
    struct Fixture;
    impl oda_schemas::SchemaSource for Fixture {
        fn fetch(&self, url: &str) -> oda_schemas::Result<SchemaDocument> {
            assert_eq!(url, DAC1.schema_url);
            parse_schema(DAC1_XML)
        }
    }

    let store = MemoryMappingStore::new();
    let written = update_family(&DAC1, &Fixture, &store).unwrap();

    assert_eq!(written, 3);
    let area = store
        .read(DAC1_AREA.location)
        .unwrap()
        .coerce_keys(KeyCoercion::Integer)
        .unwrap();
    assert_eq!(area.get(&Code::Int(801)), Some(&Code::from("AUS")));
    assert!(store.exists(DAC1_PRICES.location));
    assert!(store.exists(DAC1_FLOW_TYPES.location));
}
