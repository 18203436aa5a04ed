#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use circledb_wasm::Lookup;

const PATNA: &str = r#"[
    { "village_en": "Ramnagar", "othana_no": "11", "CIRCLE": "Bihta" },
    { "village_en": "Sultanpur", "othana_no": "14", "CIRCLE": "Bihta" }
]"#;

#[wasm_bindgen_test]
fn loads_and_searches() {
    let mut lookup = Lookup::new();
    let count = lookup.load_district_json("Patna", PATNA).unwrap();
    assert_eq!(count, 2, "expected both rows, got {count}");

    lookup.type_number("14");
    assert_eq!(lookup.total_villages(), 1);
    assert!(lookup.results().unwrap().is_object());
}

#[wasm_bindgen_test]
fn lists_districts() {
    let districts = Lookup::districts().unwrap();
    assert!(districts.is_object());
}
