use std::collections::BTreeMap;
use std::sync::Arc;

use listing_schema::{
    DecodedAttribute, FieldManager, MemoryStore, SchemaStore, apply_mapping,
};

fn manager() -> FieldManager {
    FieldManager::new(SchemaStore::new(Arc::new(MemoryStore::new())))
}

#[test]
fn test_default_mapping_used_when_no_custom_table() {
    let manager = manager();
    let table = manager.decode_mapping().unwrap();
    assert_eq!(table.len(), 13);
    assert_eq!(table.get("Make").map(String::as_str), Some("make"));
    assert_eq!(
        table.get("Engine Brake (hp) From").map(String::as_str),
        Some("horsepower")
    );
}

#[test]
fn test_custom_mapping_replaces_defaults_wholesale() {
    let manager = manager();
    let mut custom = BTreeMap::new();
    custom.insert("Make".to_string(), "manufacturer".to_string());
    manager.set_decode_mapping(&custom).unwrap();

    let table = manager.decode_mapping().unwrap();
    // no merge with the built-in table
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("Make").map(String::as_str), Some("manufacturer"));

    // an empty custom table falls back to the defaults in full
    manager.set_decode_mapping(&BTreeMap::new()).unwrap();
    assert_eq!(manager.decode_mapping().unwrap().len(), 13);
}

#[test]
fn test_apply_mapping_updates_and_raw_dump() {
    let manager = manager();
    let records = vec![
        DecodedAttribute::new("Make", "Honda"),
        DecodedAttribute::new("Unknown Field", "x"),
    ];
    let outcome = manager.apply_mapping(&records).unwrap();

    assert_eq!(outcome.updates.len(), 1);
    assert_eq!(outcome.updates.get("make").map(String::as_str), Some("Honda"));
    assert!(outcome.raw_dump.contains("Make: Honda"));
    assert!(outcome.raw_dump.contains("Unknown Field: x"));
}

#[test]
fn test_apply_mapping_later_duplicate_wins() {
    let table = BTreeMap::from([("Make".to_string(), "make".to_string())]);
    let records = vec![
        DecodedAttribute::new("Make", "Honda"),
        DecodedAttribute::new("Make", "Acura"),
    ];
    let outcome = apply_mapping(&table, &records);
    assert_eq!(outcome.updates.get("make").map(String::as_str), Some("Acura"));
}

#[test]
fn test_apply_mapping_skips_empty_and_null_values() {
    let table = BTreeMap::from([
        ("Make".to_string(), "make".to_string()),
        ("Trim".to_string(), "trim".to_string()),
    ]);
    let records = vec![
        DecodedAttribute::new("Make", "  "),
        DecodedAttribute {
            variable: "Trim".to_string(),
            value: None,
        },
        DecodedAttribute::new("Model", "Civic"),
    ];
    let outcome = apply_mapping(&table, &records);

    assert!(outcome.updates.is_empty());
    assert_eq!(outcome.raw_dump, "Model: Civic");
}

#[test]
fn test_apply_mapping_sanitizes_values() {
    let table = BTreeMap::from([("Make".to_string(), "make".to_string())]);
    let records = vec![DecodedAttribute::new("Make", " <i>Honda</i>  Motor ")];
    let outcome = apply_mapping(&table, &records);
    assert_eq!(
        outcome.updates.get("make").map(String::as_str),
        Some("Honda Motor")
    );
}
