//! End-to-end scenario: bootstrap, extend the schema, decode a vehicle,
//! derive render plans.

use std::sync::Arc;

use listing_schema::{
    DecodedAttribute, FieldInput, FieldManager, FieldValue, FormatOptions, MemoryStore,
    SchemaStore, Widget, build_listing_draft, format_value, plan,
};

#[test]
fn test_bootstrap_extend_decode_render() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = SchemaStore::new(Arc::new(MemoryStore::new()));
    let manager = FieldManager::new(store);

    // fresh install: first read bootstraps the built-in schema
    let fields = manager.fields()?;
    assert!(!fields.is_empty());
    assert!(fields.iter().any(|f| f.key == "vin"));

    // an admin adds a field at runtime
    let odometer = manager.save_field(FieldInput {
        min: Some("0".to_string()),
        ..FieldInput::new("odometer", "Odometer", "number").with_group("measurements")
    })?;
    assert_eq!(odometer.key, "odometer");

    let measurement_keys: Vec<String> = manager
        .fields_by_group("measurements")?
        .into_iter()
        .map(|f| f.key)
        .collect();
    assert!(measurement_keys.contains(&"odometer".to_string()));

    // decode data flows through the mapping engine into a draft
    let attributes = vec![
        DecodedAttribute::new("Make", "Honda"),
        DecodedAttribute::new("Model", "Civic"),
        DecodedAttribute::new("Model Year", "2021"),
        DecodedAttribute::new("Fuel Type - Primary", "Gasoline"),
    ];
    let draft = build_listing_draft(&manager, "1HGCV1F34MA000000", &attributes)?;
    assert_eq!(draft.title, "2021 Honda Civic");
    assert_eq!(draft.updates.get("fuel_type"), Some(&FieldValue::text("gasoline")));

    // the render layer gets widget plans and formatted read values
    let fuel = manager.field("fuel_type")?;
    let descriptor = plan(&fuel, draft.updates.get("fuel_type").cloned());
    assert_eq!(descriptor.widget, Widget::Select);
    assert!(!descriptor.options.is_empty());

    let shown = format_value(
        &fuel,
        draft.updates.get("fuel_type").unwrap(),
        &FormatOptions::default(),
    );
    assert_eq!(shown, "Gasoline");
    Ok(())
}
