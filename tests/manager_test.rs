use std::sync::Arc;

use pretty_assertions::assert_eq;

use listing_schema::{
    FieldInput, FieldManager, GroupInput, MemoryStore, SchemaError, SchemaStore, TypeSettings,
};

fn manager() -> FieldManager {
    FieldManager::new(SchemaStore::new(Arc::new(MemoryStore::new())))
}

#[test]
fn test_save_field_roundtrip_sanitizes_input() {
    let manager = manager();
    let saved = manager
        .save_field(
            FieldInput::new("  Engine Size ", " <b>Engine</b> Size ", "text")
                .with_group("specifications")
                .with_description("Displacement class"),
        )
        .unwrap();

    assert_eq!(saved.key, "engine_size");
    assert_eq!(saved.label, "Engine Size");
    assert_eq!(saved.settings, TypeSettings::Text);
    assert!(saved.show_in_admin);
    assert!(!saved.required);
    assert_eq!(saved.position, 999);

    let fetched = manager.field("engine_size").unwrap();
    assert_eq!(fetched, saved);
}

#[test]
fn test_save_field_builds_type_appropriate_settings() {
    let manager = manager();

    let number = manager
        .save_field(FieldInput {
            min: Some("0".to_string()),
            max: Some("200000".to_string()),
            step: Some("0.01".to_string()),
            ..FieldInput::new("odometer", "Odometer", "number").with_group("measurements")
        })
        .unwrap();
    let bounds = number.settings.bounds().unwrap();
    assert_eq!(bounds.min, 0.0);
    assert_eq!(bounds.max, Some(200000.0));
    assert_eq!(bounds.step, 0.01);
    assert!(number.settings.options().is_empty());

    let select = manager
        .save_field(
            FieldInput::new("condition", "Condition", "select").with_options(vec![
                ("New Vehicle".to_string(), "New".to_string()),
                ("used".to_string(), "Used".to_string()),
                ("".to_string(), "dropped".to_string()),
            ]),
        )
        .unwrap();
    let options = select.settings.options();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].value, "new_vehicle");
    assert_eq!(options[0].label, "New");
    assert!(select.settings.bounds().is_none());
}

#[test]
fn test_type_change_leaves_no_stale_attributes() {
    let manager = manager();
    manager
        .save_field(FieldInput {
            min: Some("1".to_string()),
            max: Some("20".to_string()),
            ..FieldInput::new("doors", "Doors", "number")
        })
        .unwrap();

    // switching to select must drop the numeric bounds entirely
    let changed = manager
        .save_field(FieldInput::new("doors", "Doors", "select").with_options(vec![
            ("two".to_string(), "Two".to_string()),
            ("four".to_string(), "Four".to_string()),
        ]))
        .unwrap();
    assert!(changed.settings.bounds().is_none());
    assert_eq!(changed.settings.options().len(), 2);

    let raw = serde_json::to_string(&manager.field("doors").unwrap()).unwrap();
    assert!(!raw.contains("\"min\""));
    assert!(!raw.contains("\"max\""));
}

#[test]
fn test_invalid_input_is_rejected_without_mutation() {
    let manager = manager();
    let before = manager.fields().unwrap();

    let empty_key = manager.save_field(FieldInput::new("€€", "Label", "text"));
    assert!(matches!(empty_key, Err(SchemaError::Validation(_))));

    let empty_label = manager.save_field(FieldInput::new("ok_key", "   ", "text"));
    assert!(matches!(empty_label, Err(SchemaError::Validation(_))));

    let bad_type = manager.save_field(FieldInput::new("ok_key", "Label", "datetime"));
    assert!(matches!(bad_type, Err(SchemaError::Validation(_))));

    assert_eq!(manager.fields().unwrap(), before);
}

#[test]
fn test_delete_field_is_idempotent() {
    let manager = manager();
    manager
        .save_field(FieldInput::new("warranty", "Warranty", "text"))
        .unwrap();

    assert!(manager.delete_field("warranty").unwrap());
    assert!(!manager.delete_field("warranty").unwrap());
    assert!(matches!(
        manager.field("warranty"),
        Err(SchemaError::NotFound(_))
    ));
}

#[test]
fn test_fields_sort_by_position_with_unset_last() {
    let manager = manager();
    for (key, position) in [("third", Some(3)), ("first", Some(1)), ("second", Some(2))] {
        let mut input = FieldInput::new(key, key, "text").with_group("sort_check");
        input.position = position;
        manager.save_field(input).unwrap();
    }
    manager
        .save_field(FieldInput::new("last", "last", "text").with_group("sort_check"))
        .unwrap();

    let ordered: Vec<(String, i64)> = manager
        .fields_by_group("sort_check")
        .unwrap()
        .into_iter()
        .map(|f| (f.key, f.position))
        .collect();
    assert_eq!(
        ordered,
        vec![
            ("first".to_string(), 1),
            ("second".to_string(), 2),
            ("third".to_string(), 3),
            ("last".to_string(), 999),
        ]
    );
}

#[test]
fn test_update_without_position_keeps_stored_position() {
    let manager = manager();
    manager
        .save_field(FieldInput::new("vin_check", "VIN Check", "text").with_position(5))
        .unwrap();

    let updated = manager
        .save_field(FieldInput::new("vin_check", "VIN Check Digit", "text"))
        .unwrap();
    assert_eq!(updated.position, 5);

    let moved = manager
        .save_field(FieldInput::new("vin_check", "VIN Check Digit", "text").with_position(1))
        .unwrap();
    assert_eq!(moved.position, 1);
}

#[test]
fn test_save_group_upsert_and_sort() {
    let manager = manager();
    let saved = manager
        .save_group(GroupInput::new("history", "Vehicle History").with_position(2))
        .unwrap();
    assert_eq!(saved.id, "history");
    assert_eq!(saved.context.to_string(), "normal");
    assert_eq!(saved.priority.to_string(), "high");

    let mut side = GroupInput::new("history", "History").with_position(2);
    side.context = "side".to_string();
    side.priority = "low".to_string();
    let updated = manager.save_group(side).unwrap();
    assert_eq!(updated.label, "History");
    assert_eq!(updated.context.to_string(), "side");
    assert_eq!(updated.priority.to_string(), "low");

    let groups = manager.groups().unwrap();
    assert_eq!(groups.iter().filter(|g| g.id == "history").count(), 1);

    let mut bad = GroupInput::new("broken", "Broken");
    bad.context = "footer".to_string();
    assert!(matches!(
        manager.save_group(bad),
        Err(SchemaError::Validation(_))
    ));
}

#[test]
fn test_delete_group_cascades_to_member_fields() {
    let manager = manager();
    manager
        .save_group(GroupInput::new("history", "Vehicle History"))
        .unwrap();
    manager
        .save_field(FieldInput::new("accidents", "Accidents", "text").with_group("history"))
        .unwrap();
    manager
        .save_field(FieldInput::new("owners", "Previous Owners", "text").with_group("history"))
        .unwrap();
    manager
        .save_field(FieldInput::new("warranty", "Warranty", "text").with_group("specifications"))
        .unwrap();

    assert!(manager.delete_group("history").unwrap());

    let keys: Vec<String> = manager.fields().unwrap().into_iter().map(|f| f.key).collect();
    assert!(!keys.contains(&"accidents".to_string()));
    assert!(!keys.contains(&"owners".to_string()));
    assert!(keys.contains(&"warranty".to_string()));
    assert!(!manager.groups().unwrap().iter().any(|g| g.id == "history"));

    // calling it twice is safe
    assert!(!manager.delete_group("history").unwrap());
}
