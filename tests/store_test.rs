use std::sync::Arc;

use listing_schema::schema::defaults;
use listing_schema::{
    FieldDefinition, JsonFileStore, MemoryStore, SchemaStore, SettingsStore, TypeSettings,
};

#[test]
fn test_first_read_bootstraps_defaults_and_persists() {
    let backend = Arc::new(MemoryStore::new());
    let store = SchemaStore::new(backend.clone());

    let fields = store.fields().unwrap();
    assert!(!fields.is_empty());
    assert!(fields.iter().any(|f| f.key == "vin"));

    // the bootstrap was written through, not just returned
    let raw = backend
        .get(listing_schema::store::FIELDS_KEY)
        .unwrap()
        .expect("bootstrap should persist the field list");
    let persisted: Vec<FieldDefinition> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, fields);

    let groups = store.groups().unwrap();
    assert_eq!(groups.len(), 8);
    assert_eq!(groups[0].id, "specifications");
}

#[test]
fn test_empty_stored_list_also_bootstraps() {
    let store = SchemaStore::new(Arc::new(MemoryStore::new()));
    store.replace_fields(&[]).unwrap();
    let fields = store.fields().unwrap();
    assert_eq!(fields, defaults::default_fields());
}

#[test]
fn test_replace_rewrites_the_whole_collection() {
    let store = SchemaStore::new(Arc::new(MemoryStore::new()));
    store.fields().unwrap();

    let single = vec![FieldDefinition::new("only", "Only", TypeSettings::Text)];
    store.replace_fields(&single).unwrap();
    assert_eq!(store.fields().unwrap(), single);
}

#[test]
fn test_custom_mapping_blob_roundtrip() {
    let store = SchemaStore::new(Arc::new(MemoryStore::new()));
    assert!(store.custom_mapping().unwrap().is_none());

    let table = std::collections::BTreeMap::from([(
        "Engine Model".to_string(),
        "engine_configuration".to_string(),
    )]);
    store.set_custom_mapping(&table).unwrap();
    assert_eq!(store.custom_mapping().unwrap(), Some(table));
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    {
        let store = SchemaStore::new(Arc::new(JsonFileStore::new(&path)));
        store.fields().unwrap();
        store
            .replace_groups(&defaults::default_groups()[..3])
            .unwrap();
    }

    let reopened = SchemaStore::new(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reopened.groups().unwrap().len(), 3);
    assert!(reopened.fields().unwrap().iter().any(|f| f.key == "vin"));

    // the write replaced the file in place, no temp file left behind
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn test_file_store_missing_file_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("never_written.json"));
    assert!(store.get("anything").unwrap().is_none());
}
