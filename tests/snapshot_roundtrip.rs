//! Integration tests for snapshot persistence and fallback defaults

use harrow::catalog::StageCatalog;
use harrow::fs;
use harrow::models::document::{DocumentStore, DocumentType, VersionMeta};
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

fn names(catalog: &StageCatalog, project_type: &str) -> Vec<String> {
    catalog
        .stages_in_order(project_type)
        .expect("Should list stages")
        .iter()
        .map(|s| s.name.clone())
        .collect()
}

#[test]
fn test_catalog_roundtrip() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let dir = temp_dir.path();

    let mut catalog = StageCatalog::with_defaults(&["Infrastructure", "Machinery"]);
    catalog
        .add_stage("Infrastructure", "Turnover")
        .expect("Should add stage");
    fs::save_catalog(dir, &catalog).expect("Should save catalog");

    let loaded = fs::load_catalog(dir)
        .expect("Should load catalog")
        .expect("Snapshot should exist");

    assert_eq!(
        names(&loaded, "Infrastructure"),
        vec![
            "Proposal",
            "Procurement",
            "Implementation",
            "Completed",
            "Inventory",
            "Turnover"
        ]
    );
    assert_eq!(names(&loaded, "Machinery")[2], "For Delivery");
}

#[test]
fn test_missing_snapshot_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let dir = temp_dir.path();

    assert!(fs::load_catalog(dir).expect("Should tolerate missing file").is_none());

    let catalog =
        fs::load_or_default(dir, &["Infrastructure", "Machinery"]).expect("Should fall back");

    assert_eq!(
        names(&catalog, "Infrastructure"),
        vec![
            "Proposal",
            "Procurement",
            "Implementation",
            "Completed",
            "Inventory"
        ]
    );
    assert_eq!(
        names(&catalog, "Machinery"),
        vec![
            "Proposal",
            "Procurement",
            "For Delivery",
            "Delivered",
            "Inventory"
        ]
    );
}

#[test]
fn test_corrupt_snapshot_orders_are_healed_on_load() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let dir = temp_dir.path();

    // A snapshot written by hand with duplicate and gapped orders.
    let snapshot = r#"{
        "project_types": [
            {
                "id": "type-1",
                "name": "Infrastructure",
                "stages": [
                    { "id": "stage-a", "name": "Proposal", "order": 9 },
                    { "id": "stage-b", "name": "Procurement", "order": 9 },
                    { "id": "stage-c", "name": "Implementation", "order": 1 }
                ]
            }
        ]
    }"#;
    std::fs::create_dir_all(dir).expect("Should create dir");
    std::fs::write(fs::snapshot::catalog_path(dir), snapshot).expect("Should write snapshot");

    let catalog = fs::load_catalog(dir)
        .expect("Should load catalog")
        .expect("Snapshot should exist");

    let project_type = catalog
        .project_type("Infrastructure")
        .expect("Should find project type");
    assert!(project_type.order_invariant_holds());
    assert_eq!(
        names(&catalog, "Infrastructure"),
        vec!["Implementation", "Proposal", "Procurement"]
    );
}

#[test]
fn test_document_store_roundtrip() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let dir = temp_dir.path();

    let mut store = DocumentStore::new();
    let id = store
        .create_document(
            DocumentType::GeotagPhotos,
            "proj-5".to_string(),
            "Machinery".to_string(),
            "Procurement".to_string(),
            VersionMeta {
                uploaded_by: "inspector".to_string(),
                size: 123,
                change_note: None,
            },
        )
        .id
        .clone();
    store
        .add_version(
            &id,
            VersionMeta {
                uploaded_by: "inspector".to_string(),
                size: 456,
                change_note: Some("Retaken on site".to_string()),
            },
        )
        .expect("Should add version");
    fs::save_store(dir, &store).expect("Should save store");

    let loaded = fs::load_store(dir).expect("Should load store");
    assert_eq!(loaded.len(), 1);

    let versions = loaded.list_versions(&id).expect("Should list versions");
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version, 2);
    assert!(versions[0].current);
    assert!(!versions[1].current);
}

#[test]
fn test_missing_store_is_empty() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let store = fs::load_store(temp_dir.path()).expect("Should tolerate missing file");
    assert!(store.is_empty());
}

#[test]
#[serial]
fn test_data_dir_resolution_order() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let explicit = temp_dir.path().join("explicit");
    let from_env = temp_dir.path().join("from-env");

    std::env::set_var(fs::DATA_DIR_ENV, &from_env);

    // Explicit flag wins over the environment.
    let resolved = fs::data_dir(Some(explicit.as_path())).expect("Should resolve");
    assert_eq!(resolved, explicit);

    // Environment wins over the platform default.
    let resolved = fs::data_dir(None).expect("Should resolve");
    assert_eq!(resolved, from_env);

    std::env::remove_var(fs::DATA_DIR_ENV);

    // Platform default is used last; it ends with our app directory.
    if let Ok(resolved) = fs::data_dir(None) {
        assert!(resolved.ends_with(Path::new("harrow")));
    }
}
