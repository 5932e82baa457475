//! Integration tests for document version chains

use harrow::error::CatalogError;
use harrow::models::document::{DocumentStore, DocumentType, VersionMeta};

fn meta(uploaded_by: &str, size: u64) -> VersionMeta {
    VersionMeta {
        uploaded_by: uploaded_by.to_string(),
        size,
        change_note: None,
    }
}

fn store_with_document() -> (DocumentStore, String) {
    let mut store = DocumentStore::new();
    let id = store
        .create_document(
            DocumentType::ProgramOfWork,
            "proj-1".to_string(),
            "Infrastructure".to_string(),
            "Proposal".to_string(),
            meta("engineer", 1000),
        )
        .id
        .clone();
    (store, id)
}

#[test]
fn test_create_document_starts_chain_at_one() {
    let (store, id) = store_with_document();

    let current = store.current_version(&id).expect("Should have a current version");
    assert_eq!(current.version, 1);
    assert!(current.current);
}

#[test]
fn test_versions_are_contiguous_descending_with_unique_current() {
    let (mut store, id) = store_with_document();
    for round in 0..4 {
        store
            .add_version(&id, meta("reviewer", 2000 + round))
            .expect("Should add version");
    }

    let versions = store.list_versions(&id).expect("Should list versions");

    // Contiguous descending from the total count.
    let numbers: Vec<u32> = versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, vec![5, 4, 3, 2, 1]);

    // Exactly one current, and it is the first in descending order.
    let current_flags: Vec<bool> = versions.iter().map(|v| v.current).collect();
    assert_eq!(
        current_flags,
        vec![true, false, false, false, false]
    );
}

#[test]
fn test_add_version_demotes_prior_current() {
    let (mut store, id) = store_with_document();

    let second = store
        .add_version(&id, meta("reviewer", 2000))
        .expect("Should add version");
    assert_eq!(second.version, 2);

    let current = store.current_version(&id).expect("Should have a current version");
    assert_eq!(current.version, 2);
    assert_eq!(current.uploaded_by, "reviewer");
}

#[test]
fn test_unknown_document_fails_with_not_found() {
    let (mut store, _) = store_with_document();

    assert!(matches!(
        store.add_version("doc-missing", meta("engineer", 1)),
        Err(CatalogError::NotFound { .. })
    ));
    assert!(matches!(
        store.current_version("doc-missing"),
        Err(CatalogError::NotFound { .. })
    ));
    assert!(matches!(
        store.list_versions("doc-missing"),
        Err(CatalogError::NotFound { .. })
    ));
}

#[test]
fn test_version_history_preserves_upload_metadata() {
    let (mut store, id) = store_with_document();
    store
        .add_version(
            &id,
            VersionMeta {
                uploaded_by: "inspector".to_string(),
                size: 9999,
                change_note: Some("Revised after site visit".to_string()),
            },
        )
        .expect("Should add version");

    let versions = store.list_versions(&id).expect("Should list versions");
    assert_eq!(versions[0].uploaded_by, "inspector");
    assert_eq!(versions[0].size, 9999);
    assert_eq!(
        versions[0].change_note.as_deref(),
        Some("Revised after site visit")
    );
    // The original upload is untouched.
    assert_eq!(versions[1].uploaded_by, "engineer");
    assert_eq!(versions[1].size, 1000);
}
