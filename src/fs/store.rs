//! Document registry I/O
//!
//! Documents and their version chains round-trip through `documents.json`
//! next to the catalog snapshot. A missing file is an empty registry.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::document::DocumentStore;

/// Path of the document registry inside the data directory.
pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join("documents.json")
}

/// Write the document registry, creating the data directory if needed.
pub fn save_store(data_dir: &Path, store: &DocumentStore) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let path = store_path(data_dir);
    let json =
        serde_json::to_string_pretty(store).context("Failed to serialize document registry")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write document registry: {}", path.display()))?;

    debug!(path = %path.display(), "saved document registry");
    Ok(path)
}

/// Read the document registry, or an empty one if none has been saved yet.
pub fn load_store(data_dir: &Path) -> Result<DocumentStore> {
    let path = store_path(data_dir);
    if !path.exists() {
        return Ok(DocumentStore::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read document registry: {}", path.display()))?;
    let store: DocumentStore = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse document registry: {}", path.display()))?;

    debug!(path = %path.display(), documents = store.len(), "loaded document registry");
    Ok(store)
}
