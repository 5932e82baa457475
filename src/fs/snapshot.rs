//! Catalog snapshot I/O
//!
//! The whole stage configuration round-trips through one JSON file,
//! `catalog.json`, in the data directory. Loading tolerates a missing file
//! (callers fall back to default pipelines) and heals snapshots whose stage
//! orders no longer satisfy the `1..N` invariant.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog::StageCatalog;

/// Path of the catalog snapshot inside the data directory.
pub fn catalog_path(data_dir: &Path) -> PathBuf {
    data_dir.join("catalog.json")
}

/// Write the catalog snapshot, creating the data directory if needed.
pub fn save_catalog(data_dir: &Path, catalog: &StageCatalog) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let path = catalog_path(data_dir);
    let json =
        serde_json::to_string_pretty(catalog).context("Failed to serialize catalog snapshot")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write catalog snapshot: {}", path.display()))?;

    debug!(path = %path.display(), "saved catalog snapshot");
    Ok(path)
}

/// Read the catalog snapshot, or return None if none has been saved yet.
pub fn load_catalog(data_dir: &Path) -> Result<Option<StageCatalog>> {
    let path = catalog_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog snapshot: {}", path.display()))?;
    let mut catalog: StageCatalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog snapshot: {}", path.display()))?;

    if catalog.normalize_all() {
        warn!(
            path = %path.display(),
            "catalog snapshot had out-of-invariant stage orders; normalized"
        );
    }

    debug!(path = %path.display(), "loaded catalog snapshot");
    Ok(Some(catalog))
}

/// Read the catalog snapshot, falling back to default pipelines for the
/// given project type names when no snapshot exists.
pub fn load_or_default(data_dir: &Path, default_types: &[&str]) -> Result<StageCatalog> {
    match load_catalog(data_dir)? {
        Some(catalog) => Ok(catalog),
        None => {
            debug!("no catalog snapshot found; using default pipelines");
            Ok(StageCatalog::with_defaults(default_types))
        }
    }
}
