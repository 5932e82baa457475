//! File-backed persistence for catalog and document snapshots.
//!
//! All invariant logic lives in the pure core; this module only serializes
//! snapshots on demand. Everything is plain JSON under a single data
//! directory.

pub mod snapshot;
pub mod store;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

pub use snapshot::{load_catalog, load_or_default, save_catalog};
pub use store::{load_store, save_store};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HARROW_DATA_DIR";

/// Resolve the data directory: explicit flag, then `HARROW_DATA_DIR`, then
/// the platform data directory.
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    match dirs::data_dir() {
        Some(base) => Ok(base.join("harrow")),
        None => bail!(
            "Could not determine a data directory. Pass --data-dir or set {DATA_DIR_ENV}."
        ),
    }
}
