//! Seed the default stage configuration
//! Usage: harrow init [--force]

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::StageCatalog;
use crate::fs;
use crate::models::constants::DEFAULT_PROJECT_TYPES;

/// Create the data directory and write the default catalog snapshot.
///
/// Refuses to overwrite an existing snapshot unless `force` is set.
pub fn execute(data_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let dir = fs::data_dir(data_dir.as_deref())?;

    println!("{}", crate::LOGO.cyan());
    println!();

    let snapshot = fs::snapshot::catalog_path(&dir);
    if snapshot.exists() && !force {
        bail!(
            "Catalog snapshot already exists at {}. Re-run with --force to overwrite.",
            snapshot.display()
        );
    }

    let catalog = StageCatalog::with_defaults(&DEFAULT_PROJECT_TYPES);
    let path = fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Catalog initialized {}",
        "✓".green().bold(),
        path.display().to_string().dimmed()
    );
    for project_type in catalog.project_types() {
        let names: Vec<&str> = project_type
            .stages_in_order()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        println!(
            "  {} {} {}",
            "✓".green().bold(),
            project_type.name.bold(),
            names.join(" → ").dimmed()
        );
    }

    Ok(())
}
