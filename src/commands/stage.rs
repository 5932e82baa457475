//! Stage pipeline administration
//! Usage: harrow stage <list|add|rename|remove|move|reorder> ...

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::StageCatalog;
use crate::fs;
use crate::models::constants::DEFAULT_PROJECT_TYPES;
use crate::models::project::Direction;

fn load(data_dir: &Option<PathBuf>) -> Result<(PathBuf, StageCatalog)> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let catalog = fs::load_or_default(&dir, &DEFAULT_PROJECT_TYPES)?;
    Ok((dir, catalog))
}

/// Print every project type's pipeline, or just one with `--project-type`.
pub fn list(data_dir: Option<PathBuf>, project_type: Option<String>) -> Result<()> {
    let (_, catalog) = load(&data_dir)?;

    let selected: Vec<_> = catalog
        .project_types()
        .iter()
        .filter(|t| project_type.as_deref().map_or(true, |name| t.name == name))
        .collect();

    if selected.is_empty() {
        if let Some(name) = project_type {
            println!("No project type named '{}'", name.yellow());
        } else {
            println!("No project types configured. Run {} first.", "harrow init".bold());
        }
        return Ok(());
    }

    for project_type in selected {
        println!("\n{}", project_type.name.bold());
        println!("{}", "─".repeat(40).dimmed());
        for stage in project_type.stages_in_order() {
            let fields = match stage.form_fields.len() {
                0 => String::new(),
                1 => " (1 field)".to_string(),
                n => format!(" ({n} fields)"),
            };
            println!(
                "  {}. {}{}  {}",
                stage.order,
                stage.name,
                fields.dimmed(),
                stage.id.dimmed()
            );
        }
    }
    println!();

    Ok(())
}

pub fn add(data_dir: Option<PathBuf>, project_type: String, name: String) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    let stage = catalog.add_stage(&project_type, &name)?;
    let order = stage.order;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Added stage '{}' to {} at position {}",
        "✓".green().bold(),
        name.bold(),
        project_type,
        order
    );
    Ok(())
}

pub fn rename(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    name: String,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.rename_stage(&project_type, &stage_id, &name)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Renamed stage '{}' to '{}'",
        "✓".green().bold(),
        stage_id,
        name.bold()
    );
    Ok(())
}

pub fn remove(data_dir: Option<PathBuf>, project_type: String, stage_id: String) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    let removed = catalog.remove_stage(&project_type, &stage_id)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Removed stage '{}' from {} ({} remaining)",
        "✓".green().bold(),
        removed.name.bold(),
        project_type,
        catalog
            .project_type(&project_type)
            .map(|t| t.stages.len())
            .unwrap_or(0)
    );
    Ok(())
}

pub fn move_stage(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    direction: Direction,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.move_stage(&project_type, &stage_id, direction)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Moved stage '{}' {}",
        "✓".green().bold(),
        stage_id,
        direction
    );
    Ok(())
}

pub fn reorder(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    position: u32,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.reorder_stage(&project_type, &stage_id, position)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Reordered stage '{}' to position {}",
        "✓".green().bold(),
        stage_id,
        position
    );
    Ok(())
}
