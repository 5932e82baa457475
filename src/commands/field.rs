//! Stage form schema administration
//! Usage: harrow field <list|add|remove|set-label|require|option-add|option-remove> ...

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::catalog::StageCatalog;
use crate::fs;
use crate::models::constants::DEFAULT_PROJECT_TYPES;
use crate::models::field::{FieldPatch, FieldType};

fn load(data_dir: &Option<PathBuf>) -> Result<(PathBuf, StageCatalog)> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let catalog = fs::load_or_default(&dir, &DEFAULT_PROJECT_TYPES)?;
    Ok((dir, catalog))
}

/// Print one stage's form schema in insertion order.
pub fn list(data_dir: Option<PathBuf>, project_type: String, stage_id: String) -> Result<()> {
    let (_, catalog) = load(&data_dir)?;

    let stage = catalog
        .project_type(&project_type)
        .and_then(|t| t.stage(&stage_id));
    let Some(stage) = stage else {
        println!(
            "No stage '{}' under project type '{}'",
            stage_id.yellow(),
            project_type
        );
        return Ok(());
    };

    println!("\n{} {}", stage.name.bold(), "form schema".dimmed());
    println!("{}", "─".repeat(40).dimmed());
    if stage.form_fields.is_empty() {
        println!("  (no fields)");
    }
    for field in &stage.form_fields {
        let required = if field.required { " required".red() } else { "".normal() };
        println!(
            "  [{}] {}{}  {}",
            field.field_type,
            field.label,
            required,
            field.id.dimmed()
        );
        if let Some(options) = &field.options {
            for option in options {
                println!("      - {option}");
            }
        }
    }
    println!();

    Ok(())
}

pub fn add(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_type: FieldType,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    let field_id = catalog.add_field(&project_type, &stage_id, field_type)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Added {} field {}",
        "✓".green().bold(),
        field_type.to_string().bold(),
        field_id.dimmed()
    );
    Ok(())
}

pub fn remove(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_id: String,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.remove_field(&project_type, &stage_id, &field_id)?;
    fs::save_catalog(&dir, &catalog)?;

    println!("  {} Removed field '{}'", "✓".green().bold(), field_id);
    Ok(())
}

pub fn set_label(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_id: String,
    label: String,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    let patch = FieldPatch {
        label: Some(label.clone()),
        ..Default::default()
    };
    catalog.update_field(&project_type, &stage_id, &field_id, patch)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Relabeled field '{}' to '{}'",
        "✓".green().bold(),
        field_id,
        label.bold()
    );
    Ok(())
}

pub fn require(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_id: String,
    required: bool,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    let patch = FieldPatch {
        required: Some(required),
        ..Default::default()
    };
    catalog.update_field(&project_type, &stage_id, &field_id, patch)?;
    fs::save_catalog(&dir, &catalog)?;

    let state = if required { "required" } else { "optional" };
    println!(
        "  {} Field '{}' is now {}",
        "✓".green().bold(),
        field_id,
        state.bold()
    );
    Ok(())
}

pub fn option_add(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_id: String,
    option: String,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.add_option(&project_type, &stage_id, &field_id, option.clone())?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Added option '{}' to field '{}'",
        "✓".green().bold(),
        option.bold(),
        field_id
    );
    Ok(())
}

pub fn option_remove(
    data_dir: Option<PathBuf>,
    project_type: String,
    stage_id: String,
    field_id: String,
    index: usize,
) -> Result<()> {
    let (dir, mut catalog) = load(&data_dir)?;

    catalog.remove_option(&project_type, &stage_id, &field_id, index)?;
    fs::save_catalog(&dir, &catalog)?;

    println!(
        "  {} Removed option {} from field '{}'",
        "✓".green().bold(),
        index,
        field_id
    );
    Ok(())
}
