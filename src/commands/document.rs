//! Document registry administration
//! Usage: harrow doc <create|upload|versions|by-stage> ...

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::classifier;
use crate::fs;
use crate::models::constants::DEFAULT_PROJECT_TYPES;
use crate::models::document::{DocumentType, VersionMeta};

/// Register a new document; its first upload becomes version 1.
pub fn create(
    data_dir: Option<PathBuf>,
    document_type: DocumentType,
    project_id: String,
    project_type: String,
    project_status: String,
    uploaded_by: String,
    size: u64,
    note: Option<String>,
) -> Result<()> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let mut store = fs::load_store(&dir)?;

    let document = store.create_document(
        document_type,
        project_id,
        project_type,
        project_status,
        VersionMeta {
            uploaded_by,
            size,
            change_note: note,
        },
    );
    let id = document.id.clone();
    let stage = classifier::classify_document(document);
    fs::save_store(&dir, &store)?;

    println!(
        "  {} Registered {} as {} {}",
        "✓".green().bold(),
        document_type.to_string().bold(),
        id.bold(),
        format!("(stage: {stage})").dimmed()
    );
    Ok(())
}

/// Append a new version to an existing document.
pub fn upload(
    data_dir: Option<PathBuf>,
    document_id: String,
    uploaded_by: String,
    size: u64,
    note: Option<String>,
) -> Result<()> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let mut store = fs::load_store(&dir)?;

    let version = store.add_version(
        &document_id,
        VersionMeta {
            uploaded_by,
            size,
            change_note: note,
        },
    )?;
    let number = version.version;
    fs::save_store(&dir, &store)?;

    println!(
        "  {} Uploaded version {} of '{}'",
        "✓".green().bold(),
        number.to_string().bold(),
        document_id
    );
    Ok(())
}

/// Print a document's version history, newest first.
pub fn versions(data_dir: Option<PathBuf>, document_id: String) -> Result<()> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let store = fs::load_store(&dir)?;

    let versions = store.list_versions(&document_id)?;

    println!("\n{} {}", document_id.bold(), "version history".dimmed());
    println!("{}", "─".repeat(40).dimmed());
    for version in versions {
        let marker = if version.current {
            "current".green().bold()
        } else {
            "".normal()
        };
        let note = version
            .change_note
            .as_deref()
            .map(|n| format!(" - {n}"))
            .unwrap_or_default();
        println!(
            "  v{:<3} {}  {} bytes  {} {}{}",
            version.version,
            version.uploaded_at.format("%Y-%m-%d %H:%M"),
            version.size,
            version.uploaded_by,
            marker,
            note.dimmed()
        );
    }
    println!();

    Ok(())
}

/// Group one project's documents by classified stage, walking the project
/// type's configured pipeline in order.
pub fn by_stage(data_dir: Option<PathBuf>, project_id: String) -> Result<()> {
    let dir = fs::data_dir(data_dir.as_deref())?;
    let store = fs::load_store(&dir)?;
    let catalog = fs::load_or_default(&dir, &DEFAULT_PROJECT_TYPES)?;

    let documents = store.for_project(&project_id);
    if documents.is_empty() {
        println!("No documents registered for project '{}'", project_id.yellow());
        return Ok(());
    }

    let counts = classifier::stage_counts(&documents);
    let total = documents.len();

    // Walk the configured pipeline where we can so the summary reads in
    // stage order; classifications outside the pipeline follow at the end.
    let project_type = documents[0].project_type.clone();
    let pipeline: Vec<String> = match catalog.project_type(&project_type) {
        Some(t) => t.stages_in_order().iter().map(|s| s.name.clone()).collect(),
        None => Vec::new(),
    };

    println!(
        "\n{} {} {}",
        project_id.bold(),
        format!("({project_type})").dimmed(),
        format!("{total} document(s)").dimmed()
    );
    println!("{}", "─".repeat(40).dimmed());

    let count_for = |stage: &str| -> usize {
        counts
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    for stage in &pipeline {
        let count = count_for(stage);
        let percent = classifier::completion_percent(count, total);
        println!("  {:<16} {:>3}  {}", stage, count, format!("{percent}%").dimmed());
    }
    for (stage, count) in &counts {
        if !pipeline.contains(stage) {
            let percent = classifier::completion_percent(*count, total);
            println!(
                "  {:<16} {:>3}  {}",
                stage,
                count,
                format!("{percent}%").dimmed()
            );
        }
    }
    println!();

    Ok(())
}
