//! Classify a document type against a project
//! Usage: harrow classify <document-type> <project-type> <project-status>

use anyhow::Result;
use colored::Colorize;

use crate::classifier;

/// Print the stage a document of this type belongs to.
///
/// Unknown document types are not an error: they classify to the project's
/// own status label, which is exactly what the dashboards display.
pub fn execute(document_type: String, project_type: String, project_status: String) -> Result<()> {
    let stage = classifier::classify(&document_type, &project_type, &project_status);

    println!(
        "  {} → {}",
        document_type.dimmed(),
        stage.bold().green()
    );
    Ok(())
}
