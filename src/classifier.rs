//! Maps a document onto the pipeline stage it belongs to.
//!
//! Classification is computed, never stored: it reads only the
//! `(document type, project type, project status)` triple passed in, so a
//! document always lands in the stage that matches the owning project's
//! current state. The stage catalog is not consulted; the result is a stage
//! *name*, which is how counters, filters, and badges key their grouping.
//!
//! Decision table (ordered, first match wins):
//!
//! 1. Letter of Intent, Validation Report, FS/EFA, DED, POW, ROW → Proposal
//! 2. Bid Opening / Notice of Award / Notice to Proceed → Procurement
//! 3. As Built Plans, Geotag Photos → For Delivery (machinery)
//!    or Implementation (otherwise)
//! 4. Post Geotag Photos → Delivered (machinery) or Completed (otherwise)
//! 5. Anything else → the project's own status label, unchanged

use crate::models::document::{Document, DocumentType};
use crate::models::project::is_machinery;

impl DocumentType {
    /// The stage a document of this type belongs to, resolving the
    /// machinery/construction vocabulary split.
    pub fn stage(&self, project_type: &str) -> &'static str {
        match self {
            DocumentType::LetterOfIntent
            | DocumentType::ValidationReport
            | DocumentType::FeasibilityStudy
            | DocumentType::DetailedEngineeringDesign
            | DocumentType::ProgramOfWork
            | DocumentType::RightOfWay => "Proposal",

            DocumentType::BidOpening
            | DocumentType::NoticeOfAward
            | DocumentType::NoticeToProceed => "Procurement",

            DocumentType::AsBuiltPlans | DocumentType::GeotagPhotos => {
                if is_machinery(project_type) {
                    "For Delivery"
                } else {
                    "Implementation"
                }
            }

            DocumentType::PostGeotagPhotos => {
                if is_machinery(project_type) {
                    "Delivered"
                } else {
                    "Completed"
                }
            }
        }
    }
}

/// Classify a document type given by name. Total: names outside the known
/// set fall through to the project's own status label.
pub fn classify(document_type: &str, project_type: &str, project_status: &str) -> String {
    match document_type.parse::<DocumentType>() {
        Ok(known) => known.stage(project_type).to_string(),
        Err(_) => project_status.to_string(),
    }
}

/// Classify a stored document against its own project snapshot.
pub fn classify_document(document: &Document) -> String {
    document
        .document_type
        .stage(&document.project_type)
        .to_string()
}

/// Group documents by classified stage name, in first-encounter order.
pub fn group_by_stage<'a>(documents: &[&'a Document]) -> Vec<(String, Vec<&'a Document>)> {
    let mut groups: Vec<(String, Vec<&Document>)> = Vec::new();
    for document in documents {
        let stage = classify_document(document);
        match groups.iter_mut().find(|(name, _)| *name == stage) {
            Some((_, members)) => members.push(document),
            None => groups.push((stage, vec![document])),
        }
    }
    groups
}

/// Document count per classified stage name, in first-encounter order.
pub fn stage_counts(documents: &[&Document]) -> Vec<(String, usize)> {
    group_by_stage(documents)
        .into_iter()
        .map(|(stage, members)| (stage, members.len()))
        .collect()
}

/// Share of `count` in `total` as a whole percentage.
///
/// A zero total reads as 0%: an empty pipeline renders an empty progress
/// bar rather than propagating a division by zero.
pub fn completion_percent(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (count as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}
