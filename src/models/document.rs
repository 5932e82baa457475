//! Documents and their append-only version chains.
//!
//! A document links immutably to the project it was uploaded for; which
//! pipeline stage it belongs to is never stored; it is computed on demand
//! by [`crate::classifier`] so it always reflects the project's current
//! status. Versions are numbered `1..N` with no gaps, are immutable once
//! created, and exactly one (the highest-numbered) is current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

/// The fixed set of known document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Letter of Intent")]
    LetterOfIntent,
    #[serde(rename = "Validation Report")]
    ValidationReport,
    /// Feasibility Study / Economic and Financial Analysis.
    #[serde(rename = "FS/EFA")]
    FeasibilityStudy,
    /// Detailed Engineering Design.
    #[serde(rename = "DED")]
    DetailedEngineeringDesign,
    /// Program of Work.
    #[serde(rename = "POW")]
    ProgramOfWork,
    /// Right of Way. Not applicable to machinery projects; callers must not
    /// offer it for that project type.
    #[serde(rename = "ROW")]
    RightOfWay,
    #[serde(rename = "Bid Opening Document")]
    BidOpening,
    #[serde(rename = "Notice of Award Document")]
    NoticeOfAward,
    #[serde(rename = "Notice to Proceed Document")]
    NoticeToProceed,
    #[serde(rename = "As Built Plans")]
    AsBuiltPlans,
    #[serde(rename = "Geotag Photos")]
    GeotagPhotos,
    #[serde(rename = "Post Geotag Photos")]
    PostGeotagPhotos,
}

impl DocumentType {
    pub const ALL: [DocumentType; 12] = [
        DocumentType::LetterOfIntent,
        DocumentType::ValidationReport,
        DocumentType::FeasibilityStudy,
        DocumentType::DetailedEngineeringDesign,
        DocumentType::ProgramOfWork,
        DocumentType::RightOfWay,
        DocumentType::BidOpening,
        DocumentType::NoticeOfAward,
        DocumentType::NoticeToProceed,
        DocumentType::AsBuiltPlans,
        DocumentType::GeotagPhotos,
        DocumentType::PostGeotagPhotos,
    ];

    /// The display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::LetterOfIntent => "Letter of Intent",
            DocumentType::ValidationReport => "Validation Report",
            DocumentType::FeasibilityStudy => "FS/EFA",
            DocumentType::DetailedEngineeringDesign => "DED",
            DocumentType::ProgramOfWork => "POW",
            DocumentType::RightOfWay => "ROW",
            DocumentType::BidOpening => "Bid Opening Document",
            DocumentType::NoticeOfAward => "Notice of Award Document",
            DocumentType::NoticeToProceed => "Notice to Proceed Document",
            DocumentType::AsBuiltPlans => "As Built Plans",
            DocumentType::GeotagPhotos => "Geotag Photos",
            DocumentType::PostGeotagPhotos => "Post Geotag Photos",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown document type: {s}"))
    }
}

/// One immutable upload in a document's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// 1-based, strictly increasing with no gaps.
    pub version: u32,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
    /// File size in bytes.
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_note: Option<String>,
    /// Exactly one version per document carries this flag.
    #[serde(default)]
    pub current: bool,
}

/// Upload metadata supplied when creating a document or adding a version.
#[derive(Debug, Clone)]
pub struct VersionMeta {
    pub uploaded_by: String,
    pub size: u64,
    pub change_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub document_type: DocumentType,
    pub project_id: String,
    pub project_type: String,
    pub project_status: String,
    /// Ascending by version number; kept private so the chain stays
    /// append-only.
    versions: Vec<DocumentVersion>,
}

impl Document {
    /// Create a document with its first upload as version 1, marked current.
    pub fn new(
        document_type: DocumentType,
        project_id: String,
        project_type: String,
        project_status: String,
        meta: VersionMeta,
    ) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        let mut document = Self {
            id: format!("doc-{}", &suffix[..12]),
            document_type,
            project_id,
            project_type,
            project_status,
            versions: Vec::new(),
        };
        document.push_version(meta);
        document
    }

    fn push_version(&mut self, meta: VersionMeta) -> &DocumentVersion {
        if let Some(previous) = self.versions.last_mut() {
            previous.current = false;
        }
        let version = self.versions.len() as u32 + 1;
        self.versions.push(DocumentVersion {
            version,
            uploaded_at: Utc::now(),
            uploaded_by: meta.uploaded_by,
            size: meta.size,
            change_note: meta.change_note,
            current: true,
        });
        &self.versions[version as usize - 1]
    }

    /// Append version `N + 1` and demote the prior current version.
    pub fn add_version(&mut self, meta: VersionMeta) -> &DocumentVersion {
        self.push_version(meta)
    }

    /// The unique current version (highest-numbered). `None` only for a
    /// chain deserialized from a snapshot with no versions.
    pub fn current_version(&self) -> Option<&DocumentVersion> {
        self.versions.last()
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Full history, newest first. This is the canonical listing order.
    pub fn versions_desc(&self) -> Vec<&DocumentVersion> {
        self.versions.iter().rev().collect()
    }
}

/// In-memory registry of all documents, insertion-ordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, document_id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    fn get_mut(&mut self, document_id: &str) -> Result<&mut Document, CatalogError> {
        self.documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| CatalogError::not_found("document", document_id))
    }

    /// All documents uploaded for one project, in upload order.
    pub fn for_project(&self, project_id: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.project_id == project_id)
            .collect()
    }

    /// Register a new document with its first version.
    pub fn create_document(
        &mut self,
        document_type: DocumentType,
        project_id: String,
        project_type: String,
        project_status: String,
        meta: VersionMeta,
    ) -> &Document {
        let index = self.documents.len();
        self.documents.push(Document::new(
            document_type,
            project_id,
            project_type,
            project_status,
            meta,
        ));
        &self.documents[index]
    }

    /// Append a version to an existing document.
    pub fn add_version(
        &mut self,
        document_id: &str,
        meta: VersionMeta,
    ) -> Result<&DocumentVersion, CatalogError> {
        Ok(self.get_mut(document_id)?.add_version(meta))
    }

    /// The current version of a document.
    pub fn current_version(&self, document_id: &str) -> Result<&DocumentVersion, CatalogError> {
        let document = self
            .get(document_id)
            .ok_or_else(|| CatalogError::not_found("document", document_id))?;
        document.current_version().ok_or_else(|| {
            CatalogError::Invariant(format!("document '{document_id}' has no versions"))
        })
    }

    /// A document's history, newest first.
    pub fn list_versions(
        &self,
        document_id: &str,
    ) -> Result<Vec<&DocumentVersion>, CatalogError> {
        let document = self
            .get(document_id)
            .ok_or_else(|| CatalogError::not_found("document", document_id))?;
        Ok(document.versions_desc())
    }
}
