//! Error types for catalog and document operations.
//!
//! Every failure here is an input rejection: the operation returns an error
//! and leaves state untouched. There is no fatal error class in this crate.

use thiserror::Error;

/// Errors returned by the stage catalog, form schema editor, and document store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input was empty or otherwise invalid. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// The operation referenced an id that does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Internal bookkeeping was found inconsistent. Mutators normalize this
    /// state instead of returning it; it only surfaces from explicit audits.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CatalogError::not_found("stage", "stage-xyz");
        assert_eq!(err.to_string(), "stage 'stage-xyz' not found");
    }

    #[test]
    fn test_validation_display() {
        let err = CatalogError::validation("stage name cannot be empty");
        assert_eq!(err.to_string(), "stage name cannot be empty");
    }
}
