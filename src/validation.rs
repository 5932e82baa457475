//! Input validation for CLI-supplied identifiers and names.
//!
//! IDs are used to address stages, fields, and documents on the command line
//! and may end up in file paths, so they are restricted to a safe character
//! set. Display names (stage names, labels) are freer but must be non-empty
//! and printable.

use anyhow::{bail, Result};

/// Maximum allowed length for IDs (stage, field, document).
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum allowed length for display names and labels.
pub const MAX_NAME_LENGTH: usize = 120;

/// Validates that an ID is safe for use in lookups and file paths.
///
/// An ID is valid if:
/// - It is not empty
/// - It is no longer than MAX_ID_LENGTH characters
/// - It contains only alphanumeric characters, dashes, and underscores
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("ID cannot be empty");
    }

    if id.len() > MAX_ID_LENGTH {
        bail!(
            "ID too long: {} characters (max {})",
            id.len(),
            MAX_ID_LENGTH
        );
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        bail!("ID '{id}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    Ok(())
}

/// Validates a display name (stage name, project type name, field label).
///
/// A name is valid if it is non-empty after trimming, within length limits,
/// and free of control characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    if let Some(ch) = name.chars().find(|c| c.is_control()) {
        bail!("Name contains control character {ch:?}");
    }

    Ok(())
}

/// Clap value parser for validating ID arguments.
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for validating name arguments.
pub fn clap_name_validator(s: &str) -> Result<String, String> {
    validate_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_valid() {
        assert!(validate_id("stage-proposal-3f2a91bc").is_ok());
        assert!(validate_id("field_01").is_ok());
        assert!(validate_id("doc-9").is_ok());
    }

    #[test]
    fn test_validate_id_empty() {
        let result = validate_id("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_id_too_long() {
        let long_id = "a".repeat(MAX_ID_LENGTH + 1);
        let result = validate_id(&long_id);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_id_invalid_chars() {
        assert!(validate_id("stage/proposal").is_err());
        assert!(validate_id("../passwd").is_err());
        assert!(validate_id("stage proposal").is_err());
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Proposal").is_ok());
        assert!(validate_name("For Delivery").is_ok());
        assert!(validate_name("FS/EFA").is_ok());
    }

    #[test]
    fn test_validate_name_empty_or_whitespace() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_name_control_chars() {
        assert!(validate_name("Proposal\u{0007}").is_err());
    }

    #[test]
    fn test_clap_validators() {
        assert!(clap_id_validator("valid-id").is_ok());
        assert!(clap_id_validator("../invalid").is_err());

        assert!(clap_name_validator("For Delivery").is_ok());
        assert!(clap_name_validator("  ").is_err());
    }
}
