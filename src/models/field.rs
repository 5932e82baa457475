//! Form field schema for stage data-entry forms.
//!
//! Each stage optionally carries an ordered list of typed fields that an
//! administrator edits through the form schema editor. Fields keep insertion
//! order; there is no order invariant like the one on stages.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::constants::DEFAULT_FIELD_OPTIONS;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Date,
    File,
    Select,
    Textarea,
    Checkbox,
    Radio,
}

impl FieldType {
    /// Whether fields of this type carry a list of selectable options.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Select => "select",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for FieldType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "email" => Ok(FieldType::Email),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            "file" => Ok(FieldType::File),
            "select" => Ok(FieldType::Select),
            "textarea" => Ok(FieldType::Textarea),
            "checkbox" => Ok(FieldType::Checkbox),
            "radio" => Ok(FieldType::Radio),
            _ => anyhow::bail!(
                "Invalid field type: {s}. Valid values: text, email, number, date, file, select, textarea, checkbox, radio"
            ),
        }
    }
}

/// Validation metadata attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldValidation {
    /// A validation block with no constraints set.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.pattern.is_none()
    }
}

/// A single data-entry field owned by a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Present only for select/radio fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

/// Partial update applied to a field by `update_field`.
///
/// `None` members leave the current value in place. A `validation` patch
/// replaces the whole validation block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FormField {
    /// Create a field of the given type with editor defaults.
    ///
    /// Select and radio fields start with two placeholder options; all other
    /// types carry no option list. New fields are optional until an
    /// administrator marks them required.
    pub fn new(field_type: FieldType) -> Self {
        let options = if field_type.has_options() {
            Some(
                DEFAULT_FIELD_OPTIONS
                    .iter()
                    .map(|o| o.to_string())
                    .collect(),
            )
        } else {
            None
        };

        Self {
            id: Self::generate_id(),
            field_type,
            label: format!("New {field_type} field"),
            placeholder: None,
            required: false,
            options,
            validation: None,
        }
    }

    pub fn generate_id() -> String {
        format!("field-{}", Uuid::new_v4().simple())
    }

    /// Apply a partial update, validating each patched member.
    ///
    /// A patched label must be non-empty after trimming, and a patched
    /// `pattern` must compile as a regular expression.
    pub fn apply_patch(&mut self, patch: FieldPatch) -> Result<(), CatalogError> {
        if let Some(label) = &patch.label {
            if label.trim().is_empty() {
                return Err(CatalogError::validation("field label cannot be empty"));
            }
        }
        if let Some(validation) = &patch.validation {
            if let Some(pattern) = &validation.pattern {
                regex::Regex::new(pattern).map_err(|e| {
                    CatalogError::validation(format!("invalid field pattern '{pattern}': {e}"))
                })?;
            }
        }

        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            self.placeholder = Some(placeholder);
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(validation) = patch.validation {
            self.validation = if validation.is_empty() {
                None
            } else {
                Some(validation)
            };
        }

        Ok(())
    }

    fn options_mut(&mut self) -> Result<&mut Vec<String>, CatalogError> {
        match self.options.as_mut() {
            Some(options) => Ok(options),
            None => Err(CatalogError::validation(format!(
                "field '{}' is a {} field and has no options",
                self.label, self.field_type
            ))),
        }
    }

    /// Append an option. Fails for field types without an option list.
    pub fn add_option(&mut self, option: String) -> Result<(), CatalogError> {
        self.options_mut()?.push(option);
        Ok(())
    }

    /// Replace the option at `index` (0-based).
    pub fn update_option(&mut self, index: usize, value: String) -> Result<(), CatalogError> {
        let options = self.options_mut()?;
        match options.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CatalogError::not_found("option", index.to_string())),
        }
    }

    /// Remove the option at `index` (0-based).
    pub fn remove_option(&mut self, index: usize) -> Result<(), CatalogError> {
        let options = self.options_mut()?;
        if index >= options.len() {
            return Err(CatalogError::not_found("option", index.to_string()));
        }
        options.remove(index);
        Ok(())
    }
}
