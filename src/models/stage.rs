//! Stage entity: one named, ordered step in a project type's pipeline.
//!
//! A stage's identity (`id`) is stable for its whole life; `order` is the
//! only member the reordering engine rewrites. Orders are 1-based and, per
//! project type, always form the exact set `{1..N}`; the engine in
//! [`crate::models::project`] maintains that invariant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::field::{FieldPatch, FieldType, FormField};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    /// 1-based position in the pipeline.
    pub order: u32,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

impl Stage {
    pub fn new(name: String, order: u32) -> Self {
        let id = Self::generate_id(&name);
        Self {
            id,
            name,
            order,
            form_fields: Vec::new(),
        }
    }

    pub fn generate_id(name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let suffix = Uuid::new_v4().simple().to_string();
        format!("stage-{}-{}", slug.trim_matches('-'), &suffix[..8])
    }

    /// Append a new field with editor defaults and return its id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let field = FormField::new(field_type);
        let id = field.id.clone();
        self.form_fields.push(field);
        id
    }

    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.form_fields.iter().find(|f| f.id == field_id)
    }

    fn field_mut(&mut self, field_id: &str) -> Result<&mut FormField, CatalogError> {
        self.form_fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| CatalogError::not_found("field", field_id))
    }

    /// Apply a partial update to one field.
    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> Result<(), CatalogError> {
        self.field_mut(field_id)?.apply_patch(patch)
    }

    /// Delete a field. Remaining fields keep their insertion order.
    pub fn remove_field(&mut self, field_id: &str) -> Result<FormField, CatalogError> {
        let index = self
            .form_fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| CatalogError::not_found("field", field_id))?;
        Ok(self.form_fields.remove(index))
    }

    pub fn add_option(&mut self, field_id: &str, option: String) -> Result<(), CatalogError> {
        self.field_mut(field_id)?.add_option(option)
    }

    pub fn update_option(
        &mut self,
        field_id: &str,
        index: usize,
        value: String,
    ) -> Result<(), CatalogError> {
        self.field_mut(field_id)?.update_option(index, value)
    }

    pub fn remove_option(&mut self, field_id: &str, index: usize) -> Result<(), CatalogError> {
        self.field_mut(field_id)?.remove_option(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_sluggified_and_unique() {
        let a = Stage::generate_id("For Delivery");
        let b = Stage::generate_id("For Delivery");
        assert!(a.starts_with("stage-for-delivery-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_stage_has_no_fields() {
        let stage = Stage::new("Proposal".to_string(), 1);
        assert_eq!(stage.order, 1);
        assert!(stage.form_fields.is_empty());
    }

    #[test]
    fn test_add_and_remove_field_preserves_insertion_order() {
        let mut stage = Stage::new("Proposal".to_string(), 1);
        let first = stage.add_field(FieldType::Text);
        let second = stage.add_field(FieldType::Date);
        let third = stage.add_field(FieldType::File);

        stage.remove_field(&second).unwrap();
        let ids: Vec<&str> = stage.form_fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), third.as_str()]);
    }

    #[test]
    fn test_update_unknown_field_fails() {
        let mut stage = Stage::new("Proposal".to_string(), 1);
        let result = stage.update_field("field-missing", FieldPatch::default());
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_option_ops_route_to_field() {
        let mut stage = Stage::new("Procurement".to_string(), 2);
        let select = stage.add_field(FieldType::Select);

        stage.add_option(&select, "Public Bidding".to_string()).unwrap();
        stage
            .update_option(&select, 0, "Negotiated".to_string())
            .unwrap();
        stage.remove_option(&select, 1).unwrap();

        let field = stage.field(&select).unwrap();
        assert_eq!(
            field.options,
            Some(vec![
                "Negotiated".to_string(),
                "Public Bidding".to_string()
            ])
        );
    }
}
