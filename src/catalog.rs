//! Stage catalog: the full set of project types and their pipelines.
//!
//! This is the root object a configuration snapshot serializes. All stage
//! and field operations are addressed by project type name and delegate to
//! the owning [`ProjectType`] or [`Stage`], so the order invariant is
//! enforced in exactly one place.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::field::{FieldPatch, FieldType};
use crate::models::project::{Direction, ProjectType};
use crate::models::stage::Stage;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageCatalog {
    project_types: Vec<ProjectType>,
}

impl StageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog seeded with the default pipeline for each given project
    /// type name. This is the fallback when no snapshot exists.
    pub fn with_defaults(type_names: &[&str]) -> Self {
        Self {
            project_types: type_names
                .iter()
                .map(|name| ProjectType::with_default_stages(name.to_string()))
                .collect(),
        }
    }

    pub fn project_types(&self) -> &[ProjectType] {
        &self.project_types
    }

    pub fn project_type(&self, name: &str) -> Option<&ProjectType> {
        self.project_types.iter().find(|t| t.name == name)
    }

    fn project_type_mut(&mut self, name: &str) -> Result<&mut ProjectType, CatalogError> {
        self.project_types
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| CatalogError::not_found("project type", name))
    }

    /// Register a project type seeded with its default stages.
    pub fn add_project_type(&mut self, name: &str) -> Result<&ProjectType, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("project type name cannot be empty"));
        }
        if self.project_type(name).is_some() {
            return Err(CatalogError::validation(format!(
                "project type '{name}' already exists"
            )));
        }
        let index = self.project_types.len();
        self.project_types
            .push(ProjectType::with_default_stages(name.to_string()));
        Ok(&self.project_types[index])
    }

    /// Normalize every pipeline. Returns true if any snapshot data had to
    /// be healed.
    pub fn normalize_all(&mut self) -> bool {
        let mut changed = false;
        for project_type in &mut self.project_types {
            changed |= project_type.normalize();
        }
        changed
    }

    /// The ordered pipeline for one project type, for progress steppers.
    pub fn stages_in_order(&self, type_name: &str) -> Result<Vec<&Stage>, CatalogError> {
        let project_type = self
            .project_type(type_name)
            .ok_or_else(|| CatalogError::not_found("project type", type_name))?;
        Ok(project_type.stages_in_order())
    }

    // Stage operations, keyed by project type name.

    pub fn add_stage(&mut self, type_name: &str, name: &str) -> Result<&Stage, CatalogError> {
        self.project_type_mut(type_name)?.add_stage(name)
    }

    pub fn rename_stage(
        &mut self,
        type_name: &str,
        stage_id: &str,
        name: &str,
    ) -> Result<(), CatalogError> {
        self.project_type_mut(type_name)?.rename_stage(stage_id, name)
    }

    pub fn remove_stage(&mut self, type_name: &str, stage_id: &str) -> Result<Stage, CatalogError> {
        self.project_type_mut(type_name)?.remove_stage(stage_id)
    }

    pub fn move_stage(
        &mut self,
        type_name: &str,
        stage_id: &str,
        direction: Direction,
    ) -> Result<(), CatalogError> {
        self.project_type_mut(type_name)?.move_stage(stage_id, direction)
    }

    pub fn reorder_stage(
        &mut self,
        type_name: &str,
        stage_id: &str,
        to_position: u32,
    ) -> Result<(), CatalogError> {
        self.project_type_mut(type_name)?
            .reorder_stage(stage_id, to_position)
    }

    // Form schema operations, keyed by project type name and stage id.

    fn stage_mut(&mut self, type_name: &str, stage_id: &str) -> Result<&mut Stage, CatalogError> {
        self.project_type_mut(type_name)?
            .stage_mut(stage_id)
            .ok_or_else(|| CatalogError::not_found("stage", stage_id))
    }

    pub fn add_field(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_type: FieldType,
    ) -> Result<String, CatalogError> {
        Ok(self.stage_mut(type_name, stage_id)?.add_field(field_type))
    }

    pub fn update_field(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_id: &str,
        patch: FieldPatch,
    ) -> Result<(), CatalogError> {
        self.stage_mut(type_name, stage_id)?.update_field(field_id, patch)
    }

    pub fn remove_field(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_id: &str,
    ) -> Result<(), CatalogError> {
        self.stage_mut(type_name, stage_id)?.remove_field(field_id)?;
        Ok(())
    }

    pub fn add_option(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_id: &str,
        option: String,
    ) -> Result<(), CatalogError> {
        self.stage_mut(type_name, stage_id)?.add_option(field_id, option)
    }

    pub fn update_option(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_id: &str,
        index: usize,
        value: String,
    ) -> Result<(), CatalogError> {
        self.stage_mut(type_name, stage_id)?
            .update_option(field_id, index, value)
    }

    pub fn remove_option(
        &mut self,
        type_name: &str,
        stage_id: &str,
        field_id: &str,
        index: usize,
    ) -> Result<(), CatalogError> {
        self.stage_mut(type_name, stage_id)?.remove_option(field_id, index)
    }
}
