//! Project type: owner of an ordered stage pipeline, plus the reordering
//! engine that keeps stage orders a contiguous `1..N` permutation.
//!
//! Every mutator re-derives positions from the stored orders once (a stable
//! sort at entry), applies the change positionally, then renumbers the whole
//! list in one pass. Stored order values are never trusted beyond that
//! initial sort key, so a pipeline loaded from a corrupt snapshot heals on
//! the first operation instead of propagating the corruption.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::constants::{CONSTRUCTION_STAGES, DELIVERY_STAGES, MACHINERY_TYPE};
use crate::models::stage::Stage;

/// Direction for single-step stage moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => anyhow::bail!("Invalid direction: {s}. Valid values: up, down"),
        }
    }
}

/// Whether a project type uses the delivery stage vocabulary
/// (For Delivery/Delivered) instead of the construction one
/// (Implementation/Completed).
pub fn is_machinery(project_type_name: &str) -> bool {
    project_type_name == MACHINERY_TYPE
}

/// The default stage names for a project type, selected by name.
pub fn default_stage_names(project_type_name: &str) -> &'static [&'static str] {
    if is_machinery(project_type_name) {
        &DELIVERY_STAGES
    } else {
        &CONSTRUCTION_STAGES
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl ProjectType {
    pub fn new(name: String) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("type-{}", &suffix[..8]),
            name,
            stages: Vec::new(),
        }
    }

    /// A project type seeded with its default stage pipeline.
    pub fn with_default_stages(name: String) -> Self {
        let mut project_type = Self::new(name);
        for stage_name in default_stage_names(&project_type.name) {
            project_type
                .stages
                .push(Stage::new(stage_name.to_string(), 0));
        }
        project_type.renumber();
        project_type
    }

    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn stage_mut(&mut self, stage_id: &str) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|s| s.id == stage_id)
    }

    /// Find a stage by its display name (first match).
    pub fn stage_by_name(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// The pipeline in display order. After any mutator this is simply the
    /// storage order, but sort anyway so read-only callers get a correct
    /// stepper even from an untouched, out-of-invariant snapshot.
    pub fn stages_in_order(&self) -> Vec<&Stage> {
        let mut stages: Vec<&Stage> = self.stages.iter().collect();
        stages.sort_by_key(|s| s.order);
        stages
    }

    /// Check that stage orders are exactly the set `{1..N}`.
    pub fn order_invariant_holds(&self) -> bool {
        let mut orders: Vec<u32> = self.stages.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        orders
            .iter()
            .enumerate()
            .all(|(idx, order)| *order == idx as u32 + 1)
    }

    /// Audit the order invariant, returning the violation as an error.
    pub fn check_order_invariant(&self) -> Result<(), CatalogError> {
        if self.order_invariant_holds() {
            Ok(())
        } else {
            let orders: Vec<u32> = self.stages.iter().map(|s| s.order).collect();
            Err(CatalogError::Invariant(format!(
                "stage orders for '{}' are {:?}, expected 1..{}",
                self.name,
                orders,
                self.stages.len()
            )))
        }
    }

    /// Restore the order invariant: stable-sort by stored order, renumber.
    ///
    /// Returns true if any stage's order changed. Idempotent; called at the
    /// start of every mutator so a requested change is always applied to a
    /// well-formed list.
    pub fn normalize(&mut self) -> bool {
        let before: Vec<u32> = self.stages.iter().map(|s| s.order).collect();
        self.stages.sort_by_key(|s| s.order);
        self.renumber();
        let after: Vec<u32> = self.stages.iter().map(|s| s.order).collect();
        before != after
    }

    fn renumber(&mut self) {
        for (idx, stage) in self.stages.iter_mut().enumerate() {
            stage.order = idx as u32 + 1;
        }
    }

    fn position_of(&self, stage_id: &str) -> Result<usize, CatalogError> {
        self.stages
            .iter()
            .position(|s| s.id == stage_id)
            .ok_or_else(|| CatalogError::not_found("stage", stage_id))
    }

    /// Append a stage at the end of the pipeline (`order = N + 1`).
    pub fn add_stage(&mut self, name: &str) -> Result<&Stage, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("stage name cannot be empty"));
        }

        self.normalize();
        let index = self.stages.len();
        self.stages.push(Stage::new(name.to_string(), index as u32 + 1));
        Ok(&self.stages[index])
    }

    /// Rename a stage. Orders are untouched.
    pub fn rename_stage(&mut self, stage_id: &str, name: &str) -> Result<(), CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("stage name cannot be empty"));
        }

        self.normalize();
        match self.stage_mut(stage_id) {
            Some(stage) => {
                stage.name = name.to_string();
                Ok(())
            }
            None => Err(CatalogError::not_found("stage", stage_id)),
        }
    }

    /// Delete a stage and its fields, then renumber survivors to `1..N-1`
    /// from their relative position.
    pub fn remove_stage(&mut self, stage_id: &str) -> Result<Stage, CatalogError> {
        self.normalize();
        let index = self.position_of(stage_id)?;
        let removed = self.stages.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Move a stage to `to_position` (1-based, clamped to `[1, N]`) and
    /// renumber the whole pipeline in one pass.
    ///
    /// This is the general operation that single-step moves and drag-and-drop
    /// both reduce to.
    pub fn reorder_stage(&mut self, stage_id: &str, to_position: u32) -> Result<(), CatalogError> {
        self.normalize();
        let from = self.position_of(stage_id)?;

        let count = self.stages.len() as u32;
        let to = to_position.clamp(1, count) as usize - 1;

        let stage = self.stages.remove(from);
        self.stages.insert(to, stage);
        self.renumber();
        Ok(())
    }

    /// Swap a stage with its neighbor. Already at the boundary is a no-op,
    /// not an error.
    pub fn move_stage(&mut self, stage_id: &str, direction: Direction) -> Result<(), CatalogError> {
        self.normalize();
        let from = self.position_of(stage_id)?;

        let target = match direction {
            Direction::Up => {
                if from == 0 {
                    return Ok(());
                }
                from as u32 // current position is from + 1; one step up
            }
            Direction::Down => {
                if from + 1 == self.stages.len() {
                    return Ok(());
                }
                from as u32 + 2
            }
        };

        self.reorder_stage(stage_id, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(names: &[&str]) -> ProjectType {
        let mut project_type = ProjectType::new("Infrastructure".to_string());
        for name in names {
            project_type.add_stage(name).unwrap();
        }
        project_type
    }

    fn names_in_order(project_type: &ProjectType) -> Vec<String> {
        project_type
            .stages_in_order()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    #[test]
    fn test_add_stage_appends_last() {
        let mut project_type = pipeline(&["Proposal", "Procurement"]);
        let stage = project_type.add_stage("Implementation").unwrap();
        assert_eq!(stage.order, 3);
        assert!(project_type.order_invariant_holds());
    }

    #[test]
    fn test_add_stage_rejects_empty_name() {
        let mut project_type = pipeline(&["Proposal"]);
        assert!(matches!(
            project_type.add_stage("   "),
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(project_type.stages.len(), 1);
    }

    #[test]
    fn test_remove_stage_closes_gap() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        let id = project_type.stage_by_name("Procurement").unwrap().id.clone();

        let removed = project_type.remove_stage(&id).unwrap();
        assert_eq!(removed.name, "Procurement");
        assert_eq!(
            names_in_order(&project_type),
            vec!["Proposal", "Implementation"]
        );
        assert!(project_type.order_invariant_holds());
    }

    #[test]
    fn test_reorder_to_front() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        let id = project_type
            .stage_by_name("Implementation")
            .unwrap()
            .id
            .clone();

        project_type.reorder_stage(&id, 1).unwrap();
        assert_eq!(
            names_in_order(&project_type),
            vec!["Implementation", "Proposal", "Procurement"]
        );
        assert!(project_type.order_invariant_holds());
    }

    #[test]
    fn test_reorder_clamps_position() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        let id = project_type.stage_by_name("Proposal").unwrap().id.clone();

        project_type.reorder_stage(&id, 99).unwrap();
        assert_eq!(
            names_in_order(&project_type),
            vec!["Procurement", "Implementation", "Proposal"]
        );

        project_type.reorder_stage(&id, 0).unwrap();
        assert_eq!(
            names_in_order(&project_type),
            vec!["Proposal", "Procurement", "Implementation"]
        );
    }

    #[test]
    fn test_move_up_and_down() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        let id = project_type.stage_by_name("Procurement").unwrap().id.clone();

        project_type.move_stage(&id, Direction::Up).unwrap();
        assert_eq!(
            names_in_order(&project_type),
            vec!["Procurement", "Proposal", "Implementation"]
        );

        project_type.move_stage(&id, Direction::Down).unwrap();
        assert_eq!(
            names_in_order(&project_type),
            vec!["Proposal", "Procurement", "Implementation"]
        );
    }

    #[test]
    fn test_move_at_boundary_is_noop() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        let first = project_type.stage_by_name("Proposal").unwrap().id.clone();
        let last = project_type
            .stage_by_name("Implementation")
            .unwrap()
            .id
            .clone();

        let orders_before: Vec<u32> = project_type.stages.iter().map(|s| s.order).collect();
        project_type.move_stage(&first, Direction::Up).unwrap();
        project_type.move_stage(&last, Direction::Down).unwrap();
        let orders_after: Vec<u32> = project_type.stages.iter().map(|s| s.order).collect();

        assert_eq!(orders_before, orders_after);
        assert_eq!(
            names_in_order(&project_type),
            vec!["Proposal", "Procurement", "Implementation"]
        );
    }

    #[test]
    fn test_unknown_stage_id_fails() {
        let mut project_type = pipeline(&["Proposal"]);
        assert!(matches!(
            project_type.reorder_stage("stage-missing", 1),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            project_type.rename_stage("stage-missing", "X"),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            project_type.remove_stage("stage-missing"),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_normalize_heals_duplicate_orders() {
        let mut project_type = pipeline(&["Proposal", "Procurement", "Implementation"]);
        // Corrupt the stored orders behind the engine's back.
        project_type.stages[0].order = 7;
        project_type.stages[1].order = 7;
        project_type.stages[2].order = 2;
        assert!(!project_type.order_invariant_holds());
        assert!(project_type.check_order_invariant().is_err());

        let changed = project_type.normalize();
        assert!(changed);
        assert!(project_type.order_invariant_holds());
        // Stable sort: Implementation(2) first, then the two 7s in
        // storage order.
        assert_eq!(
            names_in_order(&project_type),
            vec!["Implementation", "Proposal", "Procurement"]
        );
    }

    #[test]
    fn test_mutators_heal_before_applying() {
        let mut project_type = pipeline(&["Proposal", "Procurement"]);
        project_type.stages[0].order = 5;
        project_type.stages[1].order = 5;

        project_type.add_stage("Implementation").unwrap();
        assert!(project_type.order_invariant_holds());
        assert_eq!(project_type.stages_in_order().len(), 3);
    }

    #[test]
    fn test_default_stages_by_vocabulary() {
        let construction = ProjectType::with_default_stages("Infrastructure".to_string());
        assert_eq!(
            names_in_order(&construction),
            vec![
                "Proposal",
                "Procurement",
                "Implementation",
                "Completed",
                "Inventory"
            ]
        );

        let delivery = ProjectType::with_default_stages("Machinery".to_string());
        assert_eq!(
            names_in_order(&delivery),
            vec![
                "Proposal",
                "Procurement",
                "For Delivery",
                "Delivered",
                "Inventory"
            ]
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
