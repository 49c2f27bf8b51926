//! Build placement economy.
//!
//! A structure archetype names the material it consumes and how much. Previews
//! (the ghost that follows the cursor) never touch the ledger; only
//! [`BuildEconomy::place`] spends materials and counts a build part.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{structure_asset_key, BuildableType, MaterialType, PREVIEW_ROTATION_STEP};
use crate::inventory::InventoryLedger;

/// A placeable structure archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSpec {
    pub buildable_type: BuildableType,
    pub material_type: MaterialType,
    pub construction_cost: u32,
}

impl StructureSpec {
    pub fn new(
        buildable_type: BuildableType,
        material_type: MaterialType,
        construction_cost: u32,
    ) -> Self {
        Self {
            buildable_type,
            material_type,
            construction_cost,
        }
    }

    pub fn asset_key(&self) -> String {
        structure_asset_key(self.material_type, self.buildable_type)
    }

    /// Display label, e.g. "Wooden Wall".
    pub fn label(&self) -> String {
        format!("{} {}", self.material_type.name(), self.buildable_type.name())
    }
}

/// Where a structure would go, as reported by the world collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    /// Height above the ground directly below `position`.
    pub ground_distance: f32,
}

/// Checked before any materials are spent.
pub trait PlacementValidator {
    fn is_valid_placement(&self, spec: &StructureSpec, placement: &Placement) -> bool;
}

/// Accepts every placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl PlacementValidator for AlwaysValid {
    fn is_valid_placement(&self, _spec: &StructureSpec, _placement: &Placement) -> bool {
        true
    }
}

/// Rejects placements floating more than `max_ground_distance` above the ground.
#[derive(Debug, Clone, Copy)]
pub struct GroundCheck {
    pub max_ground_distance: f32,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            max_ground_distance: 100.0,
        }
    }
}

impl PlacementValidator for GroundCheck {
    fn is_valid_placement(&self, _spec: &StructureSpec, placement: &Placement) -> bool {
        placement.ground_distance >= 0.0 && placement.ground_distance <= self.max_ground_distance
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementDenied {
    #[error("placement rejected by validator")]
    InvalidPlacement,

    #[error("need {required} {material:?} materials, have {available}")]
    InsufficientMaterials {
        material: MaterialType,
        required: u32,
        available: u32,
    },
}

/// A committed placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedStructure {
    pub spec: StructureSpec,
    pub placement: Placement,
    /// Build parts placed so far, including this one.
    pub build_parts_count: u32,
}

pub fn can_afford(available: u32, cost: u32) -> bool {
    available >= cost
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEconomy {
    build_parts_count: u32,
}

impl BuildEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, check affordability, then spend and count. All or nothing.
    pub fn place(
        &mut self,
        spec: &StructureSpec,
        placement: Placement,
        inventory: &mut InventoryLedger,
        validator: &dyn PlacementValidator,
    ) -> Result<PlacedStructure, PlacementDenied> {
        if !validator.is_valid_placement(spec, &placement) {
            return Err(PlacementDenied::InvalidPlacement);
        }

        let resource = spec.material_type.resource();
        let available = inventory.get(resource);
        if !can_afford(available, spec.construction_cost) {
            return Err(PlacementDenied::InsufficientMaterials {
                material: spec.material_type,
                required: spec.construction_cost,
                available,
            });
        }

        inventory.set(resource, (available - spec.construction_cost) as i64);
        self.build_parts_count += 1;

        Ok(PlacedStructure {
            spec: spec.clone(),
            placement,
            build_parts_count: self.build_parts_count,
        })
    }

    pub fn build_parts_count(&self) -> u32 {
        self.build_parts_count
    }
}

/// An in-progress placement preview. Holds no resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSession {
    pub spec: StructureSpec,
    yaw_degrees: f32,
}

impl BuildSession {
    pub fn new(spec: StructureSpec) -> Self {
        Self {
            spec,
            yaw_degrees: 0.0,
        }
    }

    pub fn rotate_left(&mut self) {
        self.rotate_yaw(PREVIEW_ROTATION_STEP);
    }

    pub fn rotate_right(&mut self) {
        self.rotate_yaw(-PREVIEW_ROTATION_STEP);
    }

    /// Rotate by `degrees`, normalized into `[0, 360)`.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            return;
        }
        self.yaw_degrees = (self.yaw_degrees + degrees).rem_euclid(360.0);
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }
}
