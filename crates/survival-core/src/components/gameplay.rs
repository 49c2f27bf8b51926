//! Session components: the player, harvestables and placed structures.
//!
//! The stateful pieces (`ResourceNode`, `BerryBush`, `SurvivalStats`,
//! `InventoryLedger`, `InteractionMode`, `BuildSession`) come straight from
//! `survival-logic` and are attached as components as-is.

use serde::{Deserialize, Serialize};
use survival_logic::build::StructureSpec;
use survival_logic::constants::ResourceType;

/// Marker for the controlled player. At most one exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player;

/// Which inventory counter a mineable node feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harvestable {
    pub resource: ResourceType,
}

/// Sphere used by targeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub const TREE: Self = Self { radius: 60.0 };
    pub const ROCK: Self = Self { radius: 50.0 };
    pub const BUSH: Self = Self { radius: 40.0 };
    pub const STRUCTURE: Self = Self { radius: 100.0 };

    pub fn for_resource(resource: ResourceType) -> Self {
        match resource {
            ResourceType::Wood => Self::TREE,
            ResourceType::Stone => Self::ROCK,
            ResourceType::Berry => Self::BUSH,
        }
    }
}

/// A committed build part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub spec: StructureSpec,
    /// 1-based placement order.
    pub build_order: u32,
}
