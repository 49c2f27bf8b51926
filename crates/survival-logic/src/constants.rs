//! Game constants: resource, material, and buildable types plus their lookup tables.
//!
//! Type names and asset keys are finite tables, so the render and UI
//! collaborators never need reflection to turn an enum into a string.

use serde::{Deserialize, Serialize};

/// Default capacity of a single inventory slot.
pub const DEFAULT_MAX_ITEM_SLOT: u32 = 999;

/// Preview rotation step for the quick-rotate bindings, in degrees.
pub const PREVIEW_ROTATION_STEP: f32 = 15.0;

// ============================================================================
// RESOURCES
// ============================================================================

/// Harvestable resource kinds. Each maps to one inventory counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResourceType {
    Wood = 0,
    Stone = 1,
    Berry = 2,
}

impl ResourceType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Berry => "Berry",
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Wood),
            1 => Some(Self::Stone),
            2 => Some(Self::Berry),
            _ => None,
        }
    }

    pub fn all() -> &'static [ResourceType] {
        &[Self::Wood, Self::Stone, Self::Berry]
    }
}

// ============================================================================
// BUILDING
// ============================================================================

/// Construction material of a structure archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MaterialType {
    Wooden = 0,
    Stone = 1,
}

impl MaterialType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wooden => "Wooden",
            Self::Stone => "Stone",
        }
    }

    /// Inventory counter this material is paid from.
    pub fn resource(self) -> ResourceType {
        match self {
            Self::Wooden => ResourceType::Wood,
            Self::Stone => ResourceType::Stone,
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Wooden),
            1 => Some(Self::Stone),
            _ => None,
        }
    }

    pub fn all() -> &'static [MaterialType] {
        &[Self::Wooden, Self::Stone]
    }
}

/// Structural role of a placeable part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BuildableType {
    Wall = 0,
    Floor = 1,
    Slant = 2,
}

impl BuildableType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Floor => "Floor",
            Self::Slant => "Slant",
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Wall),
            1 => Some(Self::Floor),
            2 => Some(Self::Slant),
            _ => None,
        }
    }

    pub fn all() -> &'static [BuildableType] {
        &[Self::Wall, Self::Floor, Self::Slant]
    }
}

/// Asset key the render collaborator resolves to a mesh, e.g. `building/wooden_wall`.
pub fn structure_asset_key(material: MaterialType, buildable: BuildableType) -> String {
    format!(
        "building/{}_{}",
        material.name().to_lowercase(),
        buildable.name().to_lowercase()
    )
}
