//! HUD read model - everything the UI collaborator displays, in one snapshot.

use serde::Serialize;
use survival_logic::build::BuildSession;
use survival_logic::constants::ResourceType;
use survival_logic::interaction::InteractionMode;
use survival_logic::inventory::InventoryLedger;
use survival_logic::objectives::{GameOutcome, ObjectiveEvaluator};
use survival_logic::stats::{Stat, SurvivalStats};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatView {
    pub current: f32,
    pub max: f32,
}

impl From<Stat> for StatView {
    fn from(stat: Stat) -> Self {
        Self {
            current: stat.current(),
            max: stat.max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewView {
    pub label: String,
    pub asset_key: String,
    pub construction_cost: u32,
    pub yaw_degrees: f32,
}

/// Per-player part of the HUD. Absent while the player cannot be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHud {
    pub health: StatView,
    pub hunger: StatView,
    pub stamina: StatView,
    pub stamina_draining: bool,
    pub wood: u32,
    pub stone: u32,
    pub berries: u32,
    pub total_materials_collected: u64,
    pub menu_open: bool,
    pub building: bool,
    pub preview: Option<PreviewView>,
}

impl PlayerHud {
    pub fn new(
        stats: &SurvivalStats,
        inventory: &InventoryLedger,
        mode: InteractionMode,
        session: Option<&BuildSession>,
    ) -> Self {
        Self {
            health: stats.health().into(),
            hunger: stats.hunger().into(),
            stamina: stats.stamina().into(),
            stamina_draining: stats.is_stamina_draining(),
            wood: inventory.get(ResourceType::Wood),
            stone: inventory.get(ResourceType::Stone),
            berries: inventory.get(ResourceType::Berry),
            total_materials_collected: inventory.total_materials_collected(),
            menu_open: mode.menu_open,
            building: mode.building,
            preview: session.map(|s| PreviewView {
                label: s.spec.label(),
                asset_key: s.spec.asset_key(),
                construction_cost: s.spec.construction_cost,
                yaw_degrees: s.yaw_degrees(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub player: Option<PlayerHud>,
    pub materials_target: u64,
    pub build_parts_count: u32,
    pub build_target: u32,
    pub elapsed_seconds: f32,
    pub remaining_seconds: f32,
    pub outcome: Option<GameOutcome>,
}

impl HudSnapshot {
    pub fn new(
        player: Option<PlayerHud>,
        objectives: &ObjectiveEvaluator,
        build_parts_count: u32,
    ) -> Self {
        Self {
            player,
            materials_target: objectives.config().materials_target,
            build_parts_count,
            build_target: objectives.config().build_target,
            elapsed_seconds: objectives.elapsed(),
            remaining_seconds: objectives.remaining_time(),
            outcome: objectives.outcome(),
        }
    }

    /// "MM:SS" countdown for the objectives panel.
    pub fn remaining_clock(&self) -> String {
        let total = self.remaining_seconds.ceil() as u32;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}
