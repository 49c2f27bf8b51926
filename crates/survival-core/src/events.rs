//! Outbound notifications for the render and UI collaborators.
//!
//! The engine queues these as they happen; collaborators pull them with
//! [`crate::engine::SimulationEngine::drain_events`] once per frame.

use hecs::Entity;
use serde::Serialize;
use survival_logic::constants::ResourceType;
use survival_logic::objectives::GameOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    /// A node moved to a new depletion tier; swap its visual.
    TierChanged {
        #[serde(skip)]
        entity: Entity,
        tier_index: usize,
        visual_tag: String,
        depleted: bool,
    },
    /// Material landed in the inventory.
    Harvested {
        resource: ResourceType,
        amount: u32,
        stamina_spent: f32,
    },
    /// Berries were picked; the bush shows as empty until regrown.
    BushCollected {
        #[serde(skip)]
        entity: Entity,
    },
    /// Regrowth fraction in `[0, 1]`, once per tick while regrowing.
    RegrowthProgress {
        #[serde(skip)]
        entity: Entity,
        progress: f32,
    },
    BerriesRegrown {
        #[serde(skip)]
        entity: Entity,
    },
    StructurePlaced {
        #[serde(skip)]
        entity: Entity,
        asset_key: String,
        label: String,
        build_parts_count: u32,
    },
    HealthDepleted,
    GameEnded(GameOutcome),
}

impl SimEvent {
    /// Short tag for log lines and harness output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TierChanged { .. } => "tier_changed",
            Self::Harvested { .. } => "harvested",
            Self::BushCollected { .. } => "bush_collected",
            Self::RegrowthProgress { .. } => "regrowth_progress",
            Self::BerriesRegrown { .. } => "berries_regrown",
            Self::StructurePlaced { .. } => "structure_placed",
            Self::HealthDepleted => "health_depleted",
            Self::GameEnded(_) => "game_ended",
        }
    }
}
