//! The interaction decision point: may the player harvest the thing in front of them?
//!
//! An interaction either applies completely (node or bush mutated, stamina
//! spent, inventory credited) or not at all.

use serde::{Deserialize, Serialize};

use crate::constants::ResourceType;
use crate::inventory::InventoryLedger;
use crate::regrowth::BerryBush;
use crate::resource_node::ResourceNode;
use crate::stats::SurvivalStats;

/// Stamina pricing for harvesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionCosts {
    /// When false, harvesting is free and never gated on stamina.
    pub stamina_gating: bool,
    /// Flat stamina cost of picking a bush.
    pub berry_collect_cost: f32,
    /// Stamina per unit of material mined from a node.
    pub mining_cost_per_unit: f32,
}

impl Default for InteractionCosts {
    fn default() -> Self {
        Self {
            stamina_gating: true,
            berry_collect_cost: 10.0,
            mining_cost_per_unit: 3.0,
        }
    }
}

/// Player modes that suppress interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMode {
    pub menu_open: bool,
    pub building: bool,
}

impl InteractionMode {
    pub fn is_interactive(&self) -> bool {
        !self.menu_open && !self.building
    }
}

/// What the world collaborator says the player is looking at.
#[derive(Debug)]
pub enum InteractionTarget<'a> {
    Node {
        resource: ResourceType,
        node: &'a mut ResourceNode,
    },
    Bush(&'a mut BerryBush),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denial {
    NoTarget,
    NotInteractive,
    NotHarvestable,
    Depleted,
    Regrowing,
    /// Node sits at its deepest tier; no chunk left to take.
    NothingToHarvest,
    InsufficientStamina { required: f32, available: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    Harvested {
        resource: ResourceType,
        amount: u32,
        stamina_spent: f32,
        /// The target's visual state changed (new node tier, bush emptied).
        visual_changed: bool,
    },
    Denied(Denial),
}

impl InteractionOutcome {
    pub fn is_harvested(&self) -> bool {
        matches!(self, Self::Harvested { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionArbiter {
    costs: InteractionCosts,
}

impl InteractionArbiter {
    pub fn new(costs: InteractionCosts) -> Self {
        Self { costs }
    }

    pub fn costs(&self) -> &InteractionCosts {
        &self.costs
    }

    pub fn interact(
        &self,
        mode: InteractionMode,
        target: Option<InteractionTarget<'_>>,
        stats: &mut SurvivalStats,
        inventory: &mut InventoryLedger,
    ) -> InteractionOutcome {
        if !mode.is_interactive() {
            return InteractionOutcome::Denied(Denial::NotInteractive);
        }

        match target {
            None => InteractionOutcome::Denied(Denial::NoTarget),
            Some(InteractionTarget::Other) => InteractionOutcome::Denied(Denial::NotHarvestable),
            Some(InteractionTarget::Bush(bush)) => self.collect_berries(bush, stats, inventory),
            Some(InteractionTarget::Node { resource, node }) => {
                self.mine_node(resource, node, stats, inventory)
            }
        }
    }

    fn collect_berries(
        &self,
        bush: &mut BerryBush,
        stats: &mut SurvivalStats,
        inventory: &mut InventoryLedger,
    ) -> InteractionOutcome {
        if bush.is_collected() {
            return InteractionOutcome::Denied(Denial::Regrowing);
        }

        let cost = self.stamina_cost(self.costs.berry_collect_cost);
        if let Err(denial) = spend_stamina(stats, cost) {
            return InteractionOutcome::Denied(denial);
        }

        bush.collect();
        inventory.add(ResourceType::Berry, 1);

        InteractionOutcome::Harvested {
            resource: ResourceType::Berry,
            amount: 1,
            stamina_spent: cost,
            visual_changed: true,
        }
    }

    fn mine_node(
        &self,
        resource: ResourceType,
        node: &mut ResourceNode,
        stats: &mut SurvivalStats,
        inventory: &mut InventoryLedger,
    ) -> InteractionOutcome {
        if node.is_depleted() {
            return InteractionOutcome::Denied(Denial::Depleted);
        }

        let chunk = node.current_chunk_amount();
        if chunk == 0 {
            return InteractionOutcome::Denied(Denial::NothingToHarvest);
        }

        let unit_cost = self.stamina_cost(self.costs.mining_cost_per_unit);
        let spent = chunk as f32 * unit_cost;
        if let Err(denial) = spend_stamina(stats, spent) {
            return InteractionOutcome::Denied(denial);
        }

        // A chunk never exceeds what remains, so the whole chunk comes out
        let tier_before = node.current_index();
        let mined = node.mine_chunk();
        inventory.add(resource, mined);

        log::debug!(
            "Mined {} {} (stamina -{:.1}, {} left)",
            mined,
            resource.name(),
            spent,
            node.remaining()
        );

        InteractionOutcome::Harvested {
            resource,
            amount: mined,
            stamina_spent: spent,
            visual_changed: node.current_index() != tier_before,
        }
    }

    fn stamina_cost(&self, configured: f32) -> f32 {
        if self.costs.stamina_gating {
            configured.max(0.0)
        } else {
            0.0
        }
    }
}

fn spend_stamina(stats: &mut SurvivalStats, required: f32) -> Result<(), Denial> {
    let available = stats.stamina().current();
    if stats.try_spend_stamina(required) {
        Ok(())
    } else {
        Err(Denial::InsufficientStamina {
            required,
            available,
        })
    }
}
