//! Session configuration: everything loaded before play starts.
//!
//! Parsed from JSON, then validated: values that can be corrected are
//! clamped with a warning, values that cannot become a [`ConfigError`].

use serde::{Deserialize, Serialize};

use crate::build::StructureSpec;
use crate::constants::{BuildableType, MaterialType, ResourceType, DEFAULT_MAX_ITEM_SLOT};
use crate::error::ConfigError;
use crate::interaction::InteractionCosts;
use crate::objectives::ObjectiveConfig;
use crate::resource_node::{ResourceNode, ResourceTier};
use crate::stats::{StatsConfig, MIN_UPDATE_INTERVAL};

/// A kind of mineable node placed in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeArchetype {
    pub name: String,
    pub resource: ResourceType,
    /// Most full first.
    pub tiers: Vec<ResourceTier>,
    #[serde(default)]
    pub initial_index: usize,
    /// Tier used when `reset_on_start` is off.
    #[serde(default)]
    pub current_index: usize,
    #[serde(default = "default_true")]
    pub reset_on_start: bool,
}

fn default_true() -> bool {
    true
}

impl NodeArchetype {
    pub fn build(&self) -> Result<ResourceNode, ConfigError> {
        let mut node = ResourceNode::new(&self.name, self.tiers.clone(), self.initial_index)?;
        if !self.reset_on_start {
            node.set_current_index(self.current_index);
        }
        Ok(node)
    }
}

/// Seeded scatter of nodes and bushes around the spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub tree_count: u32,
    pub rock_count: u32,
    pub bush_count: u32,
    pub spawn_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 312,
            tree_count: 12,
            rock_count: 8,
            bush_count: 6,
            spawn_radius: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub stats: StatsConfig,
    pub max_item_slot: u32,
    /// Reach of the interaction ray, in world units.
    pub interaction_range: f32,
    pub costs: InteractionCosts,
    pub objectives: ObjectiveConfig,
    pub structures: Vec<StructureSpec>,
    pub nodes: Vec<NodeArchetype>,
    pub bush_regrowth_time: f32,
    /// Highest a structure may float above the ground.
    pub ground_check_distance: f32,
    pub world: WorldConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let mut structures = Vec::new();
        for material in MaterialType::all() {
            for buildable in BuildableType::all() {
                structures.push(StructureSpec::new(*buildable, *material, 10));
            }
        }

        Self {
            stats: StatsConfig::default(),
            max_item_slot: DEFAULT_MAX_ITEM_SLOT,
            interaction_range: 200.0,
            costs: InteractionCosts::default(),
            objectives: ObjectiveConfig::default(),
            structures,
            nodes: vec![
                NodeArchetype {
                    name: "tree".into(),
                    resource: ResourceType::Wood,
                    tiers: vec![
                        ResourceTier::new(30, "tree_full"),
                        ResourceTier::new(20, "tree_chopped"),
                        ResourceTier::new(10, "tree_stump"),
                        ResourceTier::new(0, "tree_cleared"),
                    ],
                    initial_index: 0,
                    current_index: 0,
                    reset_on_start: true,
                },
                NodeArchetype {
                    name: "rock".into(),
                    resource: ResourceType::Stone,
                    tiers: vec![
                        ResourceTier::new(20, "rock_full"),
                        ResourceTier::new(10, "rock_cracked"),
                        ResourceTier::new(0, "rock_rubble"),
                    ],
                    initial_index: 0,
                    current_index: 0,
                    reset_on_start: true,
                },
            ],
            bush_regrowth_time: 10.0,
            ground_check_distance: 100.0,
            world: WorldConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamp correctable values in place; fail on the rest.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let stats = &mut self.stats;
        clamp_positive("stats.max_health", &mut stats.max_health, 100.0);
        clamp_positive("stats.max_hunger", &mut stats.max_hunger, 100.0);
        clamp_positive("stats.max_stamina", &mut stats.max_stamina, 100.0);
        clamp_min("stats.hunger_interval", &mut stats.hunger_interval, MIN_UPDATE_INTERVAL);
        clamp_min("stats.stamina_interval", &mut stats.stamina_interval, MIN_UPDATE_INTERVAL);
        clamp_min("stats.hunger_decrease_rate", &mut stats.hunger_decrease_rate, 0.0);
        clamp_min("stats.starvation_damage", &mut stats.starvation_damage, 0.0);
        clamp_min("stats.stamina_restore_rate", &mut stats.stamina_restore_rate, 0.0);
        clamp_min("stats.stamina_decrease_rate", &mut stats.stamina_decrease_rate, 0.0);

        clamp_min("costs.berry_collect_cost", &mut self.costs.berry_collect_cost, 0.0);
        clamp_min("costs.mining_cost_per_unit", &mut self.costs.mining_cost_per_unit, 0.0);

        clamp_positive("interaction_range", &mut self.interaction_range, 200.0);
        clamp_positive("objectives.losing_time", &mut self.objectives.losing_time, 300.0);
        clamp_min("bush_regrowth_time", &mut self.bush_regrowth_time, 0.0);
        clamp_min("ground_check_distance", &mut self.ground_check_distance, 0.0);
        clamp_positive("world.spawn_radius", &mut self.world.spawn_radius, 2000.0);

        if self.structures.is_empty() {
            return Err(ConfigError::NoStructures);
        }
        for spec in &mut self.structures {
            if spec.construction_cost == 0 {
                log::warn!("{} has zero construction cost; using 1", spec.label());
                spec.construction_cost = 1;
            }
        }

        for archetype in &self.nodes {
            if archetype.tiers.is_empty() {
                return Err(ConfigError::EmptyTierTable(archetype.name.clone()));
            }
        }
        Ok(())
    }

    pub fn node_archetype(&self, resource: ResourceType) -> Option<&NodeArchetype> {
        self.nodes.iter().find(|n| n.resource == resource)
    }
}

fn clamp_positive(field: &str, value: &mut f32, fallback: f32) {
    if !value.is_finite() || *value <= 0.0 {
        log::warn!("{} must be positive (got {}); using {}", field, value, fallback);
        *value = fallback;
    }
}

fn clamp_min(field: &str, value: &mut f32, min: f32) {
    if value.is_nan() || *value < min {
        log::warn!("{} below {} (got {}); clamping", field, min, value);
        *value = min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let mut config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.structures.len(), 6);
        assert!(config.node_archetype(ResourceType::Wood).is_some());
        assert!(config.node_archetype(ResourceType::Stone).is_some());
        assert!(config.node_archetype(ResourceType::Berry).is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "interaction_range": 350.0 }"#).unwrap();
        assert_eq!(config.interaction_range, 350.0);
        assert_eq!(config.objectives.materials_target, 500);
        assert_eq!(config.stats.max_health, 100.0);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let json = r#"{
            "stats": { "max_health": -10.0, "hunger_interval": 0.0 },
            "costs": { "mining_cost_per_unit": -3.0 },
            "objectives": { "losing_time": 0.0 }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.stats.max_health, 100.0);
        assert!(config.stats.hunger_interval >= MIN_UPDATE_INTERVAL);
        assert_eq!(config.costs.mining_cost_per_unit, 0.0);
        assert_eq!(config.objectives.losing_time, 300.0);
    }

    #[test]
    fn test_zero_cost_structure_bumped() {
        let json = r#"{
            "structures": [
                { "buildable_type": "Wall", "material_type": "Wooden", "construction_cost": 0 }
            ]
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(config.structures[0].construction_cost, 1);
    }

    #[test]
    fn test_empty_tier_table_is_error() {
        let json = r#"{
            "nodes": [ { "name": "ghost", "resource": "Wood", "tiers": [] } ]
        }"#;
        let err = SessionConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTierTable(name) if name == "ghost"));
    }

    #[test]
    fn test_no_structures_is_error() {
        let err = SessionConfig::from_json(r#"{ "structures": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoStructures));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = SessionConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_archetype_without_reset_keeps_current_index() {
        let archetype = NodeArchetype {
            name: "half_rock".into(),
            resource: ResourceType::Stone,
            tiers: vec![
                ResourceTier::new(20, "full"),
                ResourceTier::new(10, "half"),
                ResourceTier::new(0, "gone"),
            ],
            initial_index: 0,
            current_index: 1,
            reset_on_start: false,
        };
        let node = archetype.build().unwrap();
        assert_eq!(node.current_index(), 1);
        assert_eq!(node.remaining(), 10);

        let reset = NodeArchetype {
            reset_on_start: true,
            ..archetype
        };
        assert_eq!(reset.build().unwrap().remaining(), 20);
    }
}
