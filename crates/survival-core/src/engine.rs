//! Simulation engine - main entry point for running a survival session

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use survival_logic::build::{
    BuildEconomy, BuildSession, GroundCheck, Placement, PlacementDenied,
};
use survival_logic::config::SessionConfig;
use survival_logic::constants::ResourceType;
use survival_logic::error::ConfigError;
use survival_logic::interaction::{
    Denial, InteractionArbiter, InteractionMode, InteractionOutcome, InteractionTarget,
};
use survival_logic::inventory::InventoryLedger;
use survival_logic::objectives::{GameOutcome, ObjectiveEvaluator, ObjectiveProgress};
use survival_logic::regrowth::BerryBush;
use survival_logic::resource_node::ResourceNode;
use survival_logic::stats::SurvivalStats;

use crate::components::*;
use crate::events::SimEvent;
use crate::generation::{self, generate_world, WorldLayout};
use crate::hud::{HudSnapshot, PlayerHud};
use crate::systems::*;

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("no player in the world")]
    NoPlayer,

    #[error("session has ended")]
    SessionOver,

    #[error("no structure archetype at index {0}")]
    UnknownStructure(usize),

    #[error("not in building mode")]
    NotBuilding,

    #[error(transparent)]
    Denied(#[from] PlacementDenied),
}

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing all entities
    pub world: World,
    config: SessionConfig,
    arbiter: InteractionArbiter,
    economy: BuildEconomy,
    objectives: ObjectiveEvaluator,
    validator: GroundCheck,
    /// Cached player handle; re-resolved whenever it goes stale.
    player: Option<Entity>,
    layout: Option<WorldLayout>,
    events: Vec<SimEvent>,
    /// Scaled seconds since start
    sim_time: f64,
    time_scale: f32,
}

impl SimulationEngine {
    /// Create an empty session from a validated config
    pub fn new(config: SessionConfig) -> Self {
        Self {
            world: World::new(),
            arbiter: InteractionArbiter::new(config.costs.clone()),
            economy: BuildEconomy::new(),
            objectives: ObjectiveEvaluator::new(config.objectives.clone()),
            validator: GroundCheck {
                max_ground_distance: config.ground_check_distance,
            },
            config,
            player: None,
            layout: None,
            events: Vec::new(),
            sim_time: 0.0,
            time_scale: 1.0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(SessionConfig::from_json(json)?))
    }

    /// Populate the world using the configured seed
    pub fn generate(&mut self) -> Result<(), ConfigError> {
        self.generate_with_seed(self.config.world.seed)
    }

    /// Replaces whatever the world held before, so there is only ever one player.
    pub fn generate_with_seed(&mut self, seed: u64) -> Result<(), ConfigError> {
        if !self.world.is_empty() {
            log::debug!("Clearing {} entities before generation", self.world.len());
            self.world.clear();
            self.player = None;
            self.layout = None;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = generate_world(&mut self.world, &self.config, &mut rng)?;
        self.player = layout.player;
        self.layout = Some(layout);
        Ok(())
    }

    /// Update the simulation by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        let dt = delta_seconds.max(0.0) * self.time_scale;
        self.sim_time += dt as f64;

        regrowth_system(&mut self.world, dt, &mut self.events);

        let Some(player) = self.resolve_player() else {
            log::debug!("No player this frame; vitals and objectives wait");
            return;
        };

        vitals_system(&mut self.world, player, dt);
        if self.player_is_dead(player) {
            self.signal_health_depleted();
        }

        let progress = self.progress(player);
        if let Some(outcome) = self.objectives.evaluate(progress, dt) {
            self.events.push(SimEvent::GameEnded(outcome));
        }
    }

    fn player_is_dead(&self, player: Entity) -> bool {
        self.world
            .get::<&SurvivalStats>(player)
            .is_ok_and(|stats| stats.is_dead())
    }

    /// Health is at zero. Ends the session as a loss unless it already ended.
    fn signal_health_depleted(&mut self) {
        if self.objectives.has_ended() {
            return;
        }
        self.events.push(SimEvent::HealthDepleted);
        if let Some(outcome) = self.objectives.signal_health_depleted() {
            self.events.push(SimEvent::GameEnded(outcome));
        }
    }

    // ========================================================================
    // INTERACTION
    // ========================================================================

    /// Interact with whatever the player is facing, within reach
    pub fn interact(&mut self) -> InteractionOutcome {
        let Some(player) = self.resolve_player() else {
            return InteractionOutcome::Denied(Denial::NoTarget);
        };
        let Some(transform) = self.world.get::<&Transform>(player).ok().map(|t| *t) else {
            return InteractionOutcome::Denied(Denial::NoTarget);
        };

        let target = find_target(
            &self.world,
            transform.position,
            transform.forward(),
            self.config.interaction_range,
            Some(player),
        );
        self.interact_with(target)
    }

    /// Interact with an already-resolved target, skipping the ray
    pub fn interact_with(&mut self, target: Option<Entity>) -> InteractionOutcome {
        if self.objectives.has_ended() {
            return InteractionOutcome::Denied(Denial::NotInteractive);
        }
        let Some(player) = self.resolve_player() else {
            return InteractionOutcome::Denied(Denial::NoTarget);
        };

        let world = &self.world;
        let mode = world
            .get::<&InteractionMode>(player)
            .map(|m| *m)
            .unwrap_or_default();
        let (Ok(mut stats), Ok(mut inventory)) = (
            world.get::<&mut SurvivalStats>(player),
            world.get::<&mut InventoryLedger>(player),
        ) else {
            return InteractionOutcome::Denied(Denial::NoTarget);
        };

        let resource = target.and_then(|e| world.get::<&Harvestable>(e).ok().map(|h| h.resource));
        let mut node = target.and_then(|e| world.get::<&mut ResourceNode>(e).ok());
        let mut bush = target.and_then(|e| world.get::<&mut BerryBush>(e).ok());

        let view = match (target, node.as_deref_mut(), bush.as_deref_mut(), resource) {
            (None, ..) => None,
            (Some(_), Some(node), _, Some(resource)) => {
                Some(InteractionTarget::Node { resource, node })
            }
            (Some(_), _, Some(bush), _) => Some(InteractionTarget::Bush(bush)),
            (Some(_), ..) => Some(InteractionTarget::Other),
        };

        let outcome = self.arbiter.interact(mode, view, &mut stats, &mut inventory);

        if let (
            InteractionOutcome::Harvested {
                resource,
                amount,
                stamina_spent,
                visual_changed,
            },
            Some(entity),
        ) = (outcome, target)
        {
            self.events.push(SimEvent::Harvested {
                resource,
                amount,
                stamina_spent,
            });
            if visual_changed {
                if let Some(node) = node.as_deref() {
                    self.events.push(SimEvent::TierChanged {
                        entity,
                        tier_index: node.current_index(),
                        visual_tag: node.current_tier().visual_tag.clone(),
                        depleted: node.is_depleted(),
                    });
                } else if bush.is_some() {
                    self.events.push(SimEvent::BushCollected { entity });
                }
            }
        }
        outcome
    }

    /// Open or close the menu. Returns the new state.
    pub fn toggle_menu(&mut self) -> Option<bool> {
        let player = self.resolve_player()?;
        let mut mode = self.world.get::<&mut InteractionMode>(player).ok()?;
        mode.menu_open = !mode.menu_open;
        Some(mode.menu_open)
    }

    /// Debug binding: flip stamina between regenerating and draining.
    pub fn toggle_stamina_drain(&mut self) -> Option<bool> {
        let player = self.resolve_player()?;
        let mut stats = self.world.get::<&mut SurvivalStats>(player).ok()?;
        stats.toggle_stamina_drain();
        Some(stats.is_stamina_draining())
    }

    /// Write the player's health. Reaching zero loses the session immediately.
    pub fn set_player_health(&mut self, value: f32) -> bool {
        let Some(player) = self.resolve_player() else {
            return false;
        };
        let Ok(mut stats) = self.world.get::<&mut SurvivalStats>(player) else {
            return false;
        };
        stats.set_health(value);
        let dead = stats.is_dead();
        drop(stats);

        if dead {
            self.signal_health_depleted();
        }
        true
    }

    pub fn set_player_hunger(&mut self, value: f32) -> bool {
        self.with_player_stats(|stats| stats.set_hunger(value))
    }

    pub fn set_player_stamina(&mut self, value: f32) -> bool {
        self.with_player_stats(|stats| stats.set_stamina(value))
    }

    /// Overwrite one inventory counter through the ledger's clamping. Returns the stored value.
    pub fn set_player_item(&mut self, resource: ResourceType, value: i64) -> Option<u32> {
        let player = self.resolve_player()?;
        let mut inventory = self.world.get::<&mut InventoryLedger>(player).ok()?;
        Some(inventory.set(resource, value))
    }

    fn with_player_stats(&mut self, f: impl FnOnce(&mut SurvivalStats)) -> bool {
        let Some(player) = self.resolve_player() else {
            return false;
        };
        match self.world.get::<&mut SurvivalStats>(player) {
            Ok(mut stats) => {
                f(&mut *stats);
                true
            }
            Err(_) => false,
        }
    }

    /// Debug binding: rewrite the clock so `seconds` remain.
    pub fn set_time_left(&mut self, seconds: f32) {
        self.objectives.set_time_left(seconds);
    }

    // ========================================================================
    // BUILDING
    // ========================================================================

    /// Enter building mode with the structure archetype at `spec_index`. Closes the menu.
    pub fn start_building(&mut self, spec_index: usize) -> Result<(), BuildError> {
        if self.objectives.has_ended() {
            return Err(BuildError::SessionOver);
        }
        let spec = self
            .config
            .structures
            .get(spec_index)
            .cloned()
            .ok_or(BuildError::UnknownStructure(spec_index))?;
        let player = self.resolve_player().ok_or(BuildError::NoPlayer)?;

        {
            let mut mode = self
                .world
                .get::<&mut InteractionMode>(player)
                .map_err(|_| BuildError::NoPlayer)?;
            mode.menu_open = false;
            mode.building = true;
        }

        log::debug!("Building {}", spec.label());
        self.world
            .insert_one(player, BuildSession::new(spec))
            .map_err(|_| BuildError::NoPlayer)
    }

    pub fn rotate_preview_left(&mut self) -> Option<f32> {
        self.with_preview(|session| session.rotate_left())
    }

    pub fn rotate_preview_right(&mut self) -> Option<f32> {
        self.with_preview(|session| session.rotate_right())
    }

    pub fn rotate_preview_yaw(&mut self, degrees: f32) -> Option<f32> {
        self.with_preview(|session| session.rotate_yaw(degrees))
    }

    /// Commit the preview at `position`. Leaves building mode on success only.
    pub fn place_structure(
        &mut self,
        position: Vec3,
        ground_distance: f32,
    ) -> Result<Entity, BuildError> {
        if self.objectives.has_ended() {
            return Err(BuildError::SessionOver);
        }
        let player = self.resolve_player().ok_or(BuildError::NoPlayer)?;

        let placed = {
            let session = self
                .world
                .get::<&BuildSession>(player)
                .map_err(|_| BuildError::NotBuilding)?;
            let mut inventory = self
                .world
                .get::<&mut InventoryLedger>(player)
                .map_err(|_| BuildError::NoPlayer)?;
            let placement = Placement {
                position: position.to_array(),
                yaw_degrees: session.yaw_degrees(),
                ground_distance,
            };
            self.economy
                .place(&session.spec, placement, &mut inventory, &self.validator)?
        };

        let asset_key = placed.spec.asset_key();
        let label = placed.spec.label();
        let entity = self.world.spawn((
            Name::new(label.clone()),
            Transform::new(position, placed.placement.yaw_degrees),
            Collider::STRUCTURE,
            Structure {
                spec: placed.spec,
                build_order: placed.build_parts_count,
            },
        ));
        self.leave_building_mode(player);

        log::info!("Placed {} ({} parts)", label, placed.build_parts_count);
        self.events.push(SimEvent::StructurePlaced {
            entity,
            asset_key,
            label,
            build_parts_count: placed.build_parts_count,
        });
        Ok(entity)
    }

    /// Drop the preview without spending anything. Returns whether one existed.
    pub fn cancel_building(&mut self) -> bool {
        match self.resolve_player() {
            Some(player) => self.leave_building_mode(player),
            None => false,
        }
    }

    fn with_preview(&mut self, f: impl FnOnce(&mut BuildSession)) -> Option<f32> {
        let player = self.resolve_player()?;
        let mut session = self.world.get::<&mut BuildSession>(player).ok()?;
        f(&mut *session);
        Some(session.yaw_degrees())
    }

    fn leave_building_mode(&mut self, player: Entity) -> bool {
        if let Ok(mut mode) = self.world.get::<&mut InteractionMode>(player) {
            mode.building = false;
        }
        self.world.remove_one::<BuildSession>(player).is_ok()
    }

    // ========================================================================
    // PLAYER HANDLE
    // ========================================================================

    /// Current player, re-acquiring it if the cached handle went stale.
    pub fn resolve_player(&mut self) -> Option<Entity> {
        if self.player.is_some_and(|p| self.is_player(p)) {
            return self.player;
        }
        self.player = find_player(&self.world);
        if let Some(player) = self.player {
            log::debug!("Acquired player {:?}", player);
        }
        self.player
    }

    fn lookup_player(&self) -> Option<Entity> {
        match self.player {
            Some(p) if self.is_player(p) => Some(p),
            _ => find_player(&self.world),
        }
    }

    fn is_player(&self, entity: Entity) -> bool {
        self.world.get::<&Player>(entity).is_ok()
    }

    pub fn spawn_player(&mut self, transform: Transform) -> Entity {
        let player = generation::spawn_player(&mut self.world, &self.config, transform);
        self.player = Some(player);
        player
    }

    pub fn spawn_node(
        &mut self,
        resource: ResourceType,
        transform: Transform,
    ) -> Result<Entity, ConfigError> {
        generation::spawn_node(&mut self.world, &self.config, resource, transform)
    }

    pub fn spawn_bush(&mut self, transform: Transform) -> Entity {
        generation::spawn_bush(&mut self.world, &self.config, transform)
    }

    /// Move and turn the player. `false` when there is no player.
    pub fn set_player_transform(&mut self, transform: Transform) -> bool {
        let Some(player) = self.resolve_player() else {
            return false;
        };
        match self.world.get::<&mut Transform>(player) {
            Ok(mut current) => {
                *current = transform;
                true
            }
            Err(_) => false,
        }
    }

    // ========================================================================
    // READ MODEL
    // ========================================================================

    pub fn hud(&self) -> HudSnapshot {
        let player = self.lookup_player().and_then(|p| {
            let stats = self.world.get::<&SurvivalStats>(p).ok()?;
            let inventory = self.world.get::<&InventoryLedger>(p).ok()?;
            let mode = self
                .world
                .get::<&InteractionMode>(p)
                .map(|m| *m)
                .unwrap_or_default();
            let session = self.world.get::<&BuildSession>(p).ok();
            Some(PlayerHud::new(&stats, &inventory, mode, session.as_deref()))
        });
        HudSnapshot::new(player, &self.objectives, self.economy.build_parts_count())
    }

    /// Hand queued events to the caller
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn player_stats(&self) -> Option<SurvivalStats> {
        let player = self.lookup_player()?;
        let stats = self.world.get::<&SurvivalStats>(player).ok()?;
        Some((*stats).clone())
    }

    pub fn player_inventory(&self) -> Option<InventoryLedger> {
        let player = self.lookup_player()?;
        let inventory = self.world.get::<&InventoryLedger>(player).ok()?;
        Some((*inventory).clone())
    }

    fn progress(&self, player: Entity) -> ObjectiveProgress {
        ObjectiveProgress {
            total_materials_collected: self
                .world
                .get::<&InventoryLedger>(player)
                .map(|inv| inv.total_materials_collected())
                .unwrap_or(0),
            build_parts_count: self.economy.build_parts_count(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&WorldLayout> {
        self.layout.as_ref()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.objectives.outcome()
    }

    pub fn objectives(&self) -> &ObjectiveEvaluator {
        &self.objectives
    }

    pub fn build_parts_count(&self) -> u32 {
        self.economy.build_parts_count()
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Scaled seconds since start
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn node_count(&self) -> usize {
        self.world.query::<&ResourceNode>().iter().count()
    }

    pub fn depleted_node_count(&self) -> usize {
        self.world
            .query::<&ResourceNode>()
            .iter()
            .filter(|(_, node)| node.is_depleted())
            .count()
    }

    pub fn bush_count(&self) -> usize {
        self.world.query::<&BerryBush>().iter().count()
    }

    pub fn structure_count(&self) -> usize {
        self.world.query::<&Structure>().iter().count()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survival_logic::objectives::LossReason;
    use survival_logic::stats::StatsConfig;

    /// Player at the origin facing +X with a tree 100 units ahead.
    fn engine_with_tree() -> (SimulationEngine, Entity) {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());
        let tree = engine
            .spawn_node(ResourceType::Wood, Transform::at(100.0, 0.0, 0.0))
            .unwrap();
        (engine, tree)
    }

    #[test]
    fn test_engine_creation() {
        let mut engine = SimulationEngine::default();
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.sim_time(), 0.0);

        engine.update(1.0);
        assert!(engine.hud().player.is_none());
        assert_eq!(engine.objectives().elapsed(), 0.0);
    }

    #[test]
    fn test_engine_generation() {
        let mut engine = SimulationEngine::default();
        engine.generate().unwrap();

        assert_eq!(engine.node_count(), 20);
        assert_eq!(engine.bush_count(), 6);
        assert!(engine.hud().player.is_some());
    }

    #[test]
    fn test_player_reacquired_after_respawn() {
        let mut engine = SimulationEngine::default();
        let first = engine.spawn_player(Transform::default());
        engine.world.despawn(first).unwrap();

        engine.update(1.0);
        assert!(engine.hud().player.is_none());

        let second = engine.world.spawn((
            Player,
            Transform::default(),
            SurvivalStats::default(),
            InventoryLedger::default(),
            InteractionMode::default(),
        ));
        engine.update(2.0);
        assert_eq!(engine.resolve_player(), Some(second));
        assert_eq!(engine.player_stats().unwrap().hunger().current(), 98.0);
        assert_eq!(engine.objectives().elapsed(), 2.0);
    }

    #[test]
    fn test_interact_mines_tree_in_front() {
        let (mut engine, tree) = engine_with_tree();

        let outcome = engine.interact();
        assert_eq!(
            outcome,
            InteractionOutcome::Harvested {
                resource: ResourceType::Wood,
                amount: 10,
                stamina_spent: 30.0,
                visual_changed: true,
            }
        );
        let events = engine.drain_events();
        assert!(events.contains(&SimEvent::TierChanged {
            entity: tree,
            tier_index: 1,
            visual_tag: "tree_chopped".into(),
            depleted: false,
        }));
        assert_eq!(engine.player_inventory().unwrap().get(ResourceType::Wood), 10);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_interact_misses_when_facing_away() {
        let (mut engine, _) = engine_with_tree();
        engine.set_player_transform(Transform::new(Vec3::ZERO, 180.0));

        assert_eq!(engine.interact(), InteractionOutcome::Denied(Denial::NoTarget));
    }

    #[test]
    fn test_menu_blocks_interaction() {
        let (mut engine, tree) = engine_with_tree();
        assert_eq!(engine.toggle_menu(), Some(true));
        assert_eq!(
            engine.interact_with(Some(tree)),
            InteractionOutcome::Denied(Denial::NotInteractive)
        );
        assert_eq!(engine.toggle_menu(), Some(false));
        assert!(engine.interact_with(Some(tree)).is_harvested());
    }

    #[test]
    fn test_bush_collect_and_regrow_events() {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());
        let bush = engine.spawn_bush(Transform::at(80.0, 0.0, 0.0));

        assert!(engine.interact().is_harvested());
        let events = engine.drain_events();
        assert!(events.contains(&SimEvent::BushCollected { entity: bush }));

        assert_eq!(engine.interact(), InteractionOutcome::Denied(Denial::Regrowing));

        engine.update(10.0);
        let events = engine.drain_events();
        assert!(events.contains(&SimEvent::BerriesRegrown { entity: bush }));
        assert!(engine.interact().is_harvested());
    }

    #[test]
    fn test_build_flow() {
        let (mut engine, tree) = engine_with_tree();
        for _ in 0..3 {
            assert!(engine.interact_with(Some(tree)).is_harvested());
        }
        assert_eq!(engine.player_inventory().unwrap().get(ResourceType::Wood), 30);
        engine.drain_events();

        assert_eq!(
            engine.place_structure(Vec3::ZERO, 0.0),
            Err(BuildError::NotBuilding)
        );

        engine.start_building(0).unwrap();
        assert_eq!(engine.rotate_preview_left(), Some(15.0));
        let hud = engine.hud();
        let player = hud.player.unwrap();
        assert!(player.building);
        assert_eq!(player.preview.unwrap().label, "Wooden Wall");

        // Building mode blocks harvesting
        assert_eq!(
            engine.interact_with(Some(tree)),
            InteractionOutcome::Denied(Denial::NotInteractive)
        );

        let wall = engine.place_structure(Vec3::new(0.0, 200.0, 0.0), 0.0).unwrap();
        assert_eq!(engine.structure_count(), 1);
        assert_eq!(engine.build_parts_count(), 1);
        assert_eq!(engine.player_inventory().unwrap().get(ResourceType::Wood), 20);
        assert!(!engine.hud().player.unwrap().building);
        assert_eq!(engine.world.get::<&Transform>(wall).unwrap().yaw_degrees, 15.0);

        let events = engine.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::StructurePlaced { asset_key, build_parts_count: 1, .. }
                if asset_key == "building/wooden_wall"
        )));
    }

    #[test]
    fn test_denied_placement_stays_in_building_mode() {
        let (mut engine, _) = engine_with_tree();
        engine.start_building(3).unwrap();

        let result = engine.place_structure(Vec3::ZERO, 0.0);
        assert!(matches!(
            result,
            Err(BuildError::Denied(PlacementDenied::InsufficientMaterials { .. }))
        ));
        assert!(engine.hud().player.unwrap().building);
        assert_eq!(engine.build_parts_count(), 0);

        assert!(engine.cancel_building());
        assert!(!engine.cancel_building());
        assert!(!engine.hud().player.unwrap().building);
    }

    #[test]
    fn test_floating_placement_rejected() {
        let (mut engine, tree) = engine_with_tree();
        engine.interact_with(Some(tree));
        engine.start_building(0).unwrap();

        assert_eq!(
            engine.place_structure(Vec3::new(0.0, 0.0, 500.0), 500.0),
            Err(BuildError::Denied(PlacementDenied::InvalidPlacement))
        );
        assert_eq!(engine.player_inventory().unwrap().get(ResourceType::Wood), 10);
    }

    #[test]
    fn test_unknown_structure_index() {
        let (mut engine, _) = engine_with_tree();
        assert_eq!(engine.start_building(99), Err(BuildError::UnknownStructure(99)));
    }

    #[test]
    fn test_starvation_ends_session() {
        let mut config = SessionConfig::default();
        config.stats = StatsConfig {
            start_hunger: Some(1.0),
            ..StatsConfig::default()
        };
        let mut engine = SimulationEngine::new(config);
        engine.spawn_player(Transform::default());
        let tree = engine
            .spawn_node(ResourceType::Wood, Transform::at(100.0, 0.0, 0.0))
            .unwrap();

        for _ in 0..20 {
            engine.update(1.0);
        }
        assert_eq!(
            engine.outcome(),
            Some(GameOutcome::Lost(LossReason::HealthDepleted))
        );
        let events = engine.drain_events();
        assert!(events.contains(&SimEvent::HealthDepleted));
        assert!(events.contains(&SimEvent::GameEnded(GameOutcome::Lost(
            LossReason::HealthDepleted
        ))));

        assert_eq!(
            engine.interact_with(Some(tree)),
            InteractionOutcome::Denied(Denial::NotInteractive)
        );
        assert_eq!(engine.start_building(0), Err(BuildError::SessionOver));
    }

    #[test]
    fn test_health_setter_loses_session() {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());

        assert!(engine.set_player_health(0.0));
        assert_eq!(
            engine.outcome(),
            Some(GameOutcome::Lost(LossReason::HealthDepleted))
        );
        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![
                SimEvent::HealthDepleted,
                SimEvent::GameEnded(GameOutcome::Lost(LossReason::HealthDepleted)),
            ]
        );

        for _ in 0..5 {
            engine.update(1.0);
        }
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_dead_player_loses_on_next_frame() {
        let mut engine = SimulationEngine::default();
        let player = engine.spawn_player(Transform::default());
        // Written behind the engine's back, so no edge is ever observed
        engine
            .world
            .get::<&mut SurvivalStats>(player)
            .unwrap()
            .set_health(0.0);
        assert_eq!(engine.outcome(), None);

        engine.update(0.1);
        assert_eq!(
            engine.outcome(),
            Some(GameOutcome::Lost(LossReason::HealthDepleted))
        );
    }

    #[test]
    fn test_no_health_event_after_win() {
        let mut config = SessionConfig::default();
        config.objectives.materials_target = 0;
        config.objectives.build_target = 0;
        let mut engine = SimulationEngine::new(config);
        engine.spawn_player(Transform::default());

        engine.update(0.1);
        assert_eq!(engine.outcome(), Some(GameOutcome::Won));
        engine.drain_events();

        assert!(engine.set_player_health(0.0));
        engine.update(1.0);
        assert!(engine.drain_events().is_empty());
        assert_eq!(engine.outcome(), Some(GameOutcome::Won));
    }

    #[test]
    fn test_player_setters() {
        let mut engine = SimulationEngine::default();
        assert!(!engine.set_player_hunger(10.0));
        assert_eq!(engine.set_player_item(ResourceType::Wood, 5), None);

        engine.spawn_player(Transform::default());
        assert!(engine.set_player_hunger(10.0));
        assert!(engine.set_player_stamina(-4.0));
        assert!(engine.set_player_health(40.0));
        assert_eq!(engine.set_player_item(ResourceType::Wood, 5_000), Some(999));

        let stats = engine.player_stats().unwrap();
        assert_eq!(stats.hunger().current(), 10.0);
        assert_eq!(stats.stamina().current(), 0.0);
        assert_eq!(stats.health().current(), 40.0);
        let inventory = engine.player_inventory().unwrap();
        assert_eq!(inventory.get(ResourceType::Wood), 999);
        assert_eq!(engine.outcome(), None);
    }

    #[test]
    fn test_regenerate_keeps_single_player() {
        let mut engine = SimulationEngine::default();
        engine.generate().unwrap();
        engine.generate_with_seed(42).unwrap();

        assert_eq!(engine.world.query::<&Player>().iter().count(), 1);
        assert_eq!(engine.node_count(), 20);
        assert_eq!(engine.bush_count(), 6);
        assert_eq!(engine.resolve_player(), engine.layout().unwrap().player);
    }

    #[test]
    fn test_timeout_via_set_time_left() {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());
        engine.set_time_left(1.0);

        engine.update(0.5);
        assert_eq!(engine.outcome(), None);
        engine.update(0.5);
        assert_eq!(engine.outcome(), Some(GameOutcome::Lost(LossReason::Timeout)));
        assert_eq!(engine.hud().remaining_seconds, 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());
        engine.set_time_scale(2.0);

        engine.update(1.0);
        assert_eq!(engine.sim_time(), 2.0);
        assert_eq!(engine.player_stats().unwrap().hunger().current(), 98.0);
    }

    #[test]
    fn test_toggle_stamina_drain() {
        let mut engine = SimulationEngine::default();
        engine.spawn_player(Transform::default());
        assert_eq!(engine.toggle_stamina_drain(), Some(true));

        engine.update(1.0);
        let stamina = engine.player_stats().unwrap().stamina().current();
        // 19 or 20 drain steps depending on float accumulation
        assert!((stamina - 85.0).abs() <= 1.0, "stamina {}", stamina);
    }
}
