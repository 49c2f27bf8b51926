//! Generation - seeded scatter of trees, rocks and bushes around the spawn point

use hecs::{Entity, World};
use rand::Rng;
use survival_logic::config::SessionConfig;
use survival_logic::constants::ResourceType;
use survival_logic::error::ConfigError;
use survival_logic::interaction::InteractionMode;
use survival_logic::inventory::InventoryLedger;
use survival_logic::regrowth::BerryBush;
use survival_logic::stats::SurvivalStats;

use crate::components::*;

/// Nothing spawns closer to the player start than this.
const SPAWN_CLEARANCE: f32 = 150.0;

/// Entity handles produced by [`generate_world`].
#[derive(Debug, Clone, Default)]
pub struct WorldLayout {
    pub player: Option<Entity>,
    pub trees: Vec<Entity>,
    pub rocks: Vec<Entity>,
    pub bushes: Vec<Entity>,
}

/// Spawn the player at the origin facing +X, then scatter nodes and bushes.
pub fn generate_world(
    world: &mut World,
    config: &SessionConfig,
    rng: &mut impl Rng,
) -> Result<WorldLayout, ConfigError> {
    let mut layout = WorldLayout {
        player: Some(spawn_player(world, config, Transform::default())),
        ..Default::default()
    };

    let radius = config.world.spawn_radius.max(SPAWN_CLEARANCE + 1.0);

    for _ in 0..config.world.tree_count {
        let at = random_transform(rng, radius);
        layout.trees.push(spawn_node(world, config, ResourceType::Wood, at)?);
    }
    for _ in 0..config.world.rock_count {
        let at = random_transform(rng, radius);
        layout.rocks.push(spawn_node(world, config, ResourceType::Stone, at)?);
    }
    for _ in 0..config.world.bush_count {
        let at = random_transform(rng, radius);
        layout.bushes.push(spawn_bush(world, config, at));
    }

    log::info!(
        "Generated world: {} trees, {} rocks, {} bushes (seed {})",
        layout.trees.len(),
        layout.rocks.len(),
        layout.bushes.len(),
        config.world.seed
    );
    Ok(layout)
}

pub fn spawn_player(world: &mut World, config: &SessionConfig, transform: Transform) -> Entity {
    world.spawn((
        Player,
        Name::new("player"),
        transform,
        SurvivalStats::new(&config.stats),
        InventoryLedger::new(config.max_item_slot),
        InteractionMode::default(),
    ))
}

/// Spawn a mineable node from the configured archetype for `resource`.
pub fn spawn_node(
    world: &mut World,
    config: &SessionConfig,
    resource: ResourceType,
    transform: Transform,
) -> Result<Entity, ConfigError> {
    let archetype = config
        .node_archetype(resource)
        .ok_or(ConfigError::MissingArchetype(resource))?;
    let node = archetype.build()?;

    Ok(world.spawn((
        Name::new(archetype.name.clone()),
        transform,
        Collider::for_resource(resource),
        Harvestable { resource },
        node,
    )))
}

pub fn spawn_bush(world: &mut World, config: &SessionConfig, transform: Transform) -> Entity {
    world.spawn((
        Name::new("berry_bush"),
        transform,
        Collider::BUSH,
        BerryBush::new(config.bush_regrowth_time),
    ))
}

/// Uniform over the ring between the clearance and `radius`, random facing.
fn random_transform(rng: &mut impl Rng, radius: f32) -> Transform {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let r_sq = rng.gen_range(SPAWN_CLEARANCE * SPAWN_CLEARANCE..radius * radius);
    let r = r_sq.sqrt();
    Transform::new(
        Vec3::new(r * angle.cos(), r * angle.sin(), 0.0),
        rng.gen_range(0.0..360.0),
    )
}
