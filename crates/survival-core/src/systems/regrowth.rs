//! Regrowth system - advances every collected berry bush

use crate::events::SimEvent;
use hecs::World;
use survival_logic::regrowth::BerryBush;

/// Tick all bushes, queueing progress and regrown notifications.
pub fn regrowth_system(world: &mut World, delta_seconds: f32, events: &mut Vec<SimEvent>) {
    for (entity, bush) in world.query_mut::<&mut BerryBush>() {
        if let Some(progress) = bush.tick(delta_seconds) {
            events.push(SimEvent::RegrowthProgress { entity, progress });
            if bush.is_available() {
                events.push(SimEvent::BerriesRegrown { entity });
            }
        }
    }
}

/// Number of bushes currently holding berries.
pub fn available_bush_count(world: &World) -> usize {
    world
        .query::<&BerryBush>()
        .iter()
        .filter(|(_, bush)| bush.is_available())
        .count()
}
