//! Vitals system - hunger, starvation and stamina for the player

use crate::components::Player;
use hecs::{Entity, World};
use survival_logic::stats::{StatsTick, SurvivalStats};

/// Advance the player's stats. `None` when the entity has no stats.
pub fn vitals_system(world: &mut World, player: Entity, delta_seconds: f32) -> Option<StatsTick> {
    let mut stats = world.get::<&mut SurvivalStats>(player).ok()?;
    let report = stats.tick(delta_seconds);
    if report.health_depleted {
        log::info!("Player health depleted");
    }
    Some(report)
}

/// First live player entity, if any.
pub fn find_player(world: &World) -> Option<Entity> {
    world
        .query::<(&Player, &SurvivalStats)>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survival_logic::stats::StatsConfig;

    #[test]
    fn test_vitals_drain_hunger() {
        let mut world = World::new();
        let player = world.spawn((Player, SurvivalStats::default()));

        let report = vitals_system(&mut world, player, 3.0).unwrap();
        assert_eq!(report.hunger_steps, 3);

        let stats = world.get::<&SurvivalStats>(player).unwrap();
        assert_eq!(stats.hunger().current(), 97.0);
    }

    #[test]
    fn test_vitals_report_depletion() {
        let mut world = World::new();
        let config = StatsConfig {
            start_health: Some(5.0),
            start_hunger: Some(1.0),
            ..StatsConfig::default()
        };
        let player = world.spawn((Player, SurvivalStats::new(&config)));

        let report = vitals_system(&mut world, player, 1.0).unwrap();
        assert!(report.health_depleted);
    }

    #[test]
    fn test_find_player() {
        let mut world = World::new();
        assert_eq!(find_player(&world), None);
        world.spawn((SurvivalStats::default(),));
        assert_eq!(find_player(&world), None);
        let player = world.spawn((Player, SurvivalStats::default()));
        assert_eq!(find_player(&world), Some(player));
    }

    #[test]
    fn test_missing_stats_is_none() {
        let mut world = World::new();
        let player = world.spawn((Player,));
        assert!(vitals_system(&mut world, player, 1.0).is_none());
    }
}
