//! End-to-end sessions on a generated world.
//!
//! Exercises: SessionConfig JSON → generate_world → interact / build → update
//! → ObjectiveEvaluator, all through SimulationEngine.

use hecs::Entity;
use survival_core::prelude::*;
use survival_logic::config::SessionConfig;
use survival_logic::constants::ResourceType;
use survival_logic::interaction::{Denial, InteractionOutcome};
use survival_logic::objectives::{GameOutcome, LossReason};
use survival_logic::resource_node::ResourceNode;

// ── Helpers ────────────────────────────────────────────────────────────

fn bundled_config() -> SessionConfig {
    SessionConfig::from_json(include_str!("../../../data/session_config.json"))
        .expect("bundled session config should be valid")
}

/// Harvest `node` until it is empty, resting whenever stamina runs short.
fn strip_node(engine: &mut SimulationEngine, node: Entity) {
    for _ in 0..100 {
        let depleted = engine
            .world
            .get::<&ResourceNode>(node)
            .map(|n| n.is_depleted())
            .unwrap_or(true);
        if depleted {
            return;
        }
        match engine.interact_with(Some(node)) {
            InteractionOutcome::Denied(Denial::InsufficientStamina { .. }) => engine.update(1.0),
            InteractionOutcome::Harvested { .. } => {}
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    panic!("node never depleted");
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn test_full_session_win() {
    let mut config = bundled_config();
    // Slow hunger so the scripted run does not need to eat
    config.stats.hunger_decrease_rate = 0.25;
    let mut engine = SimulationEngine::new(config);
    engine.generate().unwrap();

    let layout = engine.layout().unwrap().clone();
    for node in layout.trees.iter().chain(&layout.rocks) {
        strip_node(&mut engine, *node);
    }
    assert_eq!(engine.depleted_node_count(), engine.node_count());

    let inventory = engine.player_inventory().unwrap();
    assert_eq!(inventory.get(ResourceType::Wood), 12 * 30);
    assert_eq!(inventory.get(ResourceType::Stone), 8 * 20);
    assert_eq!(engine.outcome(), None);

    for i in 0..5 {
        engine.start_building(0).unwrap();
        engine
            .place_structure(Vec3::new(i as f32 * 200.0, 300.0, 0.0), 0.0)
            .unwrap();
    }
    assert_eq!(engine.structure_count(), 5);

    engine.update(0.1);
    assert_eq!(engine.outcome(), Some(GameOutcome::Won));
    let events = engine.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SimEvent::GameEnded(_)))
            .count(),
        1
    );

    let hud = engine.hud();
    assert_eq!(hud.build_parts_count, 5);
    assert!(hud.remaining_seconds > 0.0);
    let player = hud.player.unwrap();
    assert_eq!(player.total_materials_collected, 520);
    assert_eq!(player.wood, 360 - 50);
}

#[test]
fn test_idle_session_times_out() {
    let mut config = bundled_config();
    config.stats.hunger_decrease_rate = 0.0;
    let mut engine = SimulationEngine::new(config);
    engine.generate().unwrap();

    let mut ended = Vec::new();
    for _ in 0..400 {
        engine.update(1.0);
        ended.extend(
            engine
                .drain_events()
                .into_iter()
                .filter(|e| matches!(e, SimEvent::GameEnded(_))),
        );
    }

    assert_eq!(
        ended,
        vec![SimEvent::GameEnded(GameOutcome::Lost(LossReason::Timeout))]
    );
    assert!(engine.objectives().has_triggered_timeout());
    assert_eq!(engine.hud().remaining_clock(), "00:00");
}

#[test]
fn test_ray_targets_generated_bush() {
    let mut engine = SimulationEngine::new(bundled_config());
    engine.generate().unwrap();

    let bush = engine.layout().unwrap().bushes[0];
    let at = engine.world.get::<&Transform>(bush).unwrap().position;
    // Stand just outside the bush's collider, facing it along +X
    engine.set_player_transform(Transform::new(at - Vec3::new(60.0, 0.0, 0.0), 0.0));

    assert!(engine.interact().is_harvested());
    assert_eq!(engine.player_inventory().unwrap().get(ResourceType::Berry), 1);
    assert!(engine
        .drain_events()
        .contains(&SimEvent::BushCollected { entity: bush }));
}
