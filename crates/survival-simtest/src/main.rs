//! Survival Headless Session Harness
//!
//! Validates the session logic and the bundled config without a renderer.
//! Runs entirely in-process: no window, no input, no assets.
//!
//! Usage:
//!   cargo run -p survival-simtest
//!   cargo run -p survival-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p survival-simtest

use hecs::Entity;
use survival_core::prelude::*;
use survival_logic::build::{can_afford, AlwaysValid, BuildEconomy, Placement, StructureSpec};
use survival_logic::config::SessionConfig;
use survival_logic::constants::{BuildableType, MaterialType, ResourceType};
use survival_logic::interaction::{
    Denial, InteractionArbiter, InteractionMode, InteractionOutcome, InteractionTarget,
};
use survival_logic::inventory::InventoryLedger;
use survival_logic::objectives::{GameOutcome, LossReason, ObjectiveEvaluator, ObjectiveProgress};
use survival_logic::regrowth::BerryBush;
use survival_logic::resource_node::{ResourceNode, ResourceTier};
use survival_logic::stats::{StatsConfig, SurvivalStats};

// ── Session config (same JSON the tests load) ───────────────────────────
const SESSION_JSON: &str = include_str!("../../../data/session_config.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Survival Session Harness ===\n");

    let mut results = Vec::new();

    // 1. Bundled config validation
    let config = match SessionConfig::from_json(SESSION_JSON) {
        Ok(config) => {
            log::info!(
                "Loaded session config: {} structures, {} node archetypes",
                config.structures.len(),
                config.nodes.len()
            );
            results.push(TestResult {
                name: "config_parse".into(),
                passed: true,
                detail: "session_config.json parsed and validated".into(),
            });
            config
        }
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("config error: {}", e),
            });
            SessionConfig::default()
        }
    };
    results.extend(validate_config(&config, verbose));

    // 2. Resource node tiering
    results.extend(validate_resource_nodes(verbose));

    // 3. Survival stats
    results.extend(validate_stats(verbose));

    // 4. Inventory ledger
    results.extend(validate_inventory(verbose));

    // 5. Interaction arbiter
    results.extend(validate_interaction(verbose));

    // 6. Build economy
    results.extend(validate_build_economy(verbose));

    // 7. Objectives
    results.extend(validate_objectives(verbose));

    // 8. Full engine sessions
    results.extend(validate_engine_sessions(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Session Config ---");
    let mut results = Vec::new();

    // Every material × buildable pair is placeable
    let mut missing = Vec::new();
    for material in MaterialType::all() {
        for buildable in BuildableType::all() {
            let found = config
                .structures
                .iter()
                .any(|s| s.material_type == *material && s.buildable_type == *buildable);
            if !found {
                missing.push(format!("{} {}", material.name(), buildable.name()));
            }
        }
    }
    results.push(TestResult {
        name: "config_structure_coverage".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("{} structure archetypes", config.structures.len())
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    // Wood and stone each have a node archetype with a strictly descending table
    let mut bad_tables = Vec::new();
    for resource in [ResourceType::Wood, ResourceType::Stone] {
        match config.node_archetype(resource) {
            Some(archetype) => {
                let descending = archetype
                    .tiers
                    .windows(2)
                    .all(|w| w[0].threshold > w[1].threshold);
                if !descending {
                    bad_tables.push(format!("{} not descending", archetype.name));
                }
                if verbose {
                    let thresholds: Vec<u32> =
                        archetype.tiers.iter().map(|t| t.threshold).collect();
                    println!("  {}: tiers {:?}", archetype.name, thresholds);
                }
            }
            None => bad_tables.push(format!("no archetype for {}", resource.name())),
        }
    }
    results.push(TestResult {
        name: "config_tier_tables".into(),
        passed: bad_tables.is_empty(),
        detail: if bad_tables.is_empty() {
            "wood and stone tables strictly descending".into()
        } else {
            bad_tables.join("; ")
        },
    });

    // The scattered world can actually meet the materials target
    let mut reachable = 0u64;
    for (resource, count) in [
        (ResourceType::Wood, config.world.tree_count),
        (ResourceType::Stone, config.world.rock_count),
    ] {
        if let Some(node) = config.node_archetype(resource).and_then(|a| a.build().ok()) {
            reachable += node.remaining() as u64 * count as u64;
        }
    }
    results.push(TestResult {
        name: "config_target_reachable".into(),
        passed: reachable >= config.objectives.materials_target,
        detail: format!(
            "{} minable vs target {}",
            reachable, config.objectives.materials_target
        ),
    });

    results
}

// ── 2. Resource Nodes ───────────────────────────────────────────────────

fn three_tier_node() -> Option<ResourceNode> {
    ResourceNode::new(
        "simtest_rock",
        vec![
            ResourceTier::new(100, "full"),
            ResourceTier::new(50, "half"),
            ResourceTier::new(0, "gone"),
        ],
        0,
    )
    .ok()
}

fn validate_resource_nodes(_verbose: bool) -> Vec<TestResult> {
    println!("--- Resource Nodes ---");
    let mut results = Vec::new();

    let Some(mut node) = three_tier_node() else {
        results.push(TestResult {
            name: "node_construct".into(),
            passed: false,
            detail: "three-tier node rejected".into(),
        });
        return results;
    };

    // 100/50/0: mine 55 → index 1, remaining 45; mine 45 → depleted
    let first = node.mine(55);
    let after_first = (node.current_index(), node.remaining());
    let second = node.mine(45);
    results.push(TestResult {
        name: "node_tier_scenario".into(),
        passed: first == 55 && after_first == (1, 45) && second == 45 && node.is_depleted(),
        detail: format!(
            "mined {} → tier {} with {} left, then {} → depleted={}",
            first, after_first.0, after_first.1, second, node.is_depleted()
        ),
    });

    // Depleted nodes give nothing, however often they are mined
    let extra: u32 = (0..5).map(|_| node.mine(10) + node.mine_chunk()).sum();
    results.push(TestResult {
        name: "node_depletion_idempotent".into(),
        passed: extra == 0 && node.remaining() == 0,
        detail: format!("{} taken from a depleted node", extra),
    });

    // Tier index never decreases across single-unit mining
    let mut monotonic = true;
    if let Some(mut node) = three_tier_node() {
        let mut last = node.current_index();
        while !node.is_depleted() {
            node.mine(1);
            monotonic &= node.current_index() >= last;
            last = node.current_index();
        }
    }
    results.push(TestResult {
        name: "node_tier_monotonic".into(),
        passed: monotonic,
        detail: "tier index non-decreasing over 100 single mines".into(),
    });

    // Chunks walk the table tier by tier
    let mut chunks = Vec::new();
    if let Some(mut node) = three_tier_node() {
        while node.current_chunk_amount() > 0 {
            chunks.push(node.mine_chunk());
        }
    }
    results.push(TestResult {
        name: "node_chunks".into(),
        passed: chunks == vec![50, 50],
        detail: format!("chunks {:?}", chunks),
    });

    results
}

// ── 3. Survival Stats ───────────────────────────────────────────────────

fn validate_stats(verbose: bool) -> Vec<TestResult> {
    println!("--- Survival Stats ---");
    let mut results = Vec::new();

    // Writes far out of range clamp into [0, max]
    let mut stats = SurvivalStats::default();
    stats.set_stamina(1e9);
    let high = stats.stamina().current();
    stats.set_stamina(-1e9);
    let low = stats.stamina().current();
    stats.set_hunger(f32::NAN);
    results.push(TestResult {
        name: "stats_clamped".into(),
        passed: high == 100.0 && low == 0.0 && stats.hunger().current() == 0.0,
        detail: format!("high={} low={} nan→{}", high, low, stats.hunger().current()),
    });

    // Default tuning: hunger empties at 100s, then 5 damage per second
    let mut stats = SurvivalStats::default();
    let mut died_at = None;
    for second in 1..=200 {
        if stats.tick(1.0).health_depleted {
            died_at = Some(second);
            break;
        }
    }
    if verbose {
        println!("  starvation death at {:?}s", died_at);
    }
    results.push(TestResult {
        name: "stats_starvation_timeline".into(),
        passed: died_at == Some(119),
        detail: format!("health depleted at {:?}s (expected 119)", died_at),
    });

    // One long frame runs the same steps as many short ones
    let mut long = SurvivalStats::default();
    let mut short = SurvivalStats::default();
    long.tick(10.0);
    for _ in 0..10 {
        short.tick(1.0);
    }
    results.push(TestResult {
        name: "stats_long_frame".into(),
        passed: long.hunger().current() == short.hunger().current(),
        detail: format!(
            "hunger {} after one 10s frame vs {} after ten 1s frames",
            long.hunger().current(),
            short.hunger().current()
        ),
    });

    // Draining and regenerating stamina stay within bounds
    let mut stats = SurvivalStats::new(&StatsConfig::default());
    stats.set_stamina_draining(true);
    stats.tick(20.0);
    let drained = stats.stamina().current();
    stats.set_stamina_draining(false);
    stats.tick(20.0);
    let restored = stats.stamina().current();
    results.push(TestResult {
        name: "stats_stamina_cycle".into(),
        passed: drained == 0.0 && restored == 100.0,
        detail: format!("drained to {}, restored to {}", drained, restored),
    });

    results
}

// ── 4. Inventory ────────────────────────────────────────────────────────

fn validate_inventory(_verbose: bool) -> Vec<TestResult> {
    println!("--- Inventory ---");
    let mut results = Vec::new();

    // Deterministic mixed script of gains, spends and overflows
    let mut inventory = InventoryLedger::new(200);
    let mut last_total = 0;
    let mut monotonic = true;
    let mut in_bounds = true;
    for step in 0..500i64 {
        let resource = ResourceType::all()[(step % 3) as usize];
        let value = (step * 37 % 311) - 40;
        inventory.set(resource, value);
        monotonic &= inventory.total_materials_collected() >= last_total;
        last_total = inventory.total_materials_collected();
        in_bounds &= ResourceType::all()
            .iter()
            .all(|r| inventory.get(*r) <= inventory.max_slot());
    }
    results.push(TestResult {
        name: "inventory_total_monotonic".into(),
        passed: monotonic,
        detail: format!("total {} after 500 writes", last_total),
    });
    results.push(TestResult {
        name: "inventory_bounds".into(),
        passed: in_bounds,
        detail: "all counters within [0, max_slot]".into(),
    });

    results
}

// ── 5. Interaction ──────────────────────────────────────────────────────

fn validate_interaction(_verbose: bool) -> Vec<TestResult> {
    println!("--- Interaction ---");
    let mut results = Vec::new();
    let arbiter = InteractionArbiter::default();

    // Stamina 10, berry cost 10: succeeds once, then the bush is regrowing
    let mut stats = SurvivalStats::default();
    let mut inventory = InventoryLedger::default();
    let mut bush = BerryBush::new(10.0);
    stats.set_stamina(10.0);
    let first = arbiter.interact(
        InteractionMode::default(),
        Some(InteractionTarget::Bush(&mut bush)),
        &mut stats,
        &mut inventory,
    );
    let stamina_after = stats.stamina().current();
    stats.set_stamina(100.0);
    let second = arbiter.interact(
        InteractionMode::default(),
        Some(InteractionTarget::Bush(&mut bush)),
        &mut stats,
        &mut inventory,
    );
    results.push(TestResult {
        name: "interaction_stamina_round_trip".into(),
        passed: first.is_harvested()
            && stamina_after == 0.0
            && second == InteractionOutcome::Denied(Denial::Regrowing)
            && inventory.get(ResourceType::Berry) == 1,
        detail: format!("first={:?} second={:?}", first, second),
    });

    // An open menu blocks harvesting without side effects
    let mut node = three_tier_node();
    let outcome = arbiter.interact(
        InteractionMode {
            menu_open: true,
            building: false,
        },
        node.as_mut().map(|node| InteractionTarget::Node {
            resource: ResourceType::Stone,
            node,
        }),
        &mut stats,
        &mut inventory,
    );
    results.push(TestResult {
        name: "interaction_menu_blocks".into(),
        passed: outcome == InteractionOutcome::Denied(Denial::NotInteractive)
            && node.map(|n| n.remaining()) == Some(100),
        detail: format!("{:?}", outcome),
    });

    results
}

// ── 6. Build Economy ────────────────────────────────────────────────────

fn validate_build_economy(_verbose: bool) -> Vec<TestResult> {
    println!("--- Build Economy ---");
    let mut results = Vec::new();

    let spec = StructureSpec::new(BuildableType::Floor, MaterialType::Wooden, 10);
    let mut economy = BuildEconomy::new();
    let mut inventory = InventoryLedger::default();
    inventory.add(ResourceType::Wood, 35);

    let mut placed = 0;
    while economy
        .place(&spec, Placement::default(), &mut inventory, &AlwaysValid)
        .is_ok()
    {
        placed += 1;
    }
    let left = inventory.get(ResourceType::Wood);
    results.push(TestResult {
        name: "build_affordability".into(),
        passed: placed == 3 && left == 5 && !can_afford(left, spec.construction_cost),
        detail: format!("{} placed from 35 wood, {} left", placed, left),
    });

    results.push(TestResult {
        name: "build_count".into(),
        passed: economy.build_parts_count() == 3,
        detail: format!("{} build parts", economy.build_parts_count()),
    });

    results
}

// ── 7. Objectives ───────────────────────────────────────────────────────

fn validate_objectives(_verbose: bool) -> Vec<TestResult> {
    println!("--- Objectives ---");
    let mut results = Vec::new();

    let mut evaluator = ObjectiveEvaluator::default();
    let mut signals = Vec::new();
    for _ in 0..7200 {
        if let Some(outcome) = evaluator.evaluate(ObjectiveProgress::default(), 1.0 / 16.0) {
            signals.push(outcome);
        }
    }
    results.push(TestResult {
        name: "objectives_timeout_once".into(),
        passed: signals == vec![GameOutcome::Lost(LossReason::Timeout)],
        detail: format!("{} signals over 450s", signals.len()),
    });

    let mut evaluator = ObjectiveEvaluator::default();
    let won = evaluator.evaluate(
        ObjectiveProgress {
            total_materials_collected: 500,
            build_parts_count: 5,
        },
        1.0,
    );
    let after = evaluator.evaluate(ObjectiveProgress::default(), 1000.0);
    results.push(TestResult {
        name: "objectives_win_final".into(),
        passed: won == Some(GameOutcome::Won) && after.is_none(),
        detail: format!("win={:?}, later={:?}", won, after),
    });

    results
}

// ── 8. Engine Sessions ──────────────────────────────────────────────────

/// Harvest until empty, resting a second whenever stamina runs short.
fn strip_node(engine: &mut SimulationEngine, node: Entity) -> bool {
    for _ in 0..100 {
        let depleted = engine
            .world
            .get::<&ResourceNode>(node)
            .map(|n| n.is_depleted())
            .unwrap_or(true);
        if depleted {
            return true;
        }
        match engine.interact_with(Some(node)) {
            InteractionOutcome::Denied(Denial::InsufficientStamina { .. }) => engine.update(1.0),
            InteractionOutcome::Harvested { .. } => {}
            _ => return false,
        }
    }
    false
}

fn validate_engine_sessions(config: &SessionConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Engine Sessions ---");
    let mut results = Vec::new();

    // Idle with default tuning: starvation arrives before the clock
    let mut engine = SimulationEngine::new(config.clone());
    if let Err(e) = engine.generate() {
        results.push(TestResult {
            name: "engine_generate".into(),
            passed: false,
            detail: format!("generation failed: {}", e),
        });
        return results;
    }
    let mut seconds = 0;
    while engine.outcome().is_none() && seconds < 1000 {
        engine.update(1.0);
        seconds += 1;
    }
    results.push(TestResult {
        name: "engine_idle_starves".into(),
        passed: engine.outcome() == Some(GameOutcome::Lost(LossReason::HealthDepleted)),
        detail: format!("{:?} after {}s", engine.outcome(), seconds),
    });

    // Scripted run: strip every node, build the target, win
    let mut tuned = config.clone();
    tuned.stats.hunger_decrease_rate = 0.25;
    let mut engine = SimulationEngine::new(tuned);
    let generated = engine.generate().is_ok();
    let nodes: Vec<Entity> = engine
        .layout()
        .map(|l| l.trees.iter().chain(&l.rocks).copied().collect())
        .unwrap_or_default();
    let stripped = nodes.iter().all(|n| strip_node(&mut engine, *n));

    let build_target = config.objectives.build_target;
    let mut built = 0;
    for i in 0..build_target {
        let ok = engine.start_building(0).is_ok()
            && engine
                .place_structure(Vec3::new(i as f32 * 200.0, -300.0, 0.0), 0.0)
                .is_ok();
        if ok {
            built += 1;
        }
    }
    engine.update(0.1);

    let hud = engine.hud();
    if verbose {
        println!(
            "  scripted run: {} nodes, {} built, {:.0}s elapsed, {} left",
            nodes.len(),
            built,
            hud.elapsed_seconds,
            hud.remaining_clock()
        );
        match serde_json::to_string_pretty(&hud) {
            Ok(json) => println!("  final HUD:\n{}", json),
            Err(e) => log::warn!("HUD snapshot did not serialize: {}", e),
        }
    }
    results.push(TestResult {
        name: "engine_scripted_win".into(),
        passed: generated
            && stripped
            && built == build_target
            && engine.outcome() == Some(GameOutcome::Won),
        detail: format!(
            "{:?} at {:.0}s with {} materials, {} parts",
            engine.outcome(),
            hud.elapsed_seconds,
            hud.player.as_ref().map(|p| p.total_materials_collected).unwrap_or(0),
            hud.build_parts_count
        ),
    });

    let placed_events = engine
        .drain_events()
        .iter()
        .filter(|e| matches!(e, SimEvent::StructurePlaced { .. }))
        .count();
    results.push(TestResult {
        name: "engine_structure_events".into(),
        passed: placed_events == build_target as usize,
        detail: format!("{} StructurePlaced events", placed_events),
    });

    results
}
