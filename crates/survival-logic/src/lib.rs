//! Pure survival-session logic.
//!
//! Everything here is independent of the ECS world, the renderer and any
//! runtime. Functions take plain data and return results, so every rule of a
//! session (mining, hunger, building, winning) is unit-testable on its own.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`build`] | Structure archetypes, placement validation, material spending |
//! | [`config`] | Session configuration loaded from JSON, with validation |
//! | [`constants`] | Resource, material and buildable types (u8 IDs), asset keys |
//! | [`error`] | Configuration errors |
//! | [`interaction`] | Harvest arbitration: modes, stamina gating, outcomes |
//! | [`inventory`] | Clamped material counters and lifetime collection total |
//! | [`objectives`] | Win/lose evaluation against targets and a time budget |
//! | [`regrowth`] | Berry bush collection and regrowth timer |
//! | [`resource_node`] | Tiered mineable nodes (trees, rocks) |
//! | [`stats`] | Health, hunger and stamina with interval-driven updates |

pub mod build;
pub mod config;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod inventory;
pub mod objectives;
pub mod regrowth;
pub mod resource_node;
pub mod stats;
