//! Survival Core - session engine
//!
//! An ECS-based host for one survival session: a player who mines trees and
//! rocks, picks berries, and spends the materials on structures before the
//! clock runs out or hunger wins.
//!
//! # Architecture
//!
//! The session uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: the player, resource nodes, berry bushes, placed structures
//! - **Components**: pure data; the stateful ones come from `survival-logic`
//! - **Systems**: regrowth, vitals and targeting, run from [`engine::SimulationEngine::update`]
//!
//! # Example
//!
//! ```rust,no_run
//! use survival_core::prelude::*;
//!
//! let mut engine = SimulationEngine::default();
//! engine.generate().expect("default config spawns");
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for event in engine.drain_events() {
//!         println!("{}", event.kind());
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod events;
pub mod generation;
pub mod hud;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{BuildError, SimulationEngine};
    pub use crate::events::SimEvent;
    pub use crate::hud::HudSnapshot;
}
