//! Component definitions for the ECS session world.
//!
//! Components are pure data structs attached to entities.
//! Behavior lives in the systems and in `survival-logic`.

mod common;
mod gameplay;

pub use common::*;
pub use gameplay::*;
