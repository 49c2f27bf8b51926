//! Configuration errors.
//!
//! Only input that cannot be corrected is an error. Out-of-range values are
//! clamped during validation and logged instead.

use thiserror::Error;

use crate::constants::ResourceType;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("resource node `{0}` has an empty tier table")]
    EmptyTierTable(String),

    #[error("no structure archetypes configured")]
    NoStructures,

    #[error("no node archetype yields {0:?}")]
    MissingArchetype(ResourceType),
}
