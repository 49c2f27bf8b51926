//! Tiered, depletable resource nodes (trees, rocks).
//!
//! A node carries a tier table ordered from most full to most depleted. Mining
//! lowers `remaining`; the current tier is re-derived from the remaining
//! quantity after every mine so the render collaborator can swap visuals.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One depletion stage: the quantity at which it begins and what it looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTier {
    pub threshold: u32,
    pub visual_tag: String,
}

impl ResourceTier {
    pub fn new(threshold: u32, visual_tag: impl Into<String>) -> Self {
        Self {
            threshold,
            visual_tag: visual_tag.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceNode {
    tiers: Vec<ResourceTier>,
    current_index: usize,
    initial_index: usize,
    remaining: u32,
}

impl ResourceNode {
    /// Build a node positioned at `initial_index`, with `remaining` taken from that tier.
    ///
    /// Tables that are not strictly descending are sorted and de-duplicated;
    /// an out-of-range index is clamped. Only an empty table is rejected.
    pub fn new(
        name: &str,
        tiers: Vec<ResourceTier>,
        initial_index: usize,
    ) -> Result<Self, ConfigError> {
        let tiers = normalize_tiers(name, tiers)?;
        let mut node = Self {
            tiers,
            current_index: initial_index,
            initial_index,
            remaining: 0,
        };
        node.validate_indices();
        node.refresh_from_tier();
        Ok(node)
    }

    /// Session-start reset back to the configured initial tier.
    pub fn reset(&mut self) {
        self.current_index = self.initial_index;
        self.validate_indices();
        self.refresh_from_tier();
    }

    /// Jump straight to a tier, clamped into range; `remaining` follows the tier.
    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = index;
        self.validate_indices();
        self.refresh_from_tier();
    }

    /// Take up to `amount`. Returns what was actually taken.
    pub fn mine(&mut self, amount: u32) -> u32 {
        if self.is_depleted() {
            return 0;
        }

        let taken = amount.min(self.remaining);
        self.remaining -= taken;
        self.update_tier_from_remaining();
        taken
    }

    /// Take one tier's worth: everything down to the next tier's threshold.
    ///
    /// At the deepest tier there is no next threshold, so nothing is taken;
    /// any residual there is only reachable through [`Self::mine`].
    pub fn mine_chunk(&mut self) -> u32 {
        if self.is_depleted() {
            return 0;
        }
        let chunk = self.current_chunk_amount();
        self.mine(chunk)
    }

    /// Size of the chunk [`Self::mine_chunk`] would take right now.
    pub fn current_chunk_amount(&self) -> u32 {
        if self.is_depleted() {
            return 0;
        }
        match self.tiers.get(self.current_index + 1) {
            Some(next) => self.remaining.saturating_sub(next.threshold),
            None => 0,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    pub fn current_tier(&self) -> &ResourceTier {
        &self.tiers[self.current_index]
    }

    pub fn tiers(&self) -> &[ResourceTier] {
        &self.tiers
    }

    fn validate_indices(&mut self) {
        let last = self.tiers.len() - 1;
        self.current_index = self.current_index.min(last);
        self.initial_index = self.initial_index.min(last);
    }

    fn refresh_from_tier(&mut self) {
        self.remaining = self.tiers[self.current_index].threshold;
    }

    // Scan from most depleted toward most full; the first tier that still
    // covers `remaining` wins.
    fn update_tier_from_remaining(&mut self) {
        if let Some(index) = self
            .tiers
            .iter()
            .rposition(|tier| self.remaining <= tier.threshold)
        {
            self.current_index = index;
        }
    }
}

fn normalize_tiers(
    name: &str,
    mut tiers: Vec<ResourceTier>,
) -> Result<Vec<ResourceTier>, ConfigError> {
    if tiers.is_empty() {
        return Err(ConfigError::EmptyTierTable(name.to_string()));
    }

    let descending = tiers.windows(2).all(|w| w[0].threshold > w[1].threshold);
    if !descending {
        log::warn!(
            "Tier table for `{}` is not strictly descending; sorting and deduplicating",
            name
        );
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        tiers.dedup_by_key(|t| t.threshold);
    }
    Ok(tiers)
}
