//! Player inventory: clamped per-resource counters plus a lifetime collection total.

use serde::{Deserialize, Serialize};

use crate::constants::{ResourceType, DEFAULT_MAX_ITEM_SLOT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLedger {
    wood: u32,
    stone: u32,
    berries: u32,
    max_slot: u32,
    /// Sum of every positive change ever applied. Spending never lowers it.
    total_materials_collected: u64,
}

impl InventoryLedger {
    pub fn new(max_slot: u32) -> Self {
        Self {
            wood: 0,
            stone: 0,
            berries: 0,
            max_slot,
            total_materials_collected: 0,
        }
    }

    /// Set a counter, clamped into `[0, max_slot]`. Returns the stored value.
    pub fn set(&mut self, resource: ResourceType, value: i64) -> u32 {
        let clamped = value.clamp(0, self.max_slot as i64) as u32;
        let slot = self.slot_mut(resource);
        let previous = *slot;
        *slot = clamped;

        if clamped > previous {
            self.total_materials_collected += (clamped - previous) as u64;
        }
        clamped
    }

    /// Add to a counter. Anything past `max_slot` is dropped and not counted.
    pub fn add(&mut self, resource: ResourceType, amount: u32) -> u32 {
        let target = self.get(resource) as i64 + amount as i64;
        self.set(resource, target)
    }

    /// Remove `amount` if the counter holds at least that much.
    pub fn spend(&mut self, resource: ResourceType, amount: u32) -> bool {
        let current = self.get(resource);
        if current < amount {
            return false;
        }
        self.set(resource, (current - amount) as i64);
        true
    }

    pub fn get(&self, resource: ResourceType) -> u32 {
        match resource {
            ResourceType::Wood => self.wood,
            ResourceType::Stone => self.stone,
            ResourceType::Berry => self.berries,
        }
    }

    pub fn total_materials_collected(&self) -> u64 {
        self.total_materials_collected
    }

    pub fn max_slot(&self) -> u32 {
        self.max_slot
    }

    fn slot_mut(&mut self, resource: ResourceType) -> &mut u32 {
        match resource {
            ResourceType::Wood => &mut self.wood,
            ResourceType::Stone => &mut self.stone,
            ResourceType::Berry => &mut self.berries,
        }
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEM_SLOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps() {
        let mut inv = InventoryLedger::new(999);
        assert_eq!(inv.set(ResourceType::Wood, -10), 0);
        assert_eq!(inv.set(ResourceType::Wood, 5000), 999);
        assert_eq!(inv.get(ResourceType::Wood), 999);
    }

    #[test]
    fn test_total_counts_only_positive_deltas() {
        let mut inv = InventoryLedger::default();
        inv.set(ResourceType::Wood, 30);
        inv.set(ResourceType::Wood, 10);
        inv.set(ResourceType::Wood, 25);
        inv.set(ResourceType::Stone, 4);

        // +30, -20, +15, +4
        assert_eq!(inv.total_materials_collected(), 49);
        assert_eq!(inv.get(ResourceType::Wood), 25);
    }

    #[test]
    fn test_total_is_monotonic() {
        let mut inv = InventoryLedger::new(50);
        let mut last_total = 0;
        let mut expected = 0u64;
        let script: [(ResourceType, i64); 8] = [
            (ResourceType::Wood, 20),
            (ResourceType::Berry, 3),
            (ResourceType::Wood, 0),
            (ResourceType::Wood, 70),
            (ResourceType::Stone, -4),
            (ResourceType::Stone, 12),
            (ResourceType::Berry, 1),
            (ResourceType::Berry, 2),
        ];

        for (resource, value) in script {
            let before = inv.get(resource);
            let after = inv.set(resource, value);
            if after > before {
                expected += (after - before) as u64;
            }
            assert!(inv.total_materials_collected() >= last_total);
            last_total = inv.total_materials_collected();
        }
        assert_eq!(inv.total_materials_collected(), expected);
        // 20 + 3 + 50 (clamped) + 12 + 1
        assert_eq!(expected, 86);
    }

    #[test]
    fn test_overflow_past_max_slot_not_counted() {
        let mut inv = InventoryLedger::new(10);
        inv.add(ResourceType::Stone, 8);
        inv.add(ResourceType::Stone, 8);
        assert_eq!(inv.get(ResourceType::Stone), 10);
        assert_eq!(inv.total_materials_collected(), 10);
    }

    #[test]
    fn test_spend() {
        let mut inv = InventoryLedger::default();
        inv.add(ResourceType::Wood, 12);
        assert!(inv.spend(ResourceType::Wood, 10));
        assert_eq!(inv.get(ResourceType::Wood), 2);
        assert!(!inv.spend(ResourceType::Wood, 3));
        assert_eq!(inv.get(ResourceType::Wood), 2);
        assert_eq!(inv.total_materials_collected(), 12);
    }
}
