//! Berry bushes: a two-state (available / collected) resource that regrows over time.

use serde::{Deserialize, Serialize};

/// Shortest regrowth time accepted; keeps the progress division finite.
const MIN_REGROWTH_TIME: f32 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerryBush {
    /// Seconds for berries to fully regrow after collection.
    regrowth_time: f32,
    /// 0.0 right after collection, 1.0 when fully grown.
    progress: f32,
    collected: bool,
}

impl BerryBush {
    pub fn new(regrowth_time: f32) -> Self {
        Self {
            regrowth_time: regrowth_time.max(MIN_REGROWTH_TIME),
            progress: 1.0,
            collected: false,
        }
    }

    /// Mark the berries as taken. Returns `false` if they are still regrowing.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.progress = 0.0;
        true
    }

    /// Advance regrowth by `delta_seconds`.
    ///
    /// Returns the new progress while regrowing, `None` when nothing changed.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<f32> {
        if !self.collected {
            return None;
        }

        self.progress += delta_seconds.max(0.0) / self.regrowth_time;
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.collected = false;
        }
        Some(self.progress)
    }

    pub fn is_available(&self) -> bool {
        !self.collected
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn regrowth_time(&self) -> f32 {
        self.regrowth_time
    }
}

impl Default for BerryBush {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_once_until_regrown() {
        let mut bush = BerryBush::new(10.0);
        assert!(bush.is_available());
        assert!(bush.collect());
        assert!(!bush.collect());
        assert!((bush.progress() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_regrowth_is_linear() {
        let mut bush = BerryBush::new(10.0);
        bush.collect();

        let p = bush.tick(2.5).unwrap();
        assert!((p - 0.25).abs() < 1e-6);
        assert!(bush.is_collected());

        bush.tick(5.0);
        assert!((bush.progress() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_regrowth_completes_and_clamps() {
        let mut bush = BerryBush::new(10.0);
        bush.collect();
        let p = bush.tick(25.0).unwrap();
        assert!((p - 1.0).abs() < f32::EPSILON);
        assert!(bush.is_available());
        assert!(bush.collect());
    }

    #[test]
    fn test_available_bush_ignores_ticks() {
        let mut bush = BerryBush::new(10.0);
        assert_eq!(bush.tick(1.0), None);
        assert!((bush.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_regrowth_time_regrows_next_tick() {
        let mut bush = BerryBush::new(0.0);
        bush.collect();
        bush.tick(0.016);
        assert!(bush.is_available());
    }
}
