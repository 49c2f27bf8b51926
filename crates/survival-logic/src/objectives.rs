//! Win/lose evaluation: materials and build-part targets against a time budget.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveConfig {
    pub materials_target: u64,
    pub build_target: u32,
    /// Seconds of play before the session is lost.
    pub losing_time: f32,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            materials_target: 500,
            build_target: 5,
            losing_time: 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    Timeout,
    HealthDepleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost(LossReason),
}

/// Counters sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectiveProgress {
    pub total_materials_collected: u64,
    pub build_parts_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveEvaluator {
    config: ObjectiveConfig,
    /// Kept in f64 so thousands of small frame deltas still land on the budget.
    elapsed: f64,
    has_triggered_timeout: bool,
    outcome: Option<GameOutcome>,
}

impl ObjectiveEvaluator {
    pub fn new(config: ObjectiveConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            has_triggered_timeout: false,
            outcome: None,
        }
    }

    /// Per-frame check. Returns the outcome only on the frame it is decided.
    pub fn evaluate(
        &mut self,
        progress: ObjectiveProgress,
        delta_seconds: f32,
    ) -> Option<GameOutcome> {
        if self.has_ended() {
            return None;
        }

        if self.is_complete(progress) {
            return self.end(GameOutcome::Won);
        }

        if !self.has_triggered_timeout {
            self.elapsed += f64::from(delta_seconds.max(0.0));
            if self.elapsed >= self.losing_time() {
                self.has_triggered_timeout = true;
                return self.end(GameOutcome::Lost(LossReason::Timeout));
            }
        }
        None
    }

    /// Health hit zero. Loses the session unless it already ended.
    pub fn signal_health_depleted(&mut self) -> Option<GameOutcome> {
        if self.has_ended() {
            return None;
        }
        self.end(GameOutcome::Lost(LossReason::HealthDepleted))
    }

    pub fn is_complete(&self, progress: ObjectiveProgress) -> bool {
        progress.total_materials_collected >= self.config.materials_target
            && progress.build_parts_count >= self.config.build_target
    }

    /// Debug hook: rewrite elapsed so that `seconds` remain.
    pub fn set_time_left(&mut self, seconds: f32) {
        self.elapsed = (self.losing_time() - f64::from(seconds.max(0.0))).max(0.0);
    }

    pub fn remaining_time(&self) -> f32 {
        (self.losing_time() - self.elapsed).max(0.0) as f32
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    fn losing_time(&self) -> f64 {
        f64::from(self.config.losing_time)
    }

    pub fn has_triggered_timeout(&self) -> bool {
        self.has_triggered_timeout
    }

    pub fn has_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    fn end(&mut self, outcome: GameOutcome) -> Option<GameOutcome> {
        log::info!("Session ended: {:?} after {:.1}s", outcome, self.elapsed);
        self.outcome = Some(outcome);
        Some(outcome)
    }
}

impl Default for ObjectiveEvaluator {
    fn default() -> Self {
        Self::new(ObjectiveConfig::default())
    }
}
