//! Player survival stats: health, hunger, stamina.
//!
//! Hunger and stamina each update on their own fixed interval. Intervals are
//! driven by accumulators inside [`SurvivalStats::tick`], so a long frame runs
//! every step it covered and the remainder carries to the next frame.

use serde::{Deserialize, Serialize};

/// Smallest update interval accepted, in seconds.
pub const MIN_UPDATE_INTERVAL: f32 = 0.001;

/// Static tuning for the three stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub max_health: f32,
    pub max_hunger: f32,
    pub max_stamina: f32,
    /// Optional starting values; invalid or missing values start at max.
    pub start_health: Option<f32>,
    pub start_hunger: Option<f32>,
    pub start_stamina: Option<f32>,
    /// Hunger lost per hunger update.
    pub hunger_decrease_rate: f32,
    /// Seconds between hunger updates.
    pub hunger_interval: f32,
    /// Health lost per hunger update while hunger is empty.
    pub starvation_damage: f32,
    /// Stamina regained per second when not draining.
    pub stamina_restore_rate: f32,
    /// Stamina lost per second while draining.
    pub stamina_decrease_rate: f32,
    /// Seconds between stamina updates.
    pub stamina_interval: f32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_hunger: 100.0,
            max_stamina: 100.0,
            start_health: None,
            start_hunger: None,
            start_stamina: None,
            hunger_decrease_rate: 1.0,
            hunger_interval: 1.0,
            starvation_damage: 5.0,
            stamina_restore_rate: 10.0,
            stamina_decrease_rate: 15.0,
            stamina_interval: 0.05,
        }
    }
}

/// A bounded value in `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    current: f32,
    max: f32,
}

impl Stat {
    pub fn new(max: f32, start: Option<f32>) -> Self {
        let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        Self {
            current: initialize_stat(start, max),
            max,
        }
    }

    pub fn set(&mut self, value: f32) {
        // NaN would slip through clamp; treat it as empty
        self.current = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max)
        };
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

/// Starting value for a stat: the supplied value when it is positive and within max.
pub fn initialize_stat(start: Option<f32>, max: f32) -> f32 {
    match start {
        Some(v) if v.is_finite() && v > 0.0 && v <= max => v,
        _ => max,
    }
}

/// Fires every `interval` seconds of accumulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    interval: f32,
    accumulated: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(MIN_UPDATE_INTERVAL),
            accumulated: 0.0,
        }
    }

    /// Add elapsed time and return how many whole intervals completed.
    pub fn advance(&mut self, delta_seconds: f32) -> u32 {
        self.accumulated += delta_seconds.max(0.0);
        let fires = (self.accumulated / self.interval).floor();
        self.accumulated -= fires * self.interval;
        fires as u32
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// What happened during one [`SurvivalStats::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsTick {
    pub hunger_steps: u32,
    pub stamina_steps: u32,
    /// Health reached zero during this tick.
    pub health_depleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalStats {
    health: Stat,
    hunger: Stat,
    stamina: Stat,
    hunger_decrease_rate: f32,
    starvation_damage: f32,
    stamina_restore_rate: f32,
    stamina_decrease_rate: f32,
    hunger_timer: IntervalTimer,
    stamina_timer: IntervalTimer,
    stamina_draining: bool,
}

impl SurvivalStats {
    pub fn new(config: &StatsConfig) -> Self {
        Self {
            health: Stat::new(config.max_health, config.start_health),
            hunger: Stat::new(config.max_hunger, config.start_hunger),
            stamina: Stat::new(config.max_stamina, config.start_stamina),
            hunger_decrease_rate: config.hunger_decrease_rate,
            starvation_damage: config.starvation_damage,
            stamina_restore_rate: config.stamina_restore_rate,
            stamina_decrease_rate: config.stamina_decrease_rate,
            hunger_timer: IntervalTimer::new(config.hunger_interval),
            stamina_timer: IntervalTimer::new(config.stamina_interval),
            stamina_draining: false,
        }
    }

    /// Advance both schedules by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) -> StatsTick {
        let mut report = StatsTick::default();
        let was_alive = !self.health.is_empty();

        report.hunger_steps = self.hunger_timer.advance(delta_seconds);
        for _ in 0..report.hunger_steps {
            self.update_hunger();
        }

        report.stamina_steps = self.stamina_timer.advance(delta_seconds);
        for _ in 0..report.stamina_steps {
            self.update_stamina();
        }

        report.health_depleted = was_alive && self.health.is_empty();
        report
    }

    fn update_hunger(&mut self) {
        self.hunger.set(self.hunger.current() - self.hunger_decrease_rate);

        if self.hunger.is_empty() {
            self.health.set(self.health.current() - self.starvation_damage);
        }
    }

    fn update_stamina(&mut self) {
        let interval = self.stamina_timer.interval();
        let change = if self.stamina_draining {
            -(self.stamina_decrease_rate * interval)
        } else {
            self.stamina_restore_rate * interval
        };
        self.stamina.set(self.stamina.current() + change);
    }

    /// Spend `cost` stamina if there is at least that much. Nothing changes otherwise.
    pub fn try_spend_stamina(&mut self, cost: f32) -> bool {
        if self.stamina.current() < cost {
            return false;
        }
        self.stamina.set(self.stamina.current() - cost);
        true
    }

    /// Returns `true` when this write took health from above zero to zero.
    pub fn set_health(&mut self, value: f32) -> bool {
        let was_alive = !self.health.is_empty();
        self.health.set(value);
        was_alive && self.health.is_empty()
    }

    pub fn set_hunger(&mut self, value: f32) {
        self.hunger.set(value);
    }

    pub fn set_stamina(&mut self, value: f32) {
        self.stamina.set(value);
    }

    pub fn toggle_stamina_drain(&mut self) {
        self.stamina_draining = !self.stamina_draining;
    }

    pub fn set_stamina_draining(&mut self, draining: bool) {
        self.stamina_draining = draining;
    }

    pub fn is_stamina_draining(&self) -> bool {
        self.stamina_draining
    }

    pub fn health(&self) -> Stat {
        self.health
    }

    pub fn hunger(&self) -> Stat {
        self.hunger
    }

    pub fn stamina(&self) -> Stat {
        self.stamina
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }
}

impl Default for SurvivalStats {
    fn default() -> Self {
        Self::new(&StatsConfig::default())
    }
}
