//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so alternate builds can
//! ship different values without touching the simulation.

use serde::{Deserialize, Serialize};

/// Particle emitter parameters for damage/pickup effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    /// Seconds between particle spawns
    pub emit_interval: f32,
    /// Seconds the emitter keeps spawning
    pub emit_duration: f32,
    /// Max particle speed per axis (px/s)
    pub particle_speed: f32,
    /// Particle lifetime range (seconds)
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    /// Starting alpha for every particle
    pub start_alpha: u8,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            emit_interval: 0.02,
            emit_duration: 0.15,
            // 1.5 px per frame at 60 Hz
            particle_speed: 90.0,
            lifetime_min: 0.2,
            lifetime_max: 0.5,
            start_alpha: 220,
        }
    }
}

impl EffectTuning {
    /// Repair values that would stall or panic the emitter: non-finite or
    /// non-positive interval, negative speed or duration, reversed lifetimes.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        let emit_interval = finite_or(self.emit_interval, defaults.emit_interval);
        let mut lifetime_min = finite_or(self.lifetime_min, defaults.lifetime_min).max(0.0);
        let mut lifetime_max = finite_or(self.lifetime_max, defaults.lifetime_max).max(0.0);
        if lifetime_min > lifetime_max {
            std::mem::swap(&mut lifetime_min, &mut lifetime_max);
        }

        let fixed = Self {
            emit_interval: if emit_interval > 0.0 { emit_interval } else { defaults.emit_interval },
            emit_duration: finite_or(self.emit_duration, defaults.emit_duration).max(0.0),
            particle_speed: finite_or(self.particle_speed, defaults.particle_speed).abs(),
            lifetime_min,
            lifetime_max,
            start_alpha: self.start_alpha,
        };
        if fixed != self {
            log::warn!("Effect tuning adjusted from {:?} to {:?}", self, fixed);
        }
        fixed
    }
}

/// Game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player displacement per tick (px) along one axis
    pub player_speed: f32,
    /// Enemy chase speed (px/s)
    pub enemy_speed: f32,
    /// Player bounding box
    pub player_size: (f32, f32),
    /// Enemy bounding box when the level data does not give one
    pub enemy_size: (f32, f32),

    /// Oxygen lost per second of play
    pub oxygen_drain_per_sec: f32,
    /// Oxygen lost per tick spent touching an enemy
    pub oxygen_hit_loss: f32,
    /// HUD warns at or below this value
    pub low_oxygen_threshold: f32,
    pub max_oxygen: f32,
    /// Starting oxygen never drops below this
    pub min_start_oxygen: f32,
    /// Starting oxygen lost per level after the first
    pub oxygen_step_per_level: f32,
    /// Refill for canisters without a usable `fill`
    pub default_pickup_fill: f32,

    /// Fraction of the remaining distance the camera covers per tick
    pub camera_smoothing: f32,
    /// Seconds per walk-cycle frame
    pub anim_frame_time: f32,

    pub effects: EffectTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            enemy_speed: 120.0,
            player_size: (32.0, 32.0),
            enemy_size: (32.0, 32.0),
            oxygen_drain_per_sec: 6.0,
            oxygen_hit_loss: 18.0,
            low_oxygen_threshold: 25.0,
            max_oxygen: 100.0,
            min_start_oxygen: 40.0,
            oxygen_step_per_level: 10.0,
            default_pickup_fill: 25.0,
            camera_smoothing: 0.25,
            anim_frame_time: 0.2,
            effects: EffectTuning::default(),
        }
    }
}

impl Tuning {
    /// Oxygen the player starts a level with. Harder levels start lower.
    pub fn starting_oxygen(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.max_oxygen - steps * self.oxygen_step_per_level).max(self.min_start_oxygen)
    }

    /// Balance used by the alternate CSV-driven build (faster enemies)
    pub fn hard() -> Self {
        Self {
            enemy_speed: 140.0,
            ..Self::default()
        }
    }
}
