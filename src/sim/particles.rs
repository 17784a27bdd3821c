//! Short-lived particle effects
//!
//! An emitter spawns particles at a fixed interval for a fixed window, then
//! goes quiet. Once it is quiet and its last particle has expired it can be
//! reaped. The effect system only shrinks during `update`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::Color;
use crate::tuning::EffectTuning;

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// px/s
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    /// Seconds at spawn, for fading
    pub max_life: f32,
    pub color: Color,
}

impl Particle {
    /// Current alpha, fading linearly from `start_alpha` to 0
    pub fn alpha(&self, start_alpha: u8) -> u8 {
        let t = (self.life / self.max_life).clamp(0.0, 1.0);
        (start_alpha as f32 * t).round() as u8
    }
}

/// A time-bounded particle source
#[derive(Debug, Clone)]
pub struct Emitter {
    pub pos: Vec2,
    pub color: Color,
    pub particles: Vec<Particle>,
    /// Seconds since spawn
    elapsed: f32,
    /// Time banked toward the next particle
    carry: f32,
    interval: f32,
    duration: f32,
}

impl Emitter {
    pub fn new(pos: Vec2, color: Color, interval: f32, duration: f32) -> Self {
        Self {
            pos,
            color,
            particles: Vec::new(),
            elapsed: 0.0,
            carry: 0.0,
            interval,
            duration,
        }
    }

    /// True while the emission window is open
    pub fn is_emitting(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Done emitting and every particle has expired
    pub fn can_reap(&self) -> bool {
        !self.is_emitting() && self.particles.is_empty()
    }

    /// How many particles to spawn for a `dt` step
    fn emit_count(&mut self, dt: f32) -> u32 {
        if !self.is_emitting() || self.interval <= 0.0 {
            self.elapsed += dt;
            return 0;
        }
        self.carry += dt;
        let mut count = 0;
        while self.carry > self.interval {
            self.carry -= self.interval;
            count += 1;
        }
        self.elapsed += dt;
        count
    }

    /// Advance particles, then spawn new ones
    pub fn update(&mut self, dt: f32, tuning: &EffectTuning, rng: &mut Pcg32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        let speed = tuning.particle_speed;
        for _ in 0..self.emit_count(dt) {
            let life = rng.random_range(tuning.lifetime_min..=tuning.lifetime_max);
            self.particles.push(Particle {
                pos: self.pos,
                vel: Vec2::new(
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                ),
                life,
                max_life: life,
                color: self.color,
            });
        }
    }
}

/// Every live emitter in the current level
#[derive(Debug, Clone, Default)]
pub struct EffectSystem {
    pub emitters: Vec<Emitter>,
    pub tuning: EffectTuning,
}

impl EffectSystem {
    pub fn new(tuning: EffectTuning) -> Self {
        Self {
            emitters: Vec::new(),
            tuning: tuning.sanitized(),
        }
    }

    /// Start a burst at `pos`
    pub fn spawn(&mut self, pos: Vec2, color: Color) {
        self.emitters.push(Emitter::new(
            pos,
            color,
            self.tuning.emit_interval,
            self.tuning.emit_duration,
        ));
    }

    /// Advance every emitter and drop the ones that can be reaped
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        let tuning = &self.tuning;
        for emitter in &mut self.emitters {
            emitter.update(dt, tuning, rng);
        }
        self.emitters.retain(|e| !e.can_reap());
    }

    pub fn clear(&mut self) {
        self.emitters.clear();
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.particles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BARN_RED;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_emitter_emits_during_window() {
        let mut fx = EffectSystem::new(EffectTuning::default());
        let mut rng = rng();
        fx.spawn(Vec2::new(10.0, 10.0), BARN_RED);
        for _ in 0..6 {
            fx.update(DT, &mut rng);
        }
        assert_eq!(fx.len(), 1);
        assert!(fx.particle_count() > 0);
    }

    #[test]
    fn test_emitter_reaped_after_window_and_particles() {
        let mut fx = EffectSystem::new(EffectTuning::default());
        let mut rng = rng();
        fx.spawn(Vec2::ZERO, BARN_RED);
        // 0.15s window + 0.5s max lifetime, plus slack
        for _ in 0..60 {
            fx.update(DT, &mut rng);
        }
        assert!(fx.is_empty());
    }

    #[test]
    fn test_quiet_emitter_with_live_particles_kept() {
        let tuning = EffectTuning::default();
        let mut rng = rng();
        let mut e = Emitter::new(Vec2::ZERO, BARN_RED, 0.02, 0.15);
        e.elapsed = 1.0;
        e.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.3,
            max_life: 0.3,
            color: BARN_RED,
        });
        let mut fx = EffectSystem {
            emitters: vec![e],
            tuning: tuning.clone(),
        };
        fx.update(DT, &mut rng);
        assert_eq!(fx.len(), 1);
    }

    #[test]
    fn test_quiet_empty_emitter_reaped_next_pass() {
        let mut e = Emitter::new(Vec2::ZERO, BARN_RED, 0.02, 0.15);
        e.elapsed = 0.2;
        assert!(e.can_reap());
        let mut fx = EffectSystem {
            emitters: vec![e],
            tuning: EffectTuning::default(),
        };
        fx.update(DT, &mut rng());
        assert!(fx.is_empty());
    }

    #[test]
    fn test_fresh_emitter_not_reapable() {
        let e = Emitter::new(Vec2::ZERO, BARN_RED, 0.02, 0.15);
        assert!(e.particles.is_empty());
        assert!(!e.can_reap());
    }

    #[test]
    fn test_particle_fades() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.25,
            max_life: 0.5,
            color: BARN_RED,
        };
        assert_eq!(p.alpha(220), 110);
    }

    #[test]
    fn test_particles_within_ranges() {
        let tuning = EffectTuning::default();
        let mut rng = rng();
        let mut e = Emitter::new(Vec2::ZERO, BARN_RED, 0.02, 0.15);
        e.update(0.1, &tuning, &mut rng);
        assert!(!e.particles.is_empty());
        for p in &e.particles {
            assert!(p.vel.x.abs() <= tuning.particle_speed);
            assert!(p.vel.y.abs() <= tuning.particle_speed);
            assert!(p.life >= tuning.lifetime_min && p.life <= tuning.lifetime_max);
        }
    }
}
