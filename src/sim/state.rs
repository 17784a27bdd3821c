//! Game world and core simulation types
//!
//! One `GameWorld` holds everything a running game mutates. It is passed by
//! reference into the tick; there is no global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::camera::Camera;
use super::particles::EffectSystem;
use crate::tuning::Tuning;

/// Current screen/lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Oxygen ran out
    GameOver,
    /// Every level finished (or no more level data)
    LevelClear,
}

/// Directional movement intent, held while a key is down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Anything that moves: the player or an enemy
#[derive(Debug, Clone)]
pub struct Actor {
    pub bounds: Aabb,
    /// Player: px per tick. Enemy: chase direction scaled by speed (px/s).
    /// Blocked axes read zero.
    pub vel: Vec2,
    /// Walk-cycle frame index for the renderer
    pub frame: u8,
}

impl Actor {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            vel: Vec2::ZERO,
            frame: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.bounds.center
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// The player-controlled actor
#[derive(Debug, Clone)]
pub struct Player {
    pub actor: Actor,
    pub intent: MoveIntent,
}

impl Player {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            actor: Actor::new(bounds),
            intent: MoveIntent::default(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.actor.pos()
    }
}

/// Immutable level geometry (walls and exit doors)
#[derive(Debug, Clone)]
pub struct StaticBody {
    pub bounds: Aabb,
    /// Texture name from the level data
    pub texture: String,
}

/// An oxygen canister
#[derive(Debug, Clone)]
pub struct Pickup {
    pub bounds: Aabb,
    /// Oxygen restored on contact
    pub fill: f32,
    pub texture: String,
}

/// Things the simulation reports to the outside world (audio, logging, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Previous level discarded, about to load `level`
    LevelReset { level: u32 },
    /// Level geometry loaded and play started
    LevelStarted { level: u32 },
    /// Player touched an enemy this tick
    PlayerHit { pos: Vec2 },
    /// Canister consumed
    OxygenCollected { pos: Vec2, fill: f32 },
    /// Oxygen reached zero; emitted once per life
    OutOfOxygen,
    /// Ran out of levels
    AllLevelsCleared,
}

/// Complete game world
#[derive(Debug)]
pub struct GameWorld {
    pub phase: GamePhase,
    /// Current level ordinal, 1-based
    pub level: u32,
    pub level_max: u32,
    /// Oxygen; may dip below zero between the drain and the death check
    pub oxygen: f32,
    /// Seconds survived on the current level
    pub elapsed: f32,
    /// Clock driving sprite animation
    pub anim_timer: f32,

    pub player: Option<Player>,
    pub walls: Vec<StaticBody>,
    pub exits: Vec<StaticBody>,
    pub pickups: Vec<Pickup>,
    pub enemies: Vec<Actor>,

    pub effects: EffectSystem,
    pub camera: Camera,

    /// Death cue already emitted for this life
    pub death_cue_played: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,

    pub tuning: Tuning,
    pub rng: Pcg32,
}

impl GameWorld {
    /// Create an empty world sitting on the menu
    pub fn new(tuning: Tuning, half_viewport: Vec2, level_max: u32, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            level: 1,
            level_max: level_max.max(1),
            oxygen: tuning.max_oxygen,
            elapsed: 0.0,
            anim_timer: 0.0,
            player: None,
            walls: Vec::new(),
            exits: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            effects: EffectSystem::new(tuning.effects.clone()),
            camera: Camera::new(half_viewport),
            death_cue_played: false,
            events: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Drop every level-owned entity, effect and pending world reference
    pub fn clear_level(&mut self) {
        self.player = None;
        self.walls.clear();
        self.exits.clear();
        self.pickups.clear();
        self.enemies.clear();
        self.effects.clear();
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Oxygen as a 0-1 fraction for the HUD
    pub fn oxygen_ratio(&self) -> f32 {
        (self.oxygen / self.tuning.max_oxygen).clamp(0.0, 1.0)
    }

    pub fn is_low_oxygen(&self) -> bool {
        self.oxygen <= self.tuning.low_oxygen_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        GameWorld::new(Tuning::default(), Vec2::new(480.0, 320.0), 5, 7)
    }

    #[test]
    fn test_new_world_on_menu() {
        let w = world();
        assert_eq!(w.phase, GamePhase::Menu);
        assert_eq!(w.level, 1);
        assert_eq!(w.oxygen, 100.0);
        assert!(w.player.is_none());
    }

    #[test]
    fn test_oxygen_ratio_clamped() {
        let mut w = world();
        w.oxygen = -12.0;
        assert_eq!(w.oxygen_ratio(), 0.0);
        assert!(w.is_low_oxygen());
        w.oxygen = 50.0;
        assert!((w.oxygen_ratio() - 0.5).abs() < 1e-6);
        assert!(!w.is_low_oxygen());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut w = world();
        w.events.push(GameEvent::OutOfOxygen);
        assert_eq!(w.drain_events(), vec![GameEvent::OutOfOxygen]);
        assert!(w.events.is_empty());
    }

    #[test]
    fn test_level_max_at_least_one() {
        let w = GameWorld::new(Tuning::default(), Vec2::ZERO, 0, 1);
        assert_eq!(w.level_max, 1);
    }
}
