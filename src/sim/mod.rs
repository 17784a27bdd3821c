//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; the outside world
//!   learns what happened through `GameEvent`s

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod motion;
pub mod particles;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use camera::Camera;
pub use collision::{Bounded, MoveResult, hits_any, overlaps_any, resolve_against_static};
pub use motion::{chase, move_player, player_velocity};
pub use particles::{EffectSystem, Emitter, Particle};
pub use state::{
    Actor, GameEvent, GamePhase, GameWorld, MoveIntent, Pickup, Player, StaticBody,
};
pub use tick::{
    Hooks, InputAction, advance_level, animate_sprites, handle_press, handle_release,
    reset_level, restart, start_new_game, tick,
};
