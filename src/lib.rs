//! I Can't Breathe - a top-down oxygen survival game
//!
//! Core modules:
//! - `sim`: Simulation (movement, collisions, oxygen, level state machine)
//! - `level`: Level data sources and sprite classification
//! - `game`: Orchestrator driven by an external host loop
//! - `renderer`: Rendering collaborator interface and frame layout
//! - `audio`: Audio collaborator interface and sound bank
//! - `assets`: Asset paths and placeholder fallback
//! - `platform`: Input mapping
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod game;
pub mod level;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the host's target rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default window dimensions
    pub const SCREEN_W: f32 = 960.0;
    pub const SCREEN_H: f32 = 640.0;
    pub const TITLE: &str = "I Can't Breathe";

    /// Player spawn used when a level does not supply one
    pub const SPAWN_X: f32 = 80.0;
    pub const SPAWN_Y: f32 = 80.0;
}

/// RGBA color, 0-255 per channel
pub type Color = [u8; 4];

/// Named colors used by the game
pub mod palette {
    use super::Color;

    pub const BLACK_OLIVE: Color = [59, 60, 54, 255];
    pub const BARN_RED: Color = [124, 10, 2, 255];
    pub const SPRING_GREEN: Color = [0, 255, 127, 255];
    pub const DAVY_GREY: Color = [85, 85, 85, 255];
    pub const AIR_FORCE_BLUE: Color = [93, 138, 168, 255];
    pub const WHITE: Color = [255, 255, 255, 255];
    pub const WHITE_SMOKE: Color = [245, 245, 245, 255];
    pub const LIGHT_GRAY: Color = [211, 211, 211, 255];
    pub const APRICOT: Color = [251, 206, 177, 255];
    pub const ELECTRIC_GREEN: Color = [0, 255, 0, 255];
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

/// Unit vector from `from` toward `to`, or `None` when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 { Some(delta / dist) } else { None }
}
