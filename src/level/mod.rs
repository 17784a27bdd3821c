//! Level data sources
//!
//! A source turns a level ordinal into typed placements: walls, exits,
//! oxygen canisters, enemy spawns and an optional player spawn. Two on-disk
//! formats are supported:
//! - `levels.csv`: one row per element, all levels in one table
//! - `levelsNN.json`: one grid tilemap per level
//!
//! Failures surface as `LevelLoadError`; the state machine treats any of
//! them as "no more levels".

pub mod classify;
pub mod csv;
pub mod tilemap;

use std::path::{Path, PathBuf};

use glam::Vec2;
use thiserror::Error;

pub use classify::{Category, ClassifyRule, RULES, classify};
pub use csv::{CsvLevels, LevelRow};
pub use tilemap::{TileMap, TilemapLevels};

use crate::settings::Settings;
use crate::sim::aabb::Aabb;

/// Errors that stop a whole level from loading
#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("level data not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tilemap {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {0} is not in the level data")]
    NoSuchLevel(u32),
}

impl LevelLoadError {
    /// Map an I/O error, turning "not found" into `Missing`
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LevelLoadError::Missing(path.to_path_buf())
        } else {
            LevelLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// A single malformed record; the record is skipped and loading continues
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataRowError {
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: field `{field}` is not a number: {value:?}")]
    NotNumeric {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// A placed static element or spawn
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub bounds: Aabb,
    pub texture: String,
}

/// A placed oxygen canister; `fill` is `None` when the data had no usable value
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPlacement {
    pub bounds: Aabb,
    pub texture: String,
    pub fill: Option<f32>,
}

/// Everything a level needs to start
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelData {
    pub walls: Vec<Placement>,
    pub exits: Vec<Placement>,
    pub pickups: Vec<PickupPlacement>,
    pub enemy_spawns: Vec<Placement>,
    pub player_spawn: Option<Vec2>,
}

impl LevelData {
    /// File a classified element under its category
    pub fn place(&mut self, category: Category, bounds: Aabb, texture: &str, fill: Option<f32>) {
        let texture = texture.to_string();
        match category {
            Category::Wall => self.walls.push(Placement { bounds, texture }),
            Category::Exit => self.exits.push(Placement { bounds, texture }),
            Category::Oxygen => self.pickups.push(PickupPlacement {
                bounds,
                texture,
                fill,
            }),
            Category::Enemy => self.enemy_spawns.push(Placement { bounds, texture }),
            Category::PlayerSpawn => self.player_spawn = Some(bounds.center),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
            && self.exits.is_empty()
            && self.pickups.is_empty()
            && self.enemy_spawns.is_empty()
            && self.player_spawn.is_none()
    }
}

/// Fill values must be finite and positive to count
pub fn valid_fill(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Anything that can produce levels by ordinal
pub trait LevelSource {
    /// Highest level ordinal available
    fn max_level(&self) -> u32;

    /// Load one level (1-based)
    fn load(&self, level: u32) -> Result<LevelData, LevelLoadError>;
}

/// Levels held in memory, ordinal `n` at index `n - 1`
#[derive(Debug, Clone, Default)]
pub struct MemoryLevels {
    pub levels: Vec<LevelData>,
}

impl MemoryLevels {
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }
}

impl LevelSource for MemoryLevels {
    fn max_level(&self) -> u32 {
        self.levels.len().max(1) as u32
    }

    fn load(&self, level: u32) -> Result<LevelData, LevelLoadError> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .cloned()
            .ok_or(LevelLoadError::NoSuchLevel(level))
    }
}

/// Pick the level source for the configured data directory.
///
/// `levels.csv` wins when present; otherwise per-level JSON tilemaps.
pub fn open_source(settings: &Settings) -> Box<dyn LevelSource> {
    let csv_path = settings.data_dir.join(csv::CSV_FILE);
    if csv_path.exists() {
        log::info!("Using level table {}", csv_path.display());
        Box::new(CsvLevels::new(csv_path, settings.tuning.enemy_size))
    } else {
        log::info!("Using tilemaps in {}", settings.data_dir.display());
        Box::new(TilemapLevels::new(settings.data_dir.clone(), settings.level_max))
    }
}
