//! Grid tilemap levels
//!
//! One JSON file per level (`levels01.json`, `levels02.json`, ...). Layers are
//! grids of tile ids, rows listed top to bottom. Id 0 is empty. Each id maps to
//! a tileset entry whose texture name decides what the tile becomes:
//!
//! ```json
//! {
//!   "tile_width": 32, "tile_height": 32,
//!   "tileset": {
//!     "1": { "texture": "wall_brick.png" },
//!     "2": { "texture": "oxygen.png", "properties": { "fill": 40 } }
//!   },
//!   "layers": [ { "name": "main", "data": [[1, 1, 1], [1, 2, 0]] } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;
use serde_json::Value;

use super::classify::classify;
use super::{LevelData, LevelLoadError, LevelSource, valid_fill};
use crate::sim::aabb::Aabb;

/// One tileset entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileDef {
    /// Tiles without a texture are skipped
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileLayer {
    #[serde(default)]
    pub name: String,
    pub data: Vec<Vec<u32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileMap {
    pub tile_width: f32,
    pub tile_height: f32,
    #[serde(default)]
    pub tileset: HashMap<u32, TileDef>,
    pub layers: Vec<TileLayer>,
}

/// Read `fill` from tile properties: numbers or numeric strings
pub fn fill_property(properties: &serde_json::Map<String, Value>) -> Option<f32> {
    let fill = match properties.get("fill")? {
        Value::Number(n) => n.as_f64()? as f32,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    valid_fill(fill)
}

impl TileMap {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Classify every tile into level data. The world is y-up, so the first
    /// row of a layer is the top of the map.
    pub fn to_level(&self) -> LevelData {
        let mut data = LevelData::default();
        let (tw, th) = (self.tile_width, self.tile_height);

        for layer in &self.layers {
            let rows = layer.data.len();
            for (r, row) in layer.data.iter().enumerate() {
                for (c, &id) in row.iter().enumerate() {
                    if id == 0 {
                        continue;
                    }
                    let Some(def) = self.tileset.get(&id) else {
                        log::debug!("Layer {:?}: unknown tile id {}", layer.name, id);
                        continue;
                    };
                    let Some(texture) = def.texture.as_deref() else {
                        continue;
                    };
                    let Some(category) = classify(texture) else {
                        continue;
                    };
                    let center = Vec2::new(
                        (c as f32 + 0.5) * tw,
                        ((rows - 1 - r) as f32 + 0.5) * th,
                    );
                    let bounds = Aabb::new(center, tw, th);
                    data.place(category, bounds, texture, fill_property(&def.properties));
                }
            }
        }
        data
    }
}

/// Per-level tilemap files in a directory
#[derive(Debug, Clone)]
pub struct TilemapLevels {
    pub dir: PathBuf,
    pub level_max: u32,
}

impl TilemapLevels {
    pub fn new(dir: PathBuf, level_max: u32) -> Self {
        Self { dir, level_max }
    }

    /// `levels01.json` for level 1
    pub fn file_name(level: u32) -> String {
        format!("levels{:02}.json", level)
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(Self::file_name(level))
    }
}

/// Read and classify one tilemap file
pub fn load_tilemap(path: &Path) -> Result<LevelData, LevelLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LevelLoadError::from_io(path, e))?;
    let map = TileMap::parse(&text).map_err(|source| LevelLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(map.to_level())
}

impl LevelSource for TilemapLevels {
    fn max_level(&self) -> u32 {
        self.level_max.max(1)
    }

    fn load(&self, level: u32) -> Result<LevelData, LevelLoadError> {
        let path = self.path_for(level);
        log::info!("Loading map {}", path.display());
        load_tilemap(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Category;

    const MAP: &str = r#"{
        "tile_width": 32, "tile_height": 32,
        "tileset": {
            "1": { "texture": "Wall_Brick.png" },
            "2": { "texture": "oxygen.png", "properties": { "fill": 40 } },
            "3": { "texture": "кислород.png", "properties": { "fill": "junk" } },
            "4": { "texture": "door.png" },
            "5": { "texture": "enemy.png" },
            "6": { "properties": {} },
            "7": { "texture": "grass.png" }
        },
        "layers": [
            { "name": "top", "data": [[1, 1, 1], [2, 3, 4]] },
            { "name": "actors", "data": [[0, 5, 6], [7, 0, 9]] }
        ]
    }"#;

    #[test]
    fn test_tiles_classified() {
        let data = TileMap::parse(MAP).unwrap().to_level();
        assert_eq!(data.walls.len(), 3);
        assert_eq!(data.exits.len(), 1);
        assert_eq!(data.enemy_spawns.len(), 1);
        assert_eq!(data.pickups.len(), 2);
        assert_eq!(data.pickups[0].fill, Some(40.0));
        assert_eq!(data.pickups[1].fill, None);
    }

    #[test]
    fn test_rows_are_top_down() {
        let data = TileMap::parse(MAP).unwrap().to_level();
        // Walls in the first row sit above the pickups in the second
        assert_eq!(data.walls[0].bounds.center, Vec2::new(16.0, 48.0));
        assert_eq!(data.pickups[0].bounds.center, Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_fill_property_variants() {
        let mut props = serde_json::Map::new();
        assert_eq!(fill_property(&props), None);
        props.insert("fill".into(), Value::from(12.5));
        assert_eq!(fill_property(&props), Some(12.5));
        props.insert("fill".into(), Value::from("33"));
        assert_eq!(fill_property(&props), Some(33.0));
        props.insert("fill".into(), Value::Bool(true));
        assert_eq!(fill_property(&props), None);
    }

    #[test]
    fn test_source_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let src = TilemapLevels::new(dir.path().to_path_buf(), 5);
        assert!(matches!(src.load(1), Err(LevelLoadError::Missing(_))));

        std::fs::write(src.path_for(1), "{ broken").unwrap();
        assert!(matches!(src.load(1), Err(LevelLoadError::Json { .. })));

        std::fs::write(src.path_for(2), MAP).unwrap();
        let data = src.load(2).unwrap();
        assert!(data.walls.iter().all(|w| classify(&w.texture) == Some(Category::Wall)));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(TilemapLevels::file_name(3), "levels03.json");
        assert_eq!(TilemapLevels::file_name(12), "levels12.json");
    }
}
