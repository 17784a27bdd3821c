//! Tabular level data
//!
//! `levels.csv` holds every level in one table with a header row:
//!
//! ```text
//! level,kind,x,y,w,h,param
//! 1,wall,480,16,960,32,0
//! 1,oxygen,300,200,24,24,30
//! ```
//!
//! `x`/`y` are box centers. `param` is the canister fill. Fields are split on
//! commas without quoting support.

use std::collections::HashMap;
use std::path::PathBuf;

use glam::Vec2;

use super::classify::{Category, classify};
use super::{DataRowError, LevelData, LevelLoadError, LevelSource, valid_fill};
use crate::sim::aabb::Aabb;

/// File name looked up in the data directory
pub const CSV_FILE: &str = "levels.csv";

/// One parsed row
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRow {
    pub level: u32,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// `None` when the column is absent, blank or not a number
    pub param: Option<f32>,
}

/// Column positions from the header row
#[derive(Debug, Clone)]
pub struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    pub fn parse(line: &str) -> Self {
        let columns = line
            .split(',')
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();
        Self { columns }
    }

    fn field<'a>(&self, fields: &[&'a str], name: &str) -> Option<&'a str> {
        self.columns
            .get(name)
            .and_then(|&i| fields.get(i))
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
    }
}

fn required<'a>(
    header: &Header,
    fields: &[&'a str],
    name: &'static str,
    line: usize,
) -> Result<&'a str, DataRowError> {
    header
        .field(fields, name)
        .ok_or(DataRowError::MissingField { line, field: name })
}

fn number<T: std::str::FromStr>(
    header: &Header,
    fields: &[&str],
    name: &'static str,
    line: usize,
) -> Result<T, DataRowError> {
    let raw = required(header, fields, name, line)?;
    raw.parse().map_err(|_| DataRowError::NotNumeric {
        line,
        field: name,
        value: raw.to_string(),
    })
}

/// Like `number`, but `nan` and `inf` count as malformed
fn finite(
    header: &Header,
    fields: &[&str],
    name: &'static str,
    line: usize,
) -> Result<f32, DataRowError> {
    let value: f32 = number(header, fields, name, line)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataRowError::NotNumeric {
            line,
            field: name,
            value: value.to_string(),
        })
    }
}

/// Parse one data row
pub fn parse_row(header: &Header, text: &str, line: usize) -> Result<LevelRow, DataRowError> {
    let fields: Vec<&str> = text.split(',').collect();
    Ok(LevelRow {
        level: number(header, &fields, "level", line)?,
        kind: required(header, &fields, "kind", line)?.to_lowercase(),
        x: finite(header, &fields, "x", line)?,
        y: finite(header, &fields, "y", line)?,
        w: finite(header, &fields, "w", line)?,
        h: finite(header, &fields, "h", line)?,
        param: header
            .field(&fields, "param")
            .and_then(|p| p.parse::<f32>().ok()),
    })
}

/// Parse a whole table, skipping malformed rows
pub fn parse_table(text: &str) -> Vec<LevelRow> {
    let mut lines = text.lines().enumerate();
    let Some((_, header_line)) = lines.next() else {
        return Vec::new();
    };
    let header = Header::parse(header_line);

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match parse_row(&header, line, i + 1) {
            Ok(row) => Some(row),
            Err(e) => {
                log::debug!("Skipping level row: {}", e);
                None
            }
        })
        .collect()
}

/// Build one level's data from parsed rows
pub fn level_from_rows(rows: &[LevelRow], level: u32, enemy_size: (f32, f32)) -> LevelData {
    let mut data = LevelData::default();
    for row in rows.iter().filter(|r| r.level == level) {
        let Some(category) = classify(&row.kind) else {
            log::debug!("Ignoring unknown kind {:?}", row.kind);
            continue;
        };
        let (w, h) = if category == Category::Enemy && (row.w <= 0.0 || row.h <= 0.0) {
            enemy_size
        } else {
            (row.w, row.h)
        };
        let bounds = Aabb::new(Vec2::new(row.x, row.y), w, h);
        data.place(category, bounds, &row.kind, row.param.and_then(valid_fill));
    }
    data
}

/// Levels read from `levels.csv`; the file is re-read on every load
#[derive(Debug, Clone)]
pub struct CsvLevels {
    pub path: PathBuf,
    pub enemy_size: (f32, f32),
}

impl CsvLevels {
    pub fn new(path: PathBuf, enemy_size: (f32, f32)) -> Self {
        Self { path, enemy_size }
    }

    fn read_rows(&self) -> Result<Vec<LevelRow>, LevelLoadError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| LevelLoadError::from_io(&self.path, e))?;
        Ok(parse_table(&text))
    }
}

impl LevelSource for CsvLevels {
    fn max_level(&self) -> u32 {
        match self.read_rows() {
            Ok(rows) => rows.iter().map(|r| r.level).max().unwrap_or(1).max(1),
            Err(_) => 1,
        }
    }

    fn load(&self, level: u32) -> Result<LevelData, LevelLoadError> {
        let rows = self.read_rows()?;
        let data = level_from_rows(&rows, level, self.enemy_size);
        if data.is_empty() {
            return Err(LevelLoadError::NoSuchLevel(level));
        }
        Ok(data)
    }
}
