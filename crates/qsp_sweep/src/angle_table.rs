//! Persisted optimization results per grid point
//!
//! Gantree: L5_Sweep → AngleTable
//!
//! Maps a grid coordinate `(x, y)`, rounded to three decimals, to the packed
//! parameter vector and seeded error probability from `optimize`. Stored as
//! a JSON list of entries.

use qsp_core::{grid, QspError, QspResult};
use qsp_optimize::OptimizationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One stored grid point
/// Gantree: AngleEntry // 저장 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleEntry {
    /// Separation coordinate (units of π)
    pub x: f64,

    /// Std coordinate (units of π)
    pub y: f64,

    /// Packed parameters `[phases..., start θ, start φ, end θ, end φ]`
    pub params: Vec<f64>,

    /// Seeded error probability reached by the optimizer
    pub error_probability: f64,
}

/// Grid point → optimized parameters
/// Gantree: AngleTable // 각도 테이블
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AngleEntry>", into = "Vec<AngleEntry>")]
pub struct AngleTable {
    entries: BTreeMap<(i64, i64), AngleEntry>,
}

impl AngleTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `(params, error)` for `(x, y)`, replacing any previous entry
    pub fn insert(&mut self, x: f64, y: f64, params: Vec<f64>, error_probability: f64) {
        let (x, y) = (grid::round_key(x), grid::round_key(y));
        self.entries.insert(
            key(x, y),
            AngleEntry {
                x,
                y,
                params,
                error_probability,
            },
        );
    }

    /// Store an optimizer result
    pub fn insert_result(&mut self, x: f64, y: f64, result: OptimizationResult) {
        let (params, error) = result.into_pair();
        self.insert(x, y, params, error);
    }

    /// Entry for `(x, y)` if present
    pub fn get(&self, x: f64, y: f64) -> Option<&AngleEntry> {
        self.entries.get(&key(x, y))
    }

    /// Entry for `(x, y)` or `MissingGridPoint`
    /// Gantree: lookup(x,y) -> Result<&AngleEntry> // 조회
    pub fn lookup(&self, x: f64, y: f64) -> QspResult<&AngleEntry> {
        self.get(x, y).ok_or_else(|| QspError::MissingGridPoint {
            x: grid::round_key(x),
            y: grid::round_key(y),
        })
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by `(x, y)`
    pub fn iter(&self) -> impl Iterator<Item = &AngleEntry> {
        self.entries.values()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QspResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QspResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to `path`
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> QspResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|e| QspError::FileError(format!("{}: {}", path.display(), e)))
    }

    /// Read from `path`
    pub fn load_json<P: AsRef<Path>>(path: P) -> QspResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| QspError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

fn key(x: f64, y: f64) -> (i64, i64) {
    (grid::milli_key(x), grid::milli_key(y))
}

impl From<Vec<AngleEntry>> for AngleTable {
    fn from(list: Vec<AngleEntry>) -> Self {
        let mut table = Self::new();
        for entry in list {
            table.insert(entry.x, entry.y, entry.params, entry.error_probability);
        }
        table
    }
}

impl From<AngleTable> for Vec<AngleEntry> {
    fn from(table: AngleTable) -> Self {
        table.entries.into_values().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
