//! Grid-size parsing — "RxC" strings into a concrete slots-per-page config.

use serde::{Deserialize, Serialize};

/// Grid size used when a binder's setting is absent or unparseable.
pub const DEFAULT_GRID_SIZE: &str = "3x3";

/// Rows×cols configuration of one card-page.
///
/// `total()` is fixed for the binder's lifetime unless the owner explicitly
/// changes grid size; changing it does NOT re-flow stored card positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
}

impl GridConfig {
    /// Parses `"3x3"`, `"4X3"`, `" 2x4 "` etc. Returns `None` for anything
    /// that is not two positive integers joined by an `x`.
    pub fn parse(s: &str) -> Option<Self> {
        let (rows, cols) = s.trim().split_once(['x', 'X'])?;
        let rows: u32 = rows.trim().parse().ok()?;
        let cols: u32 = cols.trim().parse().ok()?;
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(GridConfig { rows, cols })
    }

    /// Resolves an optional stored setting, falling back to 3x3 for missing
    /// or malformed values. Never errors: a bad setting degrades silently.
    pub fn from_setting(grid_size: Option<&str>) -> Self {
        grid_size
            .and_then(GridConfig::parse)
            .unwrap_or_default()
    }

    /// Card slots per card-page.
    pub fn total(&self) -> u32 {
        self.rows * self.cols
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { rows: 3, cols: 3 }
    }
}
