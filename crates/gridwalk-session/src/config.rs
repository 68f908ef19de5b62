//! Session configuration: grid size and depth bounds.

use crate::error::SessionError;

/// Step used when nudging the depth limit up or down.
pub const DEPTH_STEP: usize = 5;

/// Smallest depth limit reachable by nudging.
pub const MIN_NUDGED_DEPTH: usize = 5;

/// Largest depth limit reachable by nudging.
pub const MAX_NUDGED_DEPTH: usize = 100;

/// Largest number of cells a session grid may hold.
pub const MAX_CELLS: i64 = 1_000_000;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Grid height in cells.
    pub rows: i32,
    /// Grid width in cells.
    pub cols: i32,
    /// Fixed depth limit used by DLS.
    pub depth_limit: usize,
    /// Deepest limit IDDFS tries before giving up.
    pub iddfs_max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 50,
            depth_limit: 20,
            iddfs_max_depth: 50,
        }
    }
}

impl SearchConfig {
    /// Check that the grid has between one and [`MAX_CELLS`] cells and the
    /// depth limit is at least 1.
    pub fn validate(&self) -> Result<(), SessionError> {
        check_dimensions(self.rows, self.cols)?;
        if self.depth_limit == 0 {
            return Err(SessionError::InvalidDepthLimit(0));
        }
        Ok(())
    }

    /// The depth limit after moving it by `delta` nudges of [`DEPTH_STEP`],
    /// clamped to `MIN_NUDGED_DEPTH..=MAX_NUDGED_DEPTH`.
    pub fn nudged_depth_limit(&self, delta: i32) -> usize {
        let moved = self.depth_limit as i64 + i64::from(delta) * DEPTH_STEP as i64;
        moved.clamp(MIN_NUDGED_DEPTH as i64, MAX_NUDGED_DEPTH as i64) as usize
    }
}

pub(crate) fn check_dimensions(rows: i32, cols: i32) -> Result<(), SessionError> {
    if rows < 1 || cols < 1 || i64::from(rows) * i64::from(cols) > MAX_CELLS {
        return Err(SessionError::InvalidDimensions { rows, cols });
    }
    Ok(())
}
