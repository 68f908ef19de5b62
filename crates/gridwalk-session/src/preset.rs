//! Ready-made obstacle layouts.
//!
//! Every preset is sized to the grid it is built for. Coordinates that fall
//! off a small grid are skipped for walls and clamped for Start/Target.

use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Cell, CellType, Grid, GridError};
use rand::Rng;

use crate::error::SessionError;

/// Probability that a cell becomes a wall in [`Preset::Random`].
pub const RANDOM_WALL_DENSITY: f64 = 0.25;

/// A named obstacle layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preset {
    /// No walls; Start and Target in opposite corners.
    Simple,
    /// Horizontal wall pairs with alternating gaps.
    Maze,
    /// Concentric rectangles around a Start in the middle.
    Spiral,
    /// Scattered walls.
    Random,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Simple, Self::Maze, Self::Spiral, Self::Random];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Maze => "maze",
            Self::Spiral => "spiral",
            Self::Random => "random",
        }
    }

    /// Build a fresh `rows × cols` grid with this layout.
    ///
    /// Only [`Preset::Random`] draws from `rng`.
    pub fn build<R: Rng>(self, rows: i32, cols: i32, rng: &mut R) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows, cols);
        if grid.is_empty() {
            return Ok(grid);
        }

        let (start, target) = match self {
            Self::Simple => ((5, 5), (rows - 6, cols - 6)),
            Self::Maze => ((2, 2), (rows - 3, cols - 3)),
            Self::Spiral => ((rows / 2, cols / 2), (2, 2)),
            Self::Random => ((5, 5), (rows - 6, cols - 6)),
        };
        let start = clamp(&grid, start);
        let target = clamp(&grid, target);

        match self {
            Self::Simple => {}
            Self::Maze => maze(&mut grid)?,
            Self::Spiral => spiral(&mut grid)?,
            Self::Random => {
                for r in 0..rows {
                    for c in 0..cols {
                        let cell = Cell::new(r, c);
                        if cell == start || cell == target {
                            continue;
                        }
                        if rng.random::<f64>() < RANDOM_WALL_DENSITY {
                            grid.set(cell, CellType::Wall)?;
                        }
                    }
                }
            }
        }

        grid.set_start(start)?;
        grid.set_target(target)?;
        Ok(grid)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SessionError::UnknownPreset(s.to_string()))
    }
}

fn clamp(grid: &Grid, (r, c): (i32, i32)) -> Cell {
    Cell::new(r.clamp(0, grid.rows() - 1), c.clamp(0, grid.cols() - 1))
}

/// Paint `kind` at `(r, c)` if the cell exists.
fn paint(grid: &mut Grid, r: i32, c: i32, kind: CellType) -> Result<(), GridError> {
    let cell = Cell::new(r, c);
    if grid.contains(cell) {
        grid.set(cell, kind)?;
    }
    Ok(())
}

fn maze(grid: &mut Grid) -> Result<(), GridError> {
    let (rows, cols) = (grid.rows(), grid.cols());
    for i in (5..rows - 5).step_by(8) {
        for j in 5..cols - 5 {
            paint(grid, i, j, CellType::Wall)?;
        }
        for j in 10..cols - 5 {
            paint(grid, i + 4, j, CellType::Wall)?;
        }
        paint(grid, i, cols - 10, CellType::Empty)?;
        paint(grid, i + 4, 10, CellType::Empty)?;
    }
    Ok(())
}

fn spiral(grid: &mut Grid) -> Result<(), GridError> {
    let (rows, cols) = (grid.rows(), grid.cols());
    for layer in 1..rows.min(cols) / 4 {
        let offset = layer * 3;
        for j in offset..cols - offset {
            paint(grid, offset, j, CellType::Wall)?;
            paint(grid, rows - offset - 1, j, CellType::Wall)?;
        }
        for i in offset..rows - offset {
            paint(grid, i, cols - offset - 1, CellType::Wall)?;
        }
        for i in offset + 1..rows - offset {
            paint(grid, i, offset, CellType::Wall)?;
        }
        paint(grid, offset, offset + 3, CellType::Empty)?;
    }
    Ok(())
}
