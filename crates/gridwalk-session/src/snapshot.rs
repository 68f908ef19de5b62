//! Read-only views of a session for rendering: [`Stats`] and [`Snapshot`].

use std::collections::HashSet;
use std::fmt;

use gridwalk_core::{Cell, CellType, Grid, move_cost};
use gridwalk_search::{Algorithm, Search};

use crate::session::Phase;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Summary counters for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub algorithm: Algorithm,
    pub phase: Phase,
    /// Completed expansions.
    pub steps: usize,
    /// `advance` calls that did work, including discards and restarts.
    pub ticks: usize,
    pub frontier: usize,
    pub frontier_backward: usize,
    pub explored: usize,
    pub explored_backward: usize,
    /// Cells on the path, Start and Target included; 0 without a path.
    pub path_len: usize,
    /// Sum of move costs along the path.
    pub path_cost: f64,
    /// DLS limit or current IDDFS limit.
    pub depth_limit: Option<usize>,
    pub restarts: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<13} {:<9} steps {:>5}  ticks {:>5}  explored {:>5}",
            self.algorithm.name(),
            self.phase,
            self.steps,
            self.ticks,
            self.explored + self.explored_backward,
        )?;
        if self.path_len > 0 {
            write!(f, "  path {:>3} cells (cost {:.3})", self.path_len, self.path_cost)?;
        }
        if let Some(limit) = self.depth_limit {
            write!(f, "  depth {limit}")?;
        }
        if self.restarts > 0 {
            write!(f, "  restarts {}", self.restarts)?;
        }
        Ok(())
    }
}

/// Total move cost of walking `path` in order.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.windows(2).map(|w| move_cost(w[0], w[1])).sum()
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// What a search has done to a cell, strongest first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlay {
    #[default]
    None,
    Path,
    Explored,
    /// Explored by the backward side of a bidirectional search.
    Explored2,
    Frontier,
    /// Queued by the backward side of a bidirectional search.
    Frontier2,
}

impl Overlay {
    fn glyph(self) -> char {
        match self {
            Self::None => '.',
            Self::Path => '*',
            Self::Explored => 'o',
            Self::Explored2 => 'x',
            Self::Frontier => '+',
            Self::Frontier2 => '-',
        }
    }
}

/// One cell of a [`Snapshot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub cell: Cell,
    pub kind: CellType,
    pub overlay: Overlay,
}

impl CellView {
    /// Single-character rendering: markers and walls first, then the
    /// overlay.
    pub fn glyph(&self) -> char {
        match self.kind {
            CellType::Wall => '#',
            CellType::Start => 'S',
            CellType::Target => 'T',
            CellType::Empty => self.overlay.glyph(),
        }
    }
}

/// A row-major copy of the grid with search overlays, plus stats.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<CellView>,
    pub stats: Stats,
}

impl Snapshot {
    pub(crate) fn capture(
        grid: &Grid,
        search: Option<&Search>,
        path: Option<&[Cell]>,
        stats: Stats,
    ) -> Self {
        let on_path: HashSet<Cell> = path.into_iter().flatten().copied().collect();
        let (frontier, frontier2): (HashSet<Cell>, HashSet<Cell>) = match search {
            Some(s) => (s.frontier().collect(), s.backward_frontier().collect()),
            None => Default::default(),
        };

        let overlay = |c: Cell| -> Overlay {
            let Some(s) = search else {
                return Overlay::None;
            };
            if on_path.contains(&c) {
                Overlay::Path
            } else if s.tree().is_explored(c) {
                Overlay::Explored
            } else if s.backward_tree().is_some_and(|t| t.is_explored(c)) {
                Overlay::Explored2
            } else if frontier.contains(&c) {
                Overlay::Frontier
            } else if frontier2.contains(&c) {
                Overlay::Frontier2
            } else {
                Overlay::None
            }
        };

        let cells = grid
            .iter()
            .map(|(cell, kind)| CellView {
                cell,
                kind,
                overlay: overlay(cell),
            })
            .collect();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
            stats,
        }
    }

    /// The view of `c`, if it lies inside the grid.
    pub fn at(&self, c: Cell) -> Option<&CellView> {
        if c.row < 0 || c.col < 0 || c.row >= self.rows || c.col >= self.cols {
            return None;
        }
        self.cells
            .get(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Render as text, one line per row.
    ///
    /// `#` wall, `S` start, `T` target, `*` path, `o` explored, `+` frontier,
    /// `x` and `-` the backward side's explored and frontier, `.` empty.
    pub fn render_ascii(&self) -> String {
        let width = self.cols.max(0) as usize;
        let mut out = String::with_capacity(self.cells.len() + self.rows.max(0) as usize);
        for (i, row) in self.cells.chunks(width.max(1)).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(CellView::glyph));
        }
        out
    }
}
