//! The [`Grid`] type: a rows × cols obstacle map with a single Start and a
//! single Target.
//!
//! The grid owns the Start/Target bookkeeping so that the invariants hold no
//! matter which editing call is used: there is at most one Start and at most
//! one Target, and neither ever sits on a Wall.

use thiserror::Error;

use crate::geom::{CLOCKWISE, Cell};

/// Cost of a move along one axis.
pub const STRAIGHT_COST: f64 = 1.0;

/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = 1.414;

/// Cost of moving between two adjacent cells.
///
/// A move that changes both coordinates is diagonal; anything else is a
/// straight step.
#[inline]
pub fn move_cost(from: Cell, to: Cell) -> f64 {
    if from.manhattan(to) == 2 {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// The content of a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    #[default]
    Empty,
    Wall,
    Start,
    Target,
}

/// Errors raised by grid edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The cell lies outside the grid.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),
    /// A wall was requested on the Start or Target cell.
    #[error("cell {0} holds the start or target")]
    Reserved(Cell),
    /// Stored grid data whose cells and markers disagree.
    #[error("malformed grid: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rows × cols map from [`Cell`] to [`CellType`], stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    cells: Vec<CellType>,
    rows: i32,
    cols: i32,
    start: Option<Cell>,
    target: Option<Cell>,
}

impl Grid {
    /// Create an empty grid. Negative dimensions are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            cells: vec![CellType::Empty; (rows as usize) * (cols as usize)],
            rows,
            cols,
            start: None,
            target: None,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.rows && c.col < self.cols
    }

    #[inline]
    fn index(&self, c: Cell) -> Option<usize> {
        if self.contains(c) {
            Some((c.row as usize) * (self.cols as usize) + (c.col as usize))
        } else {
            None
        }
    }

    /// The content of `c`. Cells outside the grid read as [`CellType::Wall`].
    pub fn at(&self, c: Cell) -> CellType {
        self.index(c).map_or(CellType::Wall, |i| self.cells[i])
    }

    /// Whether a search may step onto `c`.
    #[inline]
    pub fn is_passable(&self, c: Cell) -> bool {
        self.at(c) != CellType::Wall
    }

    /// The Start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// The Target cell, if placed.
    #[inline]
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Set the content of `c`.
    ///
    /// `Start` and `Target` move the corresponding marker. `Empty` on the
    /// Start or Target cell unsets that marker. `Wall` on the Start or Target
    /// cell is refused.
    pub fn set(&mut self, c: Cell, kind: CellType) -> Result<(), GridError> {
        let i = self.index(c).ok_or(GridError::OutOfBounds(c))?;
        match kind {
            CellType::Start => return self.set_start(c),
            CellType::Target => return self.set_target(c),
            CellType::Wall => {
                if self.start == Some(c) || self.target == Some(c) {
                    return Err(GridError::Reserved(c));
                }
            }
            CellType::Empty => {
                if self.start == Some(c) {
                    self.start = None;
                }
                if self.target == Some(c) {
                    self.target = None;
                }
            }
        }
        self.cells[i] = kind;
        Ok(())
    }

    /// Place the Start marker on `c`, clearing the previous one.
    ///
    /// A wall on `c` is replaced. If `c` held the Target, the Target is
    /// unset.
    pub fn set_start(&mut self, c: Cell) -> Result<(), GridError> {
        let i = self.index(c).ok_or(GridError::OutOfBounds(c))?;
        if let Some(old) = self.start.take().and_then(|old| self.index(old)) {
            self.cells[old] = CellType::Empty;
        }
        if self.target == Some(c) {
            self.target = None;
        }
        self.cells[i] = CellType::Start;
        self.start = Some(c);
        Ok(())
    }

    /// Place the Target marker on `c`, clearing the previous one.
    ///
    /// A wall on `c` is replaced. If `c` held the Start, the Start is unset.
    pub fn set_target(&mut self, c: Cell) -> Result<(), GridError> {
        let i = self.index(c).ok_or(GridError::OutOfBounds(c))?;
        if let Some(old) = self.target.take().and_then(|old| self.index(old)) {
            self.cells[old] = CellType::Empty;
        }
        if self.start == Some(c) {
            self.start = None;
        }
        self.cells[i] = CellType::Target;
        self.target = Some(c);
        Ok(())
    }

    /// Reset every cell to Empty and unset Start and Target.
    pub fn clear(&mut self) {
        self.cells.fill(CellType::Empty);
        self.start = None;
        self.target = None;
    }

    /// Append the walkable neighbours of `c` to `buf`, in [`CLOCKWISE`]
    /// order. The caller clears `buf` before calling.
    pub fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend(
            CLOCKWISE
                .iter()
                .map(|&d| c + d)
                .filter(|&n| self.contains(n) && self.is_passable(n)),
        );
    }

    /// Row-major iterator over `(Cell, CellType)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellType)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (Cell::new(i as i32 / cols, i as i32 % cols), kind))
    }
}

/// Unchecked wire form of a [`Grid`]; validated by `TryFrom`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<CellType>,
    rows: i32,
    cols: i32,
    start: Option<Cell>,
    target: Option<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        if r.rows < 0 || r.cols < 0 {
            return Err(GridError::Malformed(format!(
                "negative dimensions {}x{}",
                r.rows, r.cols
            )));
        }
        let expected = (r.rows as usize).checked_mul(r.cols as usize);
        if expected != Some(r.cells.len()) {
            return Err(GridError::Malformed(format!(
                "{} cells for a {}x{} grid",
                r.cells.len(),
                r.rows,
                r.cols
            )));
        }
        let grid = Grid {
            cells: r.cells,
            rows: r.rows,
            cols: r.cols,
            start: r.start,
            target: r.target,
        };
        for (marker, kind) in [(grid.start, CellType::Start), (grid.target, CellType::Target)] {
            let count = grid.cells.iter().filter(|&&k| k == kind).count();
            let placed = match marker {
                Some(c) if !grid.contains(c) => return Err(GridError::OutOfBounds(c)),
                Some(c) => grid.at(c) == kind,
                None => true,
            };
            if !placed || count != usize::from(marker.is_some()) {
                return Err(GridError::Malformed(format!(
                    "{kind:?} marker does not match the cells"
                )));
            }
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(3, 4);
        g.set_start(Cell::new(0, 0)).unwrap();
        g.set_target(Cell::new(2, 3)).unwrap();
        g.set(Cell::new(1, 1), CellType::Wall).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn rejects_short_cells_and_stray_target() {
        let json = r#"{"cells":[],"rows":3,"cols":3,"start":{"row":0,"col":0},"target":{"row":9,"col":9}}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn rejects_marker_out_of_bounds() {
        let mut g = Grid::new(2, 2);
        g.set_target(Cell::new(1, 1)).unwrap();
        let json = serde_json::to_string(&g)
            .unwrap()
            .replace(r#""target":{"row":1,"col":1}"#, r#""target":{"row":9,"col":9}"#);
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn rejects_marker_that_disagrees_with_cells() {
        let mut g = Grid::new(2, 2);
        g.set_start(Cell::new(0, 0)).unwrap();
        let json = serde_json::to_string(&g)
            .unwrap()
            .replace(r#""start":{"row":0,"col":0}"#, r#""start":{"row":1,"col":1}"#);
        assert!(serde_json::from_str::<Grid>(&json).is_err());

        let json = serde_json::to_string(&g)
            .unwrap()
            .replace(r#""start":{"row":0,"col":0}"#, "null");
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }
}
