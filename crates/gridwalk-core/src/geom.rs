//! Grid coordinates: [`Cell`] and [`Offset`].
//!
//! Rows grow downward and columns grow to the right, matching the way the
//! obstacle grid is laid out on screen.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A relative move between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub dr: i32,
    pub dc: i32,
}

impl Offset {
    pub const NORTH: Self = Self::new(-1, 0);
    pub const EAST: Self = Self::new(0, 1);
    pub const SOUTH: Self = Self::new(1, 0);
    pub const SOUTH_EAST: Self = Self::new(1, 1);
    pub const WEST: Self = Self::new(0, -1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);

    /// Create a new offset.
    #[inline]
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// Whether the move changes both the row and the column.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }
}

/// The six moves the engine allows, in expansion order.
///
/// North, east, south, south-east, west, north-west. Only the
/// south-east/north-west diagonal is walkable.
pub const CLOCKWISE: [Offset; 6] = [
    Offset::NORTH,
    Offset::EAST,
    Offset::SOUTH,
    Offset::SOUTH_EAST,
    Offset::WEST,
    Offset::NORTH_WEST,
];

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A `(row, col)` coordinate in the grid.
///
/// Ordering is row-major, so ties between equal-cost frontier entries are
/// broken by the smaller row and then the smaller column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the cell moved by `(dr, dc)`.
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add<Offset> for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Offset) -> Self {
        self.shift(rhs.dr, rhs.dc)
    }
}

impl Sub for Cell {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}
