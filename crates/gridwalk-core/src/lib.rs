//! **gridwalk-core**: the grid model shared by the search engine and its
//! drivers.
//!
//! This crate provides the coordinate type, the six-direction adjacency used
//! by every search, the move-cost model, and the editable obstacle [`Grid`].

pub mod geom;
pub mod grid;

pub use geom::{CLOCKWISE, Cell, Offset};
pub use grid::{CellType, DIAGONAL_COST, Grid, GridError, STRAIGHT_COST, move_cost};
