use gridwalk_core::{Cell, Grid, move_cost};

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`, in expansion order. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}

impl Pather for Grid {
    #[inline]
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        Grid::neighbors(self, c, buf);
    }
}

impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        move_cost(from, to)
    }
}
