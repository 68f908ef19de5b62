use std::collections::{HashSet, VecDeque};

use gridwalk_core::Cell;

use crate::path;
use crate::search::StepResult;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// Breadth-first search over a FIFO queue.
///
/// A cell is queued at most once: neighbors already explored or already
/// waiting in the queue are skipped, which keeps the reconstructed path
/// shortest in edge count.
#[derive(Debug, Clone)]
pub struct Bfs {
    target: Cell,
    queue: VecDeque<Cell>,
    queued: HashSet<Cell>,
    tree: SearchTree,
    steps: usize,
    outcome: Option<StepResult>,
    nbuf: Vec<Cell>,
}

impl Bfs {
    pub fn new(start: Cell, target: Cell) -> Self {
        Self {
            target,
            queue: VecDeque::from([start]),
            queued: HashSet::from([start]),
            tree: SearchTree::new(start),
            steps: 0,
            outcome: None,
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pop the front of the queue and expand it.
    pub fn step<P: Pather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.outcome {
            return done;
        }
        let Some(current) = self.queue.pop_front() else {
            return self.finish(StepResult::Exhausted);
        };
        self.queued.remove(&current);
        self.tree.explore(current);

        if current == self.target {
            return self.finish(StepResult::Found(current));
        }

        self.nbuf.clear();
        pather.neighbors(current, &mut self.nbuf);
        for &n in &self.nbuf {
            if self.tree.is_explored(n) || self.queued.contains(&n) {
                continue;
            }
            self.queue.push_back(n);
            self.queued.insert(n);
            self.tree.link(n, current);
        }

        self.steps += 1;
        StepResult::Continue
    }

    fn finish(&mut self, result: StepResult) -> StepResult {
        self.outcome = Some(result);
        result
    }

    #[inline]
    pub fn outcome(&self) -> Option<StepResult> {
        self.outcome
    }

    /// Number of completed expansions.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Cells waiting in the queue, front first.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.queue.iter().copied()
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.queue.len()
    }

    /// Start → Target path, once found.
    pub fn path(&self) -> Option<Vec<Cell>> {
        match self.outcome {
            Some(StepResult::Found(goal)) => Some(path::reconstruct(&self.tree, goal)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{CellType, Grid};

    fn run(bfs: &mut Bfs, grid: &Grid) -> (StepResult, usize) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            let r = bfs.step(grid);
            if r.is_terminal() {
                return (r, ticks);
            }
        }
    }

    #[test]
    fn corridor() {
        let grid = Grid::new(1, 6);
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(0, 5));
        let (r, ticks) = run(&mut bfs, &grid);
        assert_eq!(r, StepResult::Found(Cell::new(0, 5)));
        assert_eq!(ticks, 6);
        assert_eq!(bfs.steps(), 5);
        assert_eq!(bfs.path().map(|p| p.len()), Some(6));
    }

    #[test]
    fn open_grid_takes_the_diagonal() {
        let grid = Grid::new(5, 5);
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(4, 4));
        run(&mut bfs, &grid);
        assert_eq!(
            bfs.path(),
            Some((0..5).map(|i| Cell::new(i, i)).collect::<Vec<_>>())
        );
    }

    #[test]
    fn first_step_queues_neighbors_in_order() {
        let grid = Grid::new(3, 3);
        let mut bfs = Bfs::new(Cell::new(1, 1), Cell::new(2, 0));
        assert_eq!(bfs.step(&grid), StepResult::Continue);
        let frontier: Vec<Cell> = bfs.frontier().collect();
        assert_eq!(
            frontier,
            vec![
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 0),
                Cell::new(0, 0),
            ]
        );
        assert_eq!(bfs.tree().explored_len(), 1);
    }

    #[test]
    fn no_cell_is_queued_twice() {
        let grid = Grid::new(4, 4);
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(3, 3));
        while !bfs.step(&grid).is_terminal() {
            let cells: Vec<Cell> = bfs.frontier().collect();
            let unique: HashSet<Cell> = cells.iter().copied().collect();
            assert_eq!(cells.len(), unique.len());
        }
    }

    #[test]
    fn walled_off_target_is_exhausted() {
        let mut grid = Grid::new(3, 3);
        for c in 0..3 {
            grid.set(Cell::new(1, c), CellType::Wall).unwrap();
        }
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(2, 2));
        let (r, _) = run(&mut bfs, &grid);
        assert_eq!(r, StepResult::Exhausted);
        assert!(!bfs.tree().is_explored(Cell::new(2, 2)));
        assert_eq!(bfs.path(), None);
    }

    #[test]
    fn terminal_step_is_idempotent() {
        let grid = Grid::new(1, 2);
        let mut bfs = Bfs::new(Cell::new(0, 0), Cell::new(0, 1));
        let (r, _) = run(&mut bfs, &grid);
        let steps = bfs.steps();
        assert_eq!(bfs.step(&grid), r);
        assert_eq!(bfs.step(&grid), r);
        assert_eq!(bfs.steps(), steps);
    }
}
