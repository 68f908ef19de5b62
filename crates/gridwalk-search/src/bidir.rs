use std::collections::{HashSet, VecDeque};

use gridwalk_core::Cell;

use crate::path;
use crate::search::StepResult;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// One direction of a bidirectional search: a BFS queue plus its tree.
#[derive(Debug, Clone)]
struct Side {
    queue: VecDeque<Cell>,
    queued: HashSet<Cell>,
    tree: SearchTree,
}

impl Side {
    fn new(root: Cell) -> Self {
        Self {
            queue: VecDeque::from([root]),
            queued: HashSet::from([root]),
            tree: SearchTree::new(root),
        }
    }

    /// Expand the front of the queue. Returns the popped cell if the other
    /// side has already explored it.
    fn expand<P: Pather>(
        &mut self,
        other: &SearchTree,
        pather: &P,
        nbuf: &mut Vec<Cell>,
    ) -> Option<Cell> {
        let current = self.queue.pop_front()?;
        self.queued.remove(&current);
        self.tree.explore(current);

        if other.is_explored(current) {
            return Some(current);
        }

        nbuf.clear();
        pather.neighbors(current, nbuf);
        for &n in nbuf.iter() {
            if self.tree.is_explored(n) || self.queued.contains(&n) {
                continue;
            }
            self.queue.push_back(n);
            self.queued.insert(n);
            self.tree.link(n, current);
        }
        None
    }
}

/// Two breadth-first searches, one from Start and one from Target, taking
/// turns by the parity of the step counter.
///
/// Even steps expand the forward side (or the backward side if the forward
/// queue is empty); odd steps expand the backward side. The search is found
/// as soon as a freshly explored cell is already explored by the other side.
#[derive(Debug, Clone)]
pub struct Bidirectional {
    forward: Side,
    backward: Side,
    meeting: Option<Cell>,
    steps: usize,
    outcome: Option<StepResult>,
    nbuf: Vec<Cell>,
}

impl Bidirectional {
    pub fn new(start: Cell, target: Cell) -> Self {
        Self {
            forward: Side::new(start),
            backward: Side::new(target),
            meeting: None,
            steps: 0,
            outcome: None,
            nbuf: Vec::with_capacity(6),
        }
    }

    pub fn step<P: Pather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.outcome {
            return done;
        }
        if self.forward.queue.is_empty() && self.backward.queue.is_empty() {
            return self.finish(StepResult::Exhausted);
        }

        let meeting = if self.steps % 2 == 0 && !self.forward.queue.is_empty() {
            self.forward
                .expand(&self.backward.tree, pather, &mut self.nbuf)
        } else {
            // An odd turn with an empty backward queue passes without work.
            self.backward
                .expand(&self.forward.tree, pather, &mut self.nbuf)
        };

        if let Some(m) = meeting {
            self.meeting = Some(m);
            return self.finish(StepResult::Found(m));
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

    /// Number of turns taken; its parity picks the next side.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The first cell explored by both sides.
    #[inline]
    pub fn meeting(&self) -> Option<Cell> {
        self.meeting
    }

    #[inline]
    pub fn forward_tree(&self) -> &SearchTree {
        &self.forward.tree
    }

    #[inline]
    pub fn backward_tree(&self) -> &SearchTree {
        &self.backward.tree
    }

    pub fn forward_frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.forward.queue.iter().copied()
    }

    pub fn backward_frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.backward.queue.iter().copied()
    }

    #[inline]
    pub fn forward_frontier_len(&self) -> usize {
        self.forward.queue.len()
    }

    #[inline]
    pub fn backward_frontier_len(&self) -> usize {
        self.backward.queue.len()
    }

    /// Start → Target path through the meeting cell, once found.
    pub fn path(&self) -> Option<Vec<Cell>> {
        let m = self.meeting?;
        Some(path::join(&self.forward.tree, &self.backward.tree, m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{CellType, Grid};

    fn run(search: &mut Bidirectional, grid: &Grid) -> StepResult {
        loop {
            let r = search.step(grid);
            if r.is_terminal() {
                return r;
            }
        }
    }

    #[test]
    fn sides_alternate() {
        let grid = Grid::new(1, 6);
        let mut search = Bidirectional::new(Cell::new(0, 0), Cell::new(0, 5));
        search.step(&grid);
        assert!(search.forward_tree().is_explored(Cell::new(0, 0)));
        assert_eq!(search.backward_tree().explored_len(), 0);
        search.step(&grid);
        assert!(search.backward_tree().is_explored(Cell::new(0, 5)));
        assert_eq!(search.forward_tree().explored_len(), 1);
    }

    #[test]
    fn corridor_meets_in_the_middle() {
        let grid = Grid::new(1, 6);
        let mut search = Bidirectional::new(Cell::new(0, 0), Cell::new(0, 5));
        assert_eq!(run(&mut search, &grid), StepResult::Found(Cell::new(0, 3)));
        assert_eq!(search.meeting(), Some(Cell::new(0, 3)));
        assert_eq!(search.steps(), 6);
        assert_eq!(
            search.path(),
            Some((0..6).map(|c| Cell::new(0, c)).collect::<Vec<_>>())
        );
    }

    #[test]
    fn meeting_on_target_has_empty_backward_half() {
        let grid = Grid::new(1, 2);
        let mut search = Bidirectional::new(Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(run(&mut search, &grid), StepResult::Found(Cell::new(0, 1)));
        assert_eq!(search.path(), Some(vec![Cell::new(0, 0), Cell::new(0, 1)]));
    }

    #[test]
    fn path_has_no_repeats_on_open_grid() {
        let grid = Grid::new(6, 7);
        let mut search = Bidirectional::new(Cell::new(0, 0), Cell::new(5, 6));
        assert!(matches!(run(&mut search, &grid), StepResult::Found(_)));
        let path = search.path().unwrap();
        let unique: HashSet<Cell> = path.iter().copied().collect();
        assert_eq!(unique.len(), path.len());
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(5, 6)));
    }

    #[test]
    fn exhausted_only_when_both_queues_drain() {
        let mut grid = Grid::new(3, 3);
        for c in 0..3 {
            grid.set(Cell::new(1, c), CellType::Wall).unwrap();
        }
        let mut search = Bidirectional::new(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(run(&mut search, &grid), StepResult::Exhausted);
        assert_eq!(search.forward_tree().explored_len(), 3);
        assert_eq!(search.backward_tree().explored_len(), 3);
        assert_eq!(search.path(), None);
    }
}
