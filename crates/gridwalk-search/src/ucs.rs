use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use gridwalk_core::Cell;

use crate::path;
use crate::search::StepResult;
use crate::traits::WeightedPather;
use crate::tree::SearchTree;

/// A frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// cheapest entry first, and the smallest cell among equal costs.
#[derive(Clone, Copy, Debug)]
struct Entry {
    cost: f64,
    cell: Cell,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Uniform-cost search over a min-priority queue keyed by path cost.
///
/// Improved costs push a new entry without removing the old one; stale
/// entries are discarded when popped. Unlike the other searches, an
/// improvement overwrites the back-pointer.
#[derive(Debug, Clone)]
pub struct Ucs {
    target: Cell,
    open: BinaryHeap<Entry>,
    costs: HashMap<Cell, f64>,
    tree: SearchTree,
    steps: usize,
    outcome: Option<StepResult>,
    nbuf: Vec<Cell>,
}

impl Ucs {
    pub fn new(start: Cell, target: Cell) -> Self {
        Self {
            target,
            open: BinaryHeap::from([Entry {
                cost: 0.0,
                cell: start,
            }]),
            costs: HashMap::from([(start, 0.0)]),
            tree: SearchTree::new(start),
            steps: 0,
            outcome: None,
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pop the cheapest entry and relax its neighbors.
    pub fn step<P: WeightedPather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.outcome {
            return done;
        }
        let Some(Entry {
            cost,
            cell: current,
        }) = self.open.pop()
        else {
            return self.finish(StepResult::Exhausted);
        };

        // Skip stale entries.
        if !self.tree.explore(current) {
            return StepResult::Continue;
        }
        if current == self.target {
            return self.finish(StepResult::Found(current));
        }

        self.nbuf.clear();
        pather.neighbors(current, &mut self.nbuf);
        for &n in &self.nbuf {
            if self.tree.is_explored(n) {
                continue;
            }
            let tentative = cost + pather.cost(current, n);
            if self.costs.get(&n).is_some_and(|&known| tentative >= known) {
                continue;
            }
            self.costs.insert(n, tentative);
            self.open.push(Entry {
                cost: tentative,
                cell: n,
            });
            self.tree.relink(n, current);
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

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Best known cost to reach `c`.
    #[inline]
    pub fn cost_to(&self, c: Cell) -> Option<f64> {
        self.costs.get(&c).copied()
    }

    /// Cells with a queued entry, stale ones included, in heap order.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.open.iter().map(|e| e.cell)
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    pub fn path(&self) -> Option<Vec<Cell>> {
        match self.outcome {
            Some(StepResult::Found(goal)) => Some(path::reconstruct(&self.tree, goal)),
            _ => None,
        }
    }
}
