//! Depth-limited search and its iterative-deepening wrapper.

use gridwalk_core::Cell;

use crate::path;
use crate::search::StepResult;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// Result of one bounded step, before deciding what an empty stack means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bounded {
    Continue,
    Found(Cell),
    Drained,
}

/// Depth-limited search over a LIFO stack of `(cell, depth)` pairs.
///
/// Cells at the depth limit are explored but not expanded. The stack may
/// hold the same cell more than once; explored cells are discarded when
/// popped. Back-pointers are first-writer-wins.
#[derive(Debug, Clone)]
pub struct Dls {
    target: Cell,
    stack: Vec<(Cell, usize)>,
    tree: SearchTree,
    limit: usize,
    steps: usize,
    outcome: Option<StepResult>,
    nbuf: Vec<Cell>,
}

impl Dls {
    pub fn new(start: Cell, target: Cell, limit: usize) -> Self {
        Self {
            target,
            stack: vec![(start, 0)],
            tree: SearchTree::new(start),
            limit,
            steps: 0,
            outcome: None,
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pop the top of the stack and expand it if it is above the limit.
    pub fn step<P: Pather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.outcome {
            return done;
        }
        match self.step_bounded(pather) {
            Bounded::Continue => StepResult::Continue,
            Bounded::Found(c) => self.finish(StepResult::Found(c)),
            Bounded::Drained => self.finish(StepResult::Exhausted),
        }
    }

    fn step_bounded<P: Pather>(&mut self, pather: &P) -> Bounded {
        let Some((current, depth)) = self.stack.pop() else {
            return Bounded::Drained;
        };
        if !self.tree.explore(current) {
            return Bounded::Continue;
        }
        if current == self.target {
            return Bounded::Found(current);
        }

        if depth < self.limit {
            self.nbuf.clear();
            pather.neighbors(current, &mut self.nbuf);
            for &n in self.nbuf.iter().rev() {
                if self.tree.is_explored(n) {
                    continue;
                }
                self.stack.push((n, depth + 1));
                self.tree.link(n, current);
            }
        }

        self.steps += 1;
        Bounded::Continue
    }

    /// Drop all progress and search again from the root with `limit`.
    fn restart(&mut self, limit: usize) {
        let root = self.tree.root();
        self.tree.reset();
        self.stack.clear();
        self.stack.push((root, 0));
        self.limit = limit;
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

    /// The current depth limit.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Cells on the stack, bottom first, duplicates included.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.stack.iter().map(|&(c, _)| c)
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.stack.len()
    }

    pub fn path(&self) -> Option<Vec<Cell>> {
        match self.outcome {
            Some(StepResult::Found(goal)) => Some(path::reconstruct(&self.tree, goal)),
            _ => None,
        }
    }
}

/// Iterative-deepening DFS: a [`Dls`] that restarts one level deeper every
/// time its stack drains, starting from limit 0.
///
/// A restart clears the explored set and back-pointers and counts as a step
/// of its own. Once the pass at `max_depth` drains, the search is exhausted.
#[derive(Debug, Clone)]
pub struct Iddfs {
    inner: Dls,
    max_depth: usize,
    restarts: usize,
}

impl Iddfs {
    pub fn new(start: Cell, target: Cell, max_depth: usize) -> Self {
        Self {
            inner: Dls::new(start, target, 0),
            max_depth,
            restarts: 0,
        }
    }

    pub fn step<P: Pather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.inner.outcome {
            return done;
        }
        match self.inner.step_bounded(pather) {
            Bounded::Continue => StepResult::Continue,
            Bounded::Found(c) => self.inner.finish(StepResult::Found(c)),
            Bounded::Drained if self.inner.limit >= self.max_depth => {
                self.inner.finish(StepResult::Exhausted)
            }
            Bounded::Drained => {
                let drained = self.inner.limit;
                log::debug!("iddfs: limit {drained} drained, restarting at {}", drained + 1);
                self.inner.restart(drained + 1);
                self.restarts += 1;
                StepResult::Continue
            }
        }
    }

    #[inline]
    pub fn outcome(&self) -> Option<StepResult> {
        self.inner.outcome()
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.inner.steps()
    }

    /// The depth limit of the current pass.
    #[inline]
    pub fn limit(&self) -> usize {
        self.inner.limit()
    }

    /// The deepest limit that will be tried.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// How many times the search has restarted.
    #[inline]
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        self.inner.tree()
    }

    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.inner.frontier()
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.inner.frontier_len()
    }

    pub fn path(&self) -> Option<Vec<Cell>> {
        self.inner.path()
    }
}
