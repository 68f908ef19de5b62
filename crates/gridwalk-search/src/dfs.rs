use std::collections::HashSet;

use gridwalk_core::Cell;

use crate::path;
use crate::search::StepResult;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// Depth-first search over a LIFO stack of bare cells.
///
/// Neighbors are pushed in reverse expansion order so the next pop follows
/// the clockwise order. A neighbor is pushed only if it is neither explored
/// nor already on the stack; a popped cell that is already explored is
/// discarded without expansion. Back-pointers are first-writer-wins.
#[derive(Debug, Clone)]
pub struct Dfs {
    target: Cell,
    stack: Vec<Cell>,
    stacked: HashSet<Cell>,
    tree: SearchTree,
    steps: usize,
    outcome: Option<StepResult>,
    nbuf: Vec<Cell>,
}

impl Dfs {
    pub fn new(start: Cell, target: Cell) -> Self {
        Self {
            target,
            stack: vec![start],
            stacked: HashSet::from([start]),
            tree: SearchTree::new(start),
            steps: 0,
            outcome: None,
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pop the top of the stack and expand it.
    pub fn step<P: Pather>(&mut self, pather: &P) -> StepResult {
        if let Some(done) = self.outcome {
            return done;
        }
        let Some(current) = self.stack.pop() else {
            return self.finish(StepResult::Exhausted);
        };
        self.stacked.remove(&current);

        if !self.tree.explore(current) {
            return StepResult::Continue;
        }
        if current == self.target {
            return self.finish(StepResult::Found(current));
        }

        self.nbuf.clear();
        pather.neighbors(current, &mut self.nbuf);
        for &n in self.nbuf.iter().rev() {
            if self.tree.is_explored(n) || self.stacked.contains(&n) {
                continue;
            }
            self.stack.push(n);
            self.stacked.insert(n);
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

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Cells on the stack, bottom first.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.stack.iter().copied()
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
