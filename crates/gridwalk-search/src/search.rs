//! The algorithm tag, the step result, and the [`Search`] enum that
//! dispatches one step to whichever algorithm is active.

use std::fmt;
use std::str::FromStr;

use gridwalk_core::Cell;
use thiserror::Error;

use crate::bfs::Bfs;
use crate::bidir::Bidirectional;
use crate::dfs::Dfs;
use crate::dls::{Dls, Iddfs};
use crate::traits::WeightedPather;
use crate::tree::SearchTree;
use crate::ucs::Ucs;

// ---------------------------------------------------------------------------
// StepResult
// ---------------------------------------------------------------------------

/// Outcome of a single step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    /// More work remains.
    Continue,
    /// The goal was reached. Carries the target, or the meeting cell for a
    /// bidirectional search.
    Found(Cell),
    /// The frontier ran out (or the deepening ceiling was hit).
    Exhausted,
}

impl StepResult {
    /// Whether the search is over.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The six search strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::Ucs,
        Self::Dls,
        Self::Iddfs,
        Self::Bidirectional,
    ];

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Ucs => "UCS",
            Self::Dls => "DLS",
            Self::Iddfs => "IDDFS",
            Self::Bidirectional => "Bidirectional",
        }
    }

    /// One-line description of the frontier discipline.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Bfs => "Queue (FIFO), shortest path in steps",
            Self::Dfs => "Stack (LIFO), goes deep first",
            Self::Ucs => "Priority queue, cheapest path by move cost",
            Self::Dls => "Depth-limited DFS, stops at the depth limit",
            Self::Iddfs => "Iterative deepening, raises the limit one level at a time",
            Self::Bidirectional => "Two BFS frontiers, from start and from target",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Returned when a name matches none of the six algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm \u{201c}{0}\u{201d}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// The state of one running search.
#[derive(Debug, Clone)]
pub enum Search {
    Bfs(Bfs),
    Dfs(Dfs),
    Ucs(Ucs),
    Dls(Dls),
    Iddfs(Iddfs),
    Bidirectional(Bidirectional),
}

impl Search {
    /// Build the initial state for `algorithm`.
    ///
    /// `depth_limit` only applies to DLS and `max_depth` only to IDDFS.
    pub fn new(
        algorithm: Algorithm,
        start: Cell,
        target: Cell,
        depth_limit: usize,
        max_depth: usize,
    ) -> Self {
        match algorithm {
            Algorithm::Bfs => Self::Bfs(Bfs::new(start, target)),
            Algorithm::Dfs => Self::Dfs(Dfs::new(start, target)),
            Algorithm::Ucs => Self::Ucs(Ucs::new(start, target)),
            Algorithm::Dls => Self::Dls(Dls::new(start, target, depth_limit)),
            Algorithm::Iddfs => Self::Iddfs(Iddfs::new(start, target, max_depth)),
            Algorithm::Bidirectional => Self::Bidirectional(Bidirectional::new(start, target)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
            Self::Ucs(_) => Algorithm::Ucs,
            Self::Dls(_) => Algorithm::Dls,
            Self::Iddfs(_) => Algorithm::Iddfs,
            Self::Bidirectional(_) => Algorithm::Bidirectional,
        }
    }

    /// Advance by one unit of work. After a terminal result every further
    /// call returns that result unchanged.
    pub fn step<P: WeightedPather>(&mut self, pather: &P) -> StepResult {
        match self {
            Self::Bfs(s) => s.step(pather),
            Self::Dfs(s) => s.step(pather),
            Self::Ucs(s) => s.step(pather),
            Self::Dls(s) => s.step(pather),
            Self::Iddfs(s) => s.step(pather),
            Self::Bidirectional(s) => s.step(pather),
        }
    }

    /// The terminal result, if reached.
    pub fn outcome(&self) -> Option<StepResult> {
        match self {
            Self::Bfs(s) => s.outcome(),
            Self::Dfs(s) => s.outcome(),
            Self::Ucs(s) => s.outcome(),
            Self::Dls(s) => s.outcome(),
            Self::Iddfs(s) => s.outcome(),
            Self::Bidirectional(s) => s.outcome(),
        }
    }

    /// Completed expansions (turns, for bidirectional search).
    pub fn steps(&self) -> usize {
        match self {
            Self::Bfs(s) => s.steps(),
            Self::Dfs(s) => s.steps(),
            Self::Ucs(s) => s.steps(),
            Self::Dls(s) => s.steps(),
            Self::Iddfs(s) => s.steps(),
            Self::Bidirectional(s) => s.steps(),
        }
    }

    /// Start → Target path, once found.
    pub fn path(&self) -> Option<Vec<Cell>> {
        match self {
            Self::Bfs(s) => s.path(),
            Self::Dfs(s) => s.path(),
            Self::Ucs(s) => s.path(),
            Self::Dls(s) => s.path(),
            Self::Iddfs(s) => s.path(),
            Self::Bidirectional(s) => s.path(),
        }
    }

    /// The tree rooted at Start.
    pub fn tree(&self) -> &SearchTree {
        match self {
            Self::Bfs(s) => s.tree(),
            Self::Dfs(s) => s.tree(),
            Self::Ucs(s) => s.tree(),
            Self::Dls(s) => s.tree(),
            Self::Iddfs(s) => s.tree(),
            Self::Bidirectional(s) => s.forward_tree(),
        }
    }

    /// The tree rooted at Target, for bidirectional search.
    pub fn backward_tree(&self) -> Option<&SearchTree> {
        match self {
            Self::Bidirectional(s) => Some(s.backward_tree()),
            _ => None,
        }
    }

    /// Cells in the (forward) frontier container, duplicates and stale
    /// entries included.
    pub fn frontier(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        match self {
            Self::Bfs(s) => Box::new(s.frontier()),
            Self::Dfs(s) => Box::new(s.frontier()),
            Self::Ucs(s) => Box::new(s.frontier()),
            Self::Dls(s) => Box::new(s.frontier()),
            Self::Iddfs(s) => Box::new(s.frontier()),
            Self::Bidirectional(s) => Box::new(s.forward_frontier()),
        }
    }

    /// Cells in the backward frontier; empty for unidirectional searches.
    pub fn backward_frontier(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        match self {
            Self::Bidirectional(s) => Box::new(s.backward_frontier()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Number of entries in the (forward) frontier container.
    pub fn frontier_len(&self) -> usize {
        match self {
            Self::Bfs(s) => s.frontier_len(),
            Self::Dfs(s) => s.frontier_len(),
            Self::Ucs(s) => s.frontier_len(),
            Self::Dls(s) => s.frontier_len(),
            Self::Iddfs(s) => s.frontier_len(),
            Self::Bidirectional(s) => s.forward_frontier_len(),
        }
    }

    pub fn backward_frontier_len(&self) -> usize {
        match self {
            Self::Bidirectional(s) => s.backward_frontier_len(),
            _ => 0,
        }
    }

    /// The active depth limit: the fixed DLS limit, or the current IDDFS
    /// pass.
    pub fn depth_limit(&self) -> Option<usize> {
        match self {
            Self::Dls(s) => Some(s.limit()),
            Self::Iddfs(s) => Some(s.limit()),
            _ => None,
        }
    }

    /// IDDFS restarts so far; zero for every other algorithm.
    pub fn restarts(&self) -> usize {
        match self {
            Self::Iddfs(s) => s.restarts(),
            _ => 0,
        }
    }
}
