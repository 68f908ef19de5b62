//! Explored set and back-pointer map of a single search rooted at one cell.

use std::collections::{HashMap, HashSet};

use gridwalk_core::Cell;

/// The explored cells and back-pointers of one search direction.
///
/// The root maps to no predecessor. Every other linked cell maps to the
/// cell that discovered it.
#[derive(Debug, Clone)]
pub struct SearchTree {
    root: Cell,
    explored: HashSet<Cell>,
    parents: HashMap<Cell, Option<Cell>>,
}

impl SearchTree {
    /// Create a tree containing only `root`, unexplored.
    pub fn new(root: Cell) -> Self {
        let mut parents = HashMap::new();
        parents.insert(root, None);
        Self {
            root,
            explored: HashSet::new(),
            parents,
        }
    }

    /// The cell the search started from.
    #[inline]
    pub fn root(&self) -> Cell {
        self.root
    }

    /// Mark `c` explored. Returns `false` if it already was.
    #[inline]
    pub fn explore(&mut self, c: Cell) -> bool {
        self.explored.insert(c)
    }

    #[inline]
    pub fn is_explored(&self, c: Cell) -> bool {
        self.explored.contains(&c)
    }

    /// Number of explored cells.
    #[inline]
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Iterate over explored cells in no particular order.
    pub fn explored(&self) -> impl Iterator<Item = Cell> + '_ {
        self.explored.iter().copied()
    }

    /// Record `parent` as the predecessor of `child` unless `child` already
    /// has one (first writer wins).
    #[inline]
    pub fn link(&mut self, child: Cell, parent: Cell) {
        self.parents.entry(child).or_insert(Some(parent));
    }

    /// Record `parent` as the predecessor of `child`, replacing any earlier
    /// one.
    #[inline]
    pub fn relink(&mut self, child: Cell, parent: Cell) {
        self.parents.insert(child, Some(parent));
    }

    /// Whether `c` has been discovered (the root counts).
    #[inline]
    pub fn is_linked(&self, c: Cell) -> bool {
        self.parents.contains_key(&c)
    }

    /// The predecessor of `c`, or `None` for the root and undiscovered cells.
    #[inline]
    pub fn parent(&self, c: Cell) -> Option<Cell> {
        self.parents.get(&c).copied().flatten()
    }

    /// Forget everything but the root.
    pub fn reset(&mut self) {
        self.explored.clear();
        self.parents.clear();
        self.parents.insert(self.root, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_keeps_first_parent() {
        let mut t = SearchTree::new(Cell::new(0, 0));
        t.link(Cell::new(1, 1), Cell::new(0, 0));
        t.link(Cell::new(1, 1), Cell::new(0, 1));
        assert_eq!(t.parent(Cell::new(1, 1)), Some(Cell::new(0, 0)));
    }

    #[test]
    fn relink_overwrites() {
        let mut t = SearchTree::new(Cell::new(0, 0));
        t.link(Cell::new(1, 1), Cell::new(0, 1));
        t.relink(Cell::new(1, 1), Cell::new(0, 0));
        assert_eq!(t.parent(Cell::new(1, 1)), Some(Cell::new(0, 0)));
    }

    #[test]
    fn root_never_gets_a_parent() {
        let mut t = SearchTree::new(Cell::new(0, 0));
        t.link(Cell::new(0, 0), Cell::new(0, 1));
        assert!(t.is_linked(Cell::new(0, 0)));
        assert_eq!(t.parent(Cell::new(0, 0)), None);
    }

    #[test]
    fn reset_keeps_only_root() {
        let mut t = SearchTree::new(Cell::new(2, 2));
        t.explore(Cell::new(2, 2));
        t.link(Cell::new(2, 3), Cell::new(2, 2));
        t.reset();
        assert_eq!(t.explored_len(), 0);
        assert!(!t.is_linked(Cell::new(2, 3)));
        assert!(t.is_linked(Cell::new(2, 2)));
    }

    #[test]
    fn explore_reports_first_visit() {
        let mut t = SearchTree::new(Cell::new(0, 0));
        assert!(t.explore(Cell::new(0, 0)));
        assert!(!t.explore(Cell::new(0, 0)));
    }
}
