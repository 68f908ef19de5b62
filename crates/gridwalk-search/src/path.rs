//! Path reconstruction from back-pointer chains.

use gridwalk_core::Cell;

use crate::tree::SearchTree;

/// Walk back-pointers from `goal` to the root of `tree` and return the cells
/// in root → goal order, both ends included.
pub fn reconstruct(tree: &SearchTree, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = tree.parent(current) {
        path.push(prev);
        current = prev;
    }
    if current != tree.root() {
        path.push(tree.root());
    }
    path.reverse();
    path
}

/// Join a forward and a backward tree at `meeting`.
///
/// The forward half runs from the forward root to `meeting`; the backward
/// half continues from the meeting cell's backward predecessor to the
/// backward root. When `meeting` is the backward root the second half is
/// empty.
pub fn join(forward: &SearchTree, backward: &SearchTree, meeting: Cell) -> Vec<Cell> {
    let mut path = reconstruct(forward, meeting);
    let mut next = backward.parent(meeting);
    while let Some(c) = next {
        path.push(c);
        next = backward.parent(c);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(cells: &[(i32, i32)]) -> SearchTree {
        let root = Cell::from(cells[0]);
        let mut t = SearchTree::new(root);
        for pair in cells.windows(2) {
            t.link(Cell::from(pair[1]), Cell::from(pair[0]));
        }
        t
    }

    #[test]
    fn reconstruct_orders_root_first() {
        let t = chain(&[(0, 0), (0, 1), (1, 2)]);
        assert_eq!(
            reconstruct(&t, Cell::new(1, 2)),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 2)]
        );
    }

    #[test]
    fn reconstruct_root_only() {
        let t = SearchTree::new(Cell::new(3, 3));
        assert_eq!(reconstruct(&t, Cell::new(3, 3)), vec![Cell::new(3, 3)]);
    }

    #[test]
    fn join_concatenates_without_repeating_meeting() {
        let fwd = chain(&[(0, 0), (0, 1), (0, 2)]);
        let bwd = chain(&[(0, 4), (0, 3), (0, 2)]);
        assert_eq!(
            join(&fwd, &bwd, Cell::new(0, 2)),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(0, 3),
                Cell::new(0, 4),
            ]
        );
    }

    #[test]
    fn join_at_backward_root() {
        let fwd = chain(&[(0, 0), (0, 1)]);
        let bwd = SearchTree::new(Cell::new(0, 1));
        assert_eq!(
            join(&fwd, &bwd, Cell::new(0, 1)),
            vec![Cell::new(0, 0), Cell::new(0, 1)]
        );
    }
}
