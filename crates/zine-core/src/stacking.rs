//! Draw-order rules for the leaf stack.
//!
//! Every transition recomputes the whole stack from the leaf count, the
//! position and the direction of the last move. The two directions use
//! different rules on purpose: the leaf nearest the direction of travel wins
//! ties, and the extreme leaf is pinned on top around the first (forward) or
//! last (backward) flip so no seam shows.

use alloc::vec::Vec;

/// Direction of the most recent committed move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Draw order of one leaf; higher values are drawn in front.
pub fn draw_order(
    ordinal: usize,
    leaf_count: usize,
    position: usize,
    direction: Direction,
) -> usize {
    match direction {
        Direction::Forward => {
            if ordinal == 0 && position <= 1 {
                leaf_count + 1
            } else if ordinal < position {
                leaf_count - (position - ordinal)
            } else {
                leaf_count - ordinal
            }
        }
        Direction::Backward => {
            if ordinal + 1 == leaf_count && position + 1 >= leaf_count {
                leaf_count + 1
            } else if ordinal == position {
                leaf_count
            } else if ordinal < position {
                ordinal
            } else {
                leaf_count - ordinal
            }
        }
    }
}

/// Rebuilds `orders` for every leaf; leaves it empty when there are none.
pub fn restack(leaf_count: usize, position: usize, direction: Direction, orders: &mut Vec<usize>) {
    orders.clear();
    orders.extend(
        (0..leaf_count).map(|ordinal| draw_order(ordinal, leaf_count, position, direction)),
    );
}
