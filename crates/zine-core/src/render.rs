//! View model handed to the renderer.

use crate::{
    content::{Leaf, LeafSequence},
    stacking::Direction,
};

/// Enabled state of the two navigation controls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Affordances {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl Affordances {
    pub const fn for_position(position: usize, leaf_count: usize) -> Self {
        Self {
            previous_disabled: position == 0,
            next_disabled: position == leaf_count,
        }
    }
}

/// Render state of one leaf.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LeafView<'a> {
    pub leaf: &'a Leaf,
    pub flipped: bool,
    pub draw_order: usize,
}

impl LeafView<'_> {
    pub fn ordinal(&self) -> usize {
        self.leaf.ordinal()
    }
}

/// Viewer-level view model consumed by the host renderer.
#[derive(Clone, Copy, Debug)]
pub struct ViewerView<'a> {
    pub(crate) leaves: &'a LeafSequence,
    pub(crate) draw_orders: &'a [usize],
    pub position: usize,
    pub direction: Direction,
    pub affordances: Affordances,
    /// Duration the renderer should give every flip transition.
    pub transition_ms: u32,
}

impl<'a> ViewerView<'a> {
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn leaves(self) -> impl Iterator<Item = LeafView<'a>> + 'a {
        let position = self.position;
        self.leaves
            .iter()
            .zip(self.draw_orders.iter().copied())
            .map(move |(leaf, draw_order)| LeafView {
                leaf,
                flipped: leaf.ordinal() < position,
                draw_order,
            })
    }
}
