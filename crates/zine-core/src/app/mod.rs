//! Page-flip state machine: position, stacking, autoplay and input routing.

use alloc::vec::Vec;

use log::{debug, info, warn};

use crate::{
    config::ViewerConfig,
    content::LeafSequence,
    input::{InputEvent, InputProvider, NavKey},
    render::{Affordances, ViewerView},
    stacking::{self, Direction},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Whether the router acted on an event. Hosts only suppress the platform's
/// default handling for `Handled` events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventDisposition {
    Handled,
    Ignored,
}

/// Who asked for a move. Only manual moves reset the autoplay interval.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum MoveOrigin {
    Manual,
    Autoplay,
}

pub struct ZineViewer<IN>
where
    IN: InputProvider,
{
    leaves: LeafSequence,
    input: IN,
    config: ViewerConfig,
    position: usize,
    direction: Direction,
    draw_orders: Vec<usize>,
    affordances: Affordances,
    autoplay: AutoplayScheduler,
    pending_redraw: bool,
    torn_down: bool,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
include!("navigation.rs");
include!("autoplay.rs");

#[cfg(test)]
mod tests;
