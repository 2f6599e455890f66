//! Page-flip navigation core for the zine viewer.
//!
//! Everything here is host-agnostic: the web host feeds input events and a
//! millisecond clock into [`app::ZineViewer`] and renders the view model it
//! hands back.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod config;
pub mod content;
pub mod input;
pub mod render;
pub mod scale;
pub mod stacking;
