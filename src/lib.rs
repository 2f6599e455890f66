//! Browser host for the zine viewer.
//!
//! [`ZineViewerElement`] mounts a [`zine_core`] viewer on a DOM element,
//! rendering it into a shadow root and feeding it clicks, arrow keys, hover
//! and a single autoplay timeout.

mod console;
mod dom;
mod element;
mod listeners;
mod resize;
mod timer;

pub use element::ZineViewerElement;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;
}

#[wasm_bindgen(start)]
pub fn start() {
    console::init(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
}
