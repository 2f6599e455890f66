//! Single-shot `setTimeout` wrapper.
//!
//! [`Timeout`] owns one JS closure and at most one pending browser timeout.
//! Arming always clears the previous handle first, so the host can re-arm it
//! to the viewer's next wakeup after every tick without stacking callbacks.

use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

pub struct Timeout {
    window: Window,
    callback: Closure<dyn FnMut()>,
    handle: Cell<Option<i32>>,
}

impl Timeout {
    /// Creates a timeout that is **not yet armed**.
    pub fn new(window: Window, callback: impl FnMut() + 'static) -> Self {
        Self {
            window,
            callback: Closure::wrap(Box::new(callback) as Box<dyn FnMut()>),
            handle: Cell::new(None),
        }
    }

    pub fn arm(&self, delay_ms: u64) -> Result<(), JsValue> {
        self.cancel();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                delay,
            )?;
        self.handle.set(Some(handle));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    /// Forgets the handle of a timeout that has just fired.
    pub fn mark_fired(&self) {
        self.handle.set(None);
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("armed", &self.is_armed())
            .finish()
    }
}
