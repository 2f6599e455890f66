//! Input abstraction layer.

pub mod queue;

/// Arrow keys the viewer reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value; other keys are not ours.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Logical actions consumed by the viewer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Pointer activation of the "next" control.
    NextPressed,
    /// Pointer activation of the "previous" control.
    PreviousPressed,
    Key {
        key: NavKey,
        /// Whether the viewer held input focus when the key arrived.
        viewer_focused: bool,
    },
    HoverEnter,
    HoverLeave,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
