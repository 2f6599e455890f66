//! Viewer options.
//!
//! Options reach the viewer either as element attributes or as a JSON object
//! handed over by the embedding page. Both paths are lenient: a value of the
//! wrong type is logged and replaced by its default, never rejected.

use alloc::string::String;

use log::warn;
use serde_json::{Map, Value};

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u32 = 2_000;
pub const DEFAULT_TRANSITION_MS: u32 = 1_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ViewerConfig {
    /// Honour arrow keys at all.
    pub keyboard_navigation: bool,
    /// Only honour arrow keys while the viewer holds focus.
    pub keyboard_navigation_focus_only: bool,
    pub autoplay: bool,
    pub autoplay_interval_ms: u32,
    /// Duration of one flip, handed to the renderer.
    pub transition_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            keyboard_navigation: true,
            keyboard_navigation_focus_only: false,
            autoplay: false,
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

impl ViewerConfig {
    /// Replaces out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.autoplay_interval_ms == 0 {
            warn!(
                "zine-config: autoplay interval must be positive, using {}ms",
                DEFAULT_AUTOPLAY_INTERVAL_MS
            );
            self.autoplay_interval_ms = DEFAULT_AUTOPLAY_INTERVAL_MS;
        }
        self
    }
}

/// Option keys as they appear in a JSON options object.
mod keys {
    pub const PAGES: &str = "pages";
    pub const KEYBOARD_NAVIGATION: &str = "keyboardNavigation";
    pub const KEYBOARD_FOCUS_ONLY: &str = "keyboardNavigationFocusOnly";
    pub const AUTOPLAY: &str = "autoplay";
    pub const AUTOPLAY_INTERVAL: &str = "autoplayInterval";
    pub const TRANSITION_DURATION: &str = "transitionDuration";
}

/// Option names as element attributes.
mod attributes {
    pub const PAGES: &str = "pages";
    pub const KEYBOARD_NAVIGATION: &str = "keyboard-navigation";
    pub const KEYBOARD_FOCUS_ONLY: &str = "keyboard-navigation-focus-only";
    pub const AUTOPLAY: &str = "autoplay";
    pub const AUTOPLAY_INTERVAL: &str = "autoplay-interval";
    pub const TRANSITION_DURATION: &str = "transition-duration";
}

/// Everything a host can configure: behaviour plus optional structured pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerOptions {
    pub config: ViewerConfig,
    /// Raw structured page data; resolved by [`crate::content::source`].
    pub pages: Option<Value>,
}

impl ViewerOptions {
    /// Reads options from element attributes through `attribute`.
    pub fn from_attributes<F>(mut attribute: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut options = Self::default();
        let config = &mut options.config;

        if let Some(value) = attribute(attributes::KEYBOARD_NAVIGATION) {
            apply_bool(
                &mut config.keyboard_navigation,
                attribute_bool(&value),
                attributes::KEYBOARD_NAVIGATION,
            );
        }
        if let Some(value) = attribute(attributes::KEYBOARD_FOCUS_ONLY) {
            apply_bool(
                &mut config.keyboard_navigation_focus_only,
                attribute_bool(&value),
                attributes::KEYBOARD_FOCUS_ONLY,
            );
        }
        if let Some(value) = attribute(attributes::AUTOPLAY) {
            apply_bool(&mut config.autoplay, attribute_bool(&value), attributes::AUTOPLAY);
        }
        if let Some(value) = attribute(attributes::AUTOPLAY_INTERVAL) {
            apply_millis(
                &mut config.autoplay_interval_ms,
                value.trim().parse().ok(),
                attributes::AUTOPLAY_INTERVAL,
            );
        }
        if let Some(value) = attribute(attributes::TRANSITION_DURATION) {
            apply_millis(
                &mut config.transition_ms,
                value.trim().parse().ok(),
                attributes::TRANSITION_DURATION,
            );
        }
        if let Some(value) = attribute(attributes::PAGES) {
            options.pages = Some(Value::String(value));
        }

        options.config = options.config.normalized();
        options
    }

    /// Options for a mounted element: its attributes first, then the
    /// script-supplied options object (as JSON text) on top.
    pub fn from_host<F>(attribute: F, options_json: Option<&str>) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut options = Self::from_attributes(attribute);
        if let Some(text) = options_json {
            options.merge_json(text);
        }
        options
    }

    /// Parses a JSON options object.
    pub fn from_json(text: &str) -> Self {
        let mut options = Self::default();
        options.merge_json(text);
        options
    }

    /// Overrides the options present in a JSON object; absent keys keep
    /// their current value.
    pub fn merge_json(&mut self, text: &str) {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => self.merge_map(&map),
            Ok(Value::Null) => {}
            Ok(_) => warn!("zine-config: options are not an object, ignoring"),
            Err(err) => warn!("zine-config: options are not valid JSON ({err}), ignoring"),
        }
    }

    pub fn merge_map(&mut self, map: &Map<String, Value>) {
        let config = &mut self.config;

        if let Some(value) = map.get(keys::KEYBOARD_NAVIGATION) {
            apply_bool(
                &mut config.keyboard_navigation,
                value.as_bool(),
                keys::KEYBOARD_NAVIGATION,
            );
        }
        if let Some(value) = map.get(keys::KEYBOARD_FOCUS_ONLY) {
            apply_bool(
                &mut config.keyboard_navigation_focus_only,
                value.as_bool(),
                keys::KEYBOARD_FOCUS_ONLY,
            );
        }
        if let Some(value) = map.get(keys::AUTOPLAY) {
            apply_bool(&mut config.autoplay, value.as_bool(), keys::AUTOPLAY);
        }
        if let Some(value) = map.get(keys::AUTOPLAY_INTERVAL) {
            apply_millis(
                &mut config.autoplay_interval_ms,
                json_millis(value),
                keys::AUTOPLAY_INTERVAL,
            );
        }
        if let Some(value) = map.get(keys::TRANSITION_DURATION) {
            apply_millis(
                &mut config.transition_ms,
                json_millis(value),
                keys::TRANSITION_DURATION,
            );
        }
        if let Some(value) = map.get(keys::PAGES) {
            self.pages = Some(value.clone());
        }

        self.config = self.config.normalized();
    }
}

fn apply_bool(slot: &mut bool, value: Option<bool>, name: &str) {
    match value {
        Some(value) => *slot = value,
        None => warn!("zine-config: `{name}` is not a boolean, keeping {slot}"),
    }
}

fn apply_millis(slot: &mut u32, value: Option<u32>, name: &str) {
    match value {
        Some(value) if value > 0 => *slot = value,
        _ => warn!(
            "zine-config: `{name}` must be a positive number of milliseconds, keeping {slot}"
        ),
    }
}

/// Boolean attribute semantics: presence means `true` unless spelled false.
fn attribute_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn json_millis(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|ms| u32::try_from(ms).ok())
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|ms| ms.is_finite() && *ms >= 1.0 && *ms <= u32::MAX as f64)
                    .map(|ms| ms as u32)
            }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
