//! Uniform scaling of the open spread to its container.

pub const DEFAULT_PAGE_WIDTH: f32 = 291.0;
pub const DEFAULT_PAGE_HEIGHT: f32 = 450.0;
pub const DEFAULT_CANVAS_PADDING: f32 = 25.0;

/// Unscaled page size and the padding kept around the spread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub padding: f32,
}

impl Default for SpreadGeometry {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            padding: DEFAULT_CANVAS_PADDING,
        }
    }
}

impl SpreadGeometry {
    /// Builds a geometry from CSS custom-property values, keeping the default
    /// for anything missing or unparsable.
    pub fn from_css(
        page_width: Option<&str>,
        page_height: Option<&str>,
        padding: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            page_width: page_width
                .and_then(parse_css_length)
                .filter(|width| *width > 0.0)
                .unwrap_or(defaults.page_width),
            page_height: page_height
                .and_then(parse_css_length)
                .filter(|height| *height > 0.0)
                .unwrap_or(defaults.page_height),
            padding: padding
                .and_then(parse_css_length)
                .map(|padding| padding.max(0.0))
                .unwrap_or(defaults.padding),
        }
    }

    pub fn spread_width(&self) -> f32 {
        self.page_width * 2.0
    }

    /// Largest uniform scale that fits the spread inside `wrapper`.
    pub fn fit(&self, wrapper: BoxSize) -> SpreadScale {
        let available_width = wrapper.width - self.padding * 2.0;
        let available_height = wrapper.height - self.padding * 2.0;

        let width_scale = available_width / self.spread_width();
        let height_scale = available_height / self.page_height;
        let factor = width_scale.min(height_scale).max(0.0);

        SpreadScale {
            factor,
            width: self.spread_width() * factor,
            height: self.page_height * factor,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Result of fitting the spread: the factor and the container size it implies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadScale {
    pub factor: f32,
    pub width: f32,
    pub height: f32,
}

/// Recomputes the spread scale when the observed box changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponsiveScaler {
    geometry: SpreadGeometry,
    last: Option<SpreadScale>,
}

impl ResponsiveScaler {
    pub const fn new(geometry: SpreadGeometry) -> Self {
        Self {
            geometry,
            last: None,
        }
    }

    pub fn geometry(&self) -> SpreadGeometry {
        self.geometry
    }

    pub fn current(&self) -> Option<SpreadScale> {
        self.last
    }

    /// Feeds a new wrapper size; returns the scale only when it changed.
    pub fn observe(&mut self, wrapper: BoxSize) -> Option<SpreadScale> {
        let scale = self.geometry.fit(wrapper);
        if self.last == Some(scale) {
            return None;
        }
        self.last = Some(scale);
        Some(scale)
    }

    /// Observes `wrapper` against freshly read `geometry`. A geometry change
    /// always reports, even when the wrapper kept its size.
    pub fn refit(&mut self, geometry: SpreadGeometry, wrapper: BoxSize) -> Option<SpreadScale> {
        if geometry != self.geometry {
            self.set_geometry(geometry);
        }
        self.observe(wrapper)
    }

    /// Swaps the geometry and forgets the last result so the next
    /// observation always reports.
    pub fn set_geometry(&mut self, geometry: SpreadGeometry) {
        self.geometry = geometry;
        self.last = None;
    }
}

/// Leading integer of a CSS length (`"25px"` -> 25), `parseInt` style.
pub fn parse_css_length(value: &str) -> Option<f32> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: u32 = digits[..end].parse().ok()?;
    let magnitude = magnitude as f32;
    Some(if negative { -magnitude } else { magnitude })
}
