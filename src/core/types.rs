use serde::{Deserialize, Serialize};

use crate::core::geometry::Rect;
use crate::error::{ChartError, ChartResult};

/// Chart surface size plus the offsets that carve out the content rectangle.
///
/// The host mutates this between frames on resize and zoom; axis passes only
/// read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub chart_width: f64,
    pub chart_height: f64,
    pub offset_left: f64,
    pub offset_top: f64,
    pub offset_right: f64,
    pub offset_bottom: f64,
    /// Current horizontal zoom factor (1.0 = fully zoomed out).
    pub scale_x: f64,
    pub min_scale_x: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    #[must_use]
    pub fn new(chart_width: f64, chart_height: f64) -> Self {
        Self {
            chart_width,
            chart_height,
            offset_left: 0.0,
            offset_top: 0.0,
            offset_right: 0.0,
            offset_bottom: 0.0,
            scale_x: 1.0,
            min_scale_x: 1.0,
        }
    }

    #[must_use]
    pub fn with_offsets(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self.offset_right = right;
        self.offset_bottom = bottom;
        self
    }

    #[must_use]
    pub fn with_scale_x(mut self, scale_x: f64) -> Self {
        self.scale_x = scale_x;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.chart_width.is_finite()
            && self.chart_height.is_finite()
            && self.chart_width > 0.0
            && self.chart_height > 0.0
            && self.content_width() >= 0.0
            && self.content_height() >= 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.chart_width,
                height: self.chart_height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn content_left(self) -> f64 {
        self.offset_left
    }

    #[must_use]
    pub fn content_right(self) -> f64 {
        self.chart_width - self.offset_right
    }

    #[must_use]
    pub fn content_top(self) -> f64 {
        self.offset_top
    }

    #[must_use]
    pub fn content_bottom(self) -> f64 {
        self.chart_height - self.offset_bottom
    }

    #[must_use]
    pub fn content_width(self) -> f64 {
        self.content_right() - self.content_left()
    }

    #[must_use]
    pub fn content_height(self) -> f64 {
        self.content_bottom() - self.content_top()
    }

    #[must_use]
    pub fn content_rect(self) -> Rect {
        Rect::new(
            self.content_left(),
            self.content_top(),
            self.content_width(),
            self.content_height(),
        )
    }

    /// Left bound test with one pixel of slack for anti-aliased edges.
    #[must_use]
    pub fn is_in_bounds_left(self, x: f64) -> bool {
        self.content_left() <= x + 1.0
    }

    /// Right bound test; `x` is floored to 1/100px before the one pixel slack.
    #[must_use]
    pub fn is_in_bounds_right(self, x: f64) -> bool {
        let x = (x * 100.0).floor() / 100.0;
        self.content_right() >= x - 1.0
    }

    #[must_use]
    pub fn is_in_bounds_x(self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    #[must_use]
    pub fn is_fully_zoomed_out_x(self) -> bool {
        self.scale_x <= self.min_scale_x && self.scale_x <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use crate::core::Rect;

    #[test]
    fn content_rect_is_chart_minus_offsets() {
        let viewport = Viewport::new(400.0, 300.0).with_offsets(10.0, 20.0, 30.0, 40.0);
        assert_eq!(viewport.content_rect(), Rect::new(10.0, 20.0, 360.0, 240.0));
        assert_eq!(viewport.content_right(), 370.0);
        assert_eq!(viewport.content_bottom(), 260.0);
    }

    #[test]
    fn horizontal_bounds_allow_one_pixel_slack() {
        let viewport = Viewport::new(200.0, 100.0).with_offsets(10.0, 0.0, 10.0, 0.0);
        assert!(viewport.is_in_bounds_x(10.0));
        assert!(viewport.is_in_bounds_x(9.5));
        assert!(viewport.is_in_bounds_x(191.0));
        assert!(!viewport.is_in_bounds_x(8.5));
        assert!(!viewport.is_in_bounds_x(191.5));
    }

    #[test]
    fn offsets_larger_than_chart_are_invalid() {
        let viewport = Viewport::new(100.0, 100.0).with_offsets(80.0, 0.0, 80.0, 0.0);
        assert!(!viewport.is_valid());
        assert!(viewport.validate().is_err());
    }

    #[test]
    fn zoom_state_tracks_scale() {
        assert!(Viewport::new(100.0, 100.0).is_fully_zoomed_out_x());
        assert!(!Viewport::new(100.0, 100.0).with_scale_x(2.5).is_fully_zoomed_out_x());
    }
}
