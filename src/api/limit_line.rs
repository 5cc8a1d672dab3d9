use serde::{Deserialize, Serialize};

use crate::core::{EdgeInsets, Size};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineDash};

/// Corner of the limit line the label is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LimitLabelPosition {
    #[default]
    RightTop,
    RightBottom,
    LeftTop,
    LeftBottom,
}

impl LimitLabelPosition {
    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, Self::RightTop | Self::RightBottom)
    }

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::RightTop | Self::LeftTop)
    }
}

/// Marker image pinned near the bottom of a limit line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitLineImage {
    /// Host lookup key for the image resource.
    pub key: String,
    pub size: Size,
    pub inset: EdgeInsets,
    /// Furthest the image may drift right of the line, in data units.
    pub sticky_length: f64,
    #[serde(default)]
    pub tint: Option<Color>,
    /// Glow stops drawn behind the image, outer to inner.
    #[serde(default)]
    pub radial_gradient_colors: Option<[Color; 2]>,
}

impl LimitLineImage {
    #[must_use]
    pub fn new(key: impl Into<String>, size: Size, sticky_length: f64) -> Self {
        Self {
            key: key.into(),
            size,
            inset: EdgeInsets::default(),
            sticky_length,
            tint: None,
            radial_gradient_colors: None,
        }
    }

    #[must_use]
    pub fn with_inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }
}

/// Fixed reference line at a data value with an optional label and image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitLine {
    pub limit: f64,
    pub enabled: bool,
    pub line_width: f64,
    pub line_color: Color,
    pub line_dash: Option<LineDash>,
    pub label: String,
    pub label_position: LimitLabelPosition,
    pub draw_label_enabled: bool,
    pub x_offset: f64,
    pub y_offset: f64,
    pub value_font_size_px: f64,
    pub value_text_color: Color,
    /// Draws the block gradient behind the line.
    pub render_block_gradient: bool,
    pub image: Option<LimitLineImage>,
}

impl Default for LimitLine {
    fn default() -> Self {
        Self {
            limit: 0.0,
            enabled: true,
            line_width: 2.0,
            line_color: Color::rgb(0.93, 0.36, 0.36),
            line_dash: None,
            label: String::new(),
            label_position: LimitLabelPosition::RightTop,
            draw_label_enabled: true,
            x_offset: 0.0,
            y_offset: 0.0,
            value_font_size_px: 13.0,
            value_text_color: Color::BLACK,
            render_block_gradient: false,
            image: None,
        }
    }
}

impl LimitLine {
    pub const MIN_LINE_WIDTH: f64 = 0.2;
    pub const MAX_LINE_WIDTH: f64 = 12.0;

    #[must_use]
    pub fn new(limit: f64, label: impl Into<String>) -> Self {
        Self {
            limit,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the stroke width clamped to `0.2..=12.0`.
    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width.clamp(Self::MIN_LINE_WIDTH, Self::MAX_LINE_WIDTH);
        self
    }

    #[must_use]
    pub fn with_label_position(mut self, position: LimitLabelPosition) -> Self {
        self.label_position = position;
        self
    }

    #[must_use]
    pub fn with_offsets(mut self, x_offset: f64, y_offset: f64) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: LimitLineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.limit.is_finite() {
            return Err(ChartError::InvalidData(
                "limit line value must be finite".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "limit line width must be finite and > 0".to_owned(),
            ));
        }
        if !self.x_offset.is_finite() || !self.y_offset.is_finite() {
            return Err(ChartError::InvalidData(
                "limit line label offsets must be finite".to_owned(),
            ));
        }
        if !self.value_font_size_px.is_finite() || self.value_font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "limit line font size must be finite and > 0".to_owned(),
            ));
        }
        self.line_color.validate()?;
        self.value_text_color.validate()?;
        if let Some(dash) = self.line_dash {
            dash.validate()?;
        }
        if let Some(image) = &self.image {
            if image.key.is_empty() {
                return Err(ChartError::InvalidData(
                    "limit line image key must not be empty".to_owned(),
                ));
            }
            if !image.size.width.is_finite()
                || !image.size.height.is_finite()
                || image.size.width < 0.0
                || image.size.height < 0.0
                || !image.sticky_length.is_finite()
            {
                return Err(ChartError::InvalidData(
                    "limit line image size and sticky length must be finite".to_owned(),
                ));
            }
            if let Some(tint) = image.tint {
                tint.validate()?;
            }
            for color in image.radial_gradient_colors.into_iter().flatten() {
                color.validate()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LimitLabelPosition, LimitLine, LimitLineImage};
    use crate::core::Size;

    #[test]
    fn line_width_is_clamped() {
        assert_eq!(LimitLine::new(1.0, "a").with_line_width(40.0).line_width, 12.0);
        assert_eq!(LimitLine::new(1.0, "a").with_line_width(0.0).line_width, 0.2);
    }

    #[test]
    fn label_corner_predicates() {
        assert!(LimitLabelPosition::RightBottom.is_right());
        assert!(!LimitLabelPosition::RightBottom.is_top());
        assert!(LimitLabelPosition::LeftTop.is_top());
    }

    #[test]
    fn image_with_empty_key_is_rejected() {
        let line = LimitLine::new(3.0, "x").with_image(LimitLineImage::new(
            "",
            Size::new(10.0, 10.0),
            1.0,
        ));
        assert!(line.validate().is_err());
    }
}
