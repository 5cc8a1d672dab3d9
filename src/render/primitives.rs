use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// On/off dash pattern; `None` on a primitive means a solid stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineDash {
    pub phase: f64,
    pub on: f64,
    pub off: f64,
}

impl LineDash {
    #[must_use]
    pub const fn new(on: f64, off: f64) -> Self {
        Self {
            phase: 0.0,
            on,
            off,
        }
    }

    #[must_use]
    pub const fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.phase.is_finite()
            || !self.on.is_finite()
            || !self.off.is_finite()
            || self.on < 0.0
            || self.off < 0.0
            || self.on + self.off <= 0.0
        {
            return Err(ChartError::InvalidData(
                "dash lengths must be finite, >= 0 and not both zero".to_owned(),
            ));
        }
        Ok(())
    }
}

fn validate_clip(clip: Option<Rect>) -> ChartResult<()> {
    match clip {
        Some(rect) if !rect.is_finite() => Err(ChartError::InvalidData(
            "clip rect must be finite".to_owned(),
        )),
        _ => Ok(()),
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub dash: Option<LineDash>,
    pub clip: Option<Rect>,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            dash: None,
            clip: None,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: Option<LineDash>) -> Self {
        self.dash = dash;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(dash) = self.dash {
            dash.validate()?;
        }
        validate_clip(self.clip)?;
        self.color.validate()
    }
}

/// Filled (optionally bordered) rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
    pub clip: Option<Rect>,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
            corner_radius: 0.0,
            clip: None,
        }
    }

    #[must_use]
    pub const fn from_rect(rect: Rect, fill_color: Color) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, fill_color)
    }

    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    #[must_use]
    pub fn bounds(self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.bounds().is_finite() {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ChartError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_clip(self.clip)?;
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment of lines inside a label box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Fractional corner of a label box pinned to the anchor point.
///
/// `(0.5, 1.0)` pins the bottom-center of the box, so the text sits above
/// the point; `(0.5, 0.0)` pins the top-center so it sits below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextAnchor {
    pub x: f64,
    pub y: f64,
}

impl TextAnchor {
    pub const TOP_LEFT: Self = Self::new(0.0, 0.0);
    pub const TOP_CENTER: Self = Self::new(0.5, 0.0);
    pub const BOTTOM_CENTER: Self = Self::new(0.5, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub anchor: TextAnchor,
    pub angle_radians: f64,
    /// Wrap width; `None` lays the text out on one line per `\n`.
    pub max_width: Option<f64>,
    pub clip: Option<Rect>,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        let anchor = match h_align {
            TextHAlign::Left => TextAnchor::new(0.0, 0.0),
            TextHAlign::Center => TextAnchor::new(0.5, 0.0),
            TextHAlign::Right => TextAnchor::new(1.0, 0.0),
        };
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            anchor,
            angle_radians: 0.0,
            max_width: None,
            clip: None,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_angle_radians(mut self, angle_radians: f64) -> Self {
        self.angle_radians = angle_radians;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: Option<f64>) -> Self {
        self.max_width = max_width;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.angle_radians.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if let Some(max_width) = self.max_width {
            if !max_width.is_finite() || max_width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "text max width must be finite and > 0".to_owned(),
                ));
            }
        }
        validate_clip(self.clip)?;
        self.color.validate()
    }
}

/// Two-stop linear gradient painted over `clip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradientPrimitive {
    pub start: Point,
    pub end: Point,
    pub colors: [Color; 2],
    pub clip: Rect,
}

impl LinearGradientPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || !self.clip.is_finite() {
            return Err(ChartError::InvalidData(
                "linear gradient geometry must be finite".to_owned(),
            ));
        }
        self.colors[0].validate()?;
        self.colors[1].validate()
    }
}

/// Two-stop radial gradient between concentric circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientPrimitive {
    pub center: Point,
    pub start_radius: f64,
    pub end_radius: f64,
    pub colors: [Color; 2],
    pub clip: Option<Rect>,
}

impl RadialGradientPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.center.is_finite()
            || !self.start_radius.is_finite()
            || !self.end_radius.is_finite()
            || self.start_radius < 0.0
            || self.end_radius < 0.0
        {
            return Err(ChartError::InvalidData(
                "radial gradient geometry must be finite with radii >= 0".to_owned(),
            ));
        }
        validate_clip(self.clip)?;
        self.colors[0].validate()?;
        self.colors[1].validate()
    }
}

/// Host-owned image drawn into `rect`, looked up by `key` in the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePrimitive {
    pub key: String,
    pub rect: Rect,
    pub tint: Option<Color>,
    pub clip: Option<Rect>,
}

impl ImagePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.key.is_empty() {
            return Err(ChartError::InvalidData(
                "image key must not be empty".to_owned(),
            ));
        }
        if !self.rect.is_finite() || self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "image rect must be finite with non-negative size".to_owned(),
            ));
        }
        validate_clip(self.clip)?;
        if let Some(tint) = self.tint {
            tint.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LineDash, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn color_outside_unit_range_is_rejected() {
        assert!(Color::rgba(1.2, 0.0, 0.0, 1.0).validate().is_err());
        assert!(Color::rgb(0.1, 0.2, 0.3).validate().is_ok());
    }

    #[test]
    fn zero_dash_pattern_is_rejected() {
        let line = LinePrimitive::new(0.0, 0.0, 1.0, 1.0, 1.0, Color::BLACK)
            .with_dash(Some(LineDash::new(0.0, 0.0)));
        assert!(line.validate().is_err());
    }

    #[test]
    fn text_alignment_seeds_a_matching_anchor() {
        let text = TextPrimitive::new("x", 0.0, 0.0, 10.0, Color::BLACK, TextHAlign::Right);
        assert_eq!(text.anchor.x, 1.0);
        assert_eq!(text.anchor.y, 0.0);
    }
}
