use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{
    ImagePrimitive, LinePrimitive, LinearGradientPrimitive, RadialGradientPrimitive,
    RectPrimitive, TextPrimitive,
};

/// Backend-agnostic scene for one axis draw pass.
///
/// Backends paint the groups in field order: linear gradients, rects,
/// lines, radial gradients, images, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub linear_gradients: Vec<LinearGradientPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub radial_gradients: Vec<RadialGradientPrimitive>,
    pub images: Vec<ImagePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            linear_gradients: Vec::new(),
            rects: Vec::new(),
            lines: Vec::new(),
            radial_gradients: Vec::new(),
            images: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;

        for gradient in &self.linear_gradients {
            gradient.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for gradient in &self.radial_gradients {
            gradient.validate()?;
        }
        for image in &self.images {
            image.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linear_gradients.is_empty()
            && self.rects.is_empty()
            && self.lines.is_empty()
            && self.radial_gradients.is_empty()
            && self.images.is_empty()
            && self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{Color, LinePrimitive};

    #[test]
    fn frame_with_invalid_viewport_fails_validation() {
        let frame = RenderFrame::new(Viewport::new(0.0, 100.0));
        assert!(frame.validate().is_err());
    }

    #[test]
    fn frame_rejects_non_finite_line() {
        let frame = RenderFrame::new(Viewport::new(100.0, 100.0)).with_line(LinePrimitive::new(
            f64::NAN,
            0.0,
            1.0,
            1.0,
            1.0,
            Color::BLACK,
        ));
        assert!(!frame.is_empty());
        assert!(frame.validate().is_err());
    }
}
