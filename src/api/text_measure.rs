use crate::core::Size;

/// Measures label text for placement decisions.
///
/// `max_width` constrains the layout width; wrapped text grows in height.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, max_width: Option<f64>) -> Size;

    /// Height of one line of text at `font_size_px`.
    fn line_height(&self, font_size_px: f64) -> f64 {
        self.measure("0", font_size_px, None).height
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64, Option<f64>) -> Size,
{
    fn measure(&self, text: &str, font_size_px: f64, max_width: Option<f64>) -> Size {
        self(text, font_size_px, max_width)
    }
}

/// Deterministic, backend-independent measurer based on per-glyph widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub line_height_factor: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            line_height_factor: 1.2,
        }
    }
}

impl HeuristicTextMeasurer {
    fn line_width_px(line: &str, font_size_px: f64) -> f64 {
        let units = line.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' | '/' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        units * font_size_px
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64, max_width: Option<f64>) -> Size {
        let line_height = font_size_px * self.line_height_factor;
        let wrap_width = max_width.filter(|width| width.is_finite() && *width > 0.0);

        let mut width: f64 = 0.0;
        let mut line_count = 0usize;
        for line in text.split('\n') {
            let line_width = Self::line_width_px(line, font_size_px);
            match wrap_width {
                Some(wrap) if line_width > wrap => {
                    width = width.max(wrap);
                    line_count += (line_width / wrap).ceil() as usize;
                }
                _ => {
                    width = width.max(line_width);
                    line_count += 1;
                }
            }
        }
        Size::new(width, line_height * line_count as f64)
    }
}
