use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineDash};

use super::LimitLine;

/// Where tick labels sit relative to the content rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum XAxisLabelPosition {
    /// Above the content top edge.
    #[default]
    Top,
    /// Just below the content top edge, inside the plot.
    TopInside,
    /// Below the content bottom edge.
    Bottom,
    /// Just above the content bottom edge, inside the plot.
    BottomInside,
    /// Above the top edge and below the bottom edge.
    BothSided,
}

impl XAxisLabelPosition {
    #[must_use]
    pub fn draws_top_line(self) -> bool {
        matches!(self, Self::Top | Self::TopInside | Self::BothSided)
    }

    #[must_use]
    pub fn draws_bottom_line(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomInside | Self::BothSided)
    }
}

/// Data-space interval `[start, start + length)` highlighted behind the plot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisBlock {
    pub start: f64,
    pub length: f64,
}

impl AxisBlock {
    #[must_use]
    pub const fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.length
    }
}

/// Styling shared by every block on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    /// Hatch stroke width; the hatch step is this plus the fixed gap.
    pub stroke_width: f64,
    /// Top and bottom stops of the vertical block gradient.
    pub gradient_colors: Option<[Color; 2]>,
    /// Distance from the content top at which the gradient reaches its end stop.
    pub gradient_height: f64,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgba(0.93, 0.93, 0.93, 0.6),
            stroke_color: Color::rgba(0.75, 0.75, 0.75, 0.8),
            stroke_width: 1.0,
            gradient_colors: None,
            gradient_height: 100.0,
        }
    }
}

/// Label extents cached by the last size computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabelMetrics {
    pub label_width: f64,
    pub label_height: f64,
    pub label_rotated_width: f64,
    pub label_rotated_height: f64,
}

/// Horizontal axis model: configuration plus the tick state computed for
/// the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxis {
    pub enabled: bool,
    pub draw_labels_enabled: bool,
    pub draw_axis_line_enabled: bool,
    pub draw_grid_lines_enabled: bool,

    pub label_position: XAxisLabelPosition,
    /// Label rotation in degrees.
    pub label_rotation_angle: f64,
    /// Gap between the content edge and the labels.
    pub y_offset: f64,
    pub label_font_size_px: f64,
    pub label_text_color: Color,
    pub avoid_first_last_clipping: bool,
    pub center_axis_labels: bool,
    pub word_wrap_enabled: bool,
    /// Wrap width as a fraction of one data unit in pixels.
    pub word_wrap_width_percent: f64,

    pub label_count: usize,
    pub force_label_count: bool,
    pub granularity: f64,
    pub granularity_enabled: bool,

    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub axis_line_dash: Option<LineDash>,
    pub grid_color: Color,
    pub grid_line_width: f64,
    pub grid_line_dash: Option<LineDash>,

    pub limit_lines: Vec<LimitLine>,
    pub blocks: Vec<AxisBlock>,
    pub block_style: BlockStyle,

    pub entries: Vec<f64>,
    pub centered_entries: Vec<f64>,
    pub decimals: usize,
    pub label_metrics: AxisLabelMetrics,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            enabled: true,
            draw_labels_enabled: true,
            draw_axis_line_enabled: true,
            draw_grid_lines_enabled: true,
            label_position: XAxisLabelPosition::Top,
            label_rotation_angle: 0.0,
            y_offset: 5.0,
            label_font_size_px: 10.0,
            label_text_color: Color::BLACK,
            avoid_first_last_clipping: false,
            center_axis_labels: false,
            word_wrap_enabled: false,
            word_wrap_width_percent: 1.0,
            label_count: 6,
            force_label_count: false,
            granularity: 1.0,
            granularity_enabled: false,
            axis_line_color: Color::rgb(0.5, 0.5, 0.5),
            axis_line_width: 0.5,
            axis_line_dash: None,
            grid_color: Color::rgba(0.5, 0.5, 0.5, 0.35),
            grid_line_width: 0.5,
            grid_line_dash: None,
            limit_lines: Vec::new(),
            blocks: Vec::new(),
            block_style: BlockStyle::default(),
            entries: Vec::new(),
            centered_entries: Vec::new(),
            decimals: 0,
            label_metrics: AxisLabelMetrics::default(),
        }
    }
}

impl XAxis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<f64>) -> Self {
        self.entries = entries;
        self
    }

    #[must_use]
    pub fn with_label_position(mut self, position: XAxisLabelPosition) -> Self {
        self.label_position = position;
        self
    }

    #[must_use]
    pub fn with_limit_line(mut self, limit_line: LimitLine) -> Self {
        self.limit_lines.push(limit_line);
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: AxisBlock) -> Self {
        self.blocks.push(block);
        self
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Position used to place entry `index`: the centered entry when label
    /// centering is on and one exists, the raw entry otherwise.
    #[must_use]
    pub fn placement_value(&self, index: usize) -> Option<f64> {
        if self.center_axis_labels {
            if let Some(centered) = self.centered_entries.get(index) {
                return Some(*centered);
            }
        }
        self.entries.get(index).copied()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (value, name) in [
            (self.y_offset, "y_offset"),
            (self.label_rotation_angle, "label_rotation_angle"),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "x axis `{name}` must be finite"
                )));
            }
        }
        for (value, name) in [
            (self.label_font_size_px, "label_font_size_px"),
            (self.axis_line_width, "axis_line_width"),
            (self.grid_line_width, "grid_line_width"),
            (self.block_style.stroke_width, "block_style.stroke_width"),
            (self.word_wrap_width_percent, "word_wrap_width_percent"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "x axis `{name}` must be finite and > 0"
                )));
            }
        }
        if self.granularity_enabled && (!self.granularity.is_finite() || self.granularity <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "x axis granularity must be finite and > 0 when enabled".to_owned(),
            ));
        }
        if self.force_label_count && self.label_count < 2 {
            return Err(ChartError::InvalidData(
                "forced label count needs at least two labels".to_owned(),
            ));
        }
        for color in [
            self.label_text_color,
            self.axis_line_color,
            self.grid_color,
            self.block_style.fill_color,
            self.block_style.stroke_color,
        ] {
            color.validate()?;
        }
        for dash in [self.axis_line_dash, self.grid_line_dash].into_iter().flatten() {
            dash.validate()?;
        }
        if let Some(colors) = self.block_style.gradient_colors {
            colors[0].validate()?;
            colors[1].validate()?;
        }
        for limit_line in &self.limit_lines {
            limit_line.validate()?;
        }
        for block in &self.blocks {
            if !block.start.is_finite() || !block.length.is_finite() {
                return Err(ChartError::InvalidData(
                    "block start and length must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Replaces the configuration when `next` validates, keeping the current
    /// one otherwise.
    pub fn apply(&mut self, next: Self) -> ChartResult<()> {
        if let Err(err) = next.validate() {
            warn!(error = %err, "rejecting invalid x axis configuration");
            return Err(err);
        }
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisBlock, XAxis, XAxisLabelPosition};

    #[test]
    fn default_axis_validates() {
        XAxis::default().validate().expect("default axis is valid");
    }

    #[test]
    fn both_sided_draws_top_and_bottom_axis_lines() {
        assert!(XAxisLabelPosition::BothSided.draws_top_line());
        assert!(XAxisLabelPosition::BothSided.draws_bottom_line());
        assert!(!XAxisLabelPosition::TopInside.draws_bottom_line());
        assert!(!XAxisLabelPosition::BottomInside.draws_top_line());
    }

    #[test]
    fn placement_value_prefers_centered_entries() {
        let mut axis = XAxis::new().with_entries(vec![0.0, 10.0]);
        axis.centered_entries = vec![5.0, 15.0];
        assert_eq!(axis.placement_value(1), Some(10.0));
        axis.center_axis_labels = true;
        assert_eq!(axis.placement_value(1), Some(15.0));
        assert_eq!(axis.placement_value(2), None);
    }

    #[test]
    fn apply_keeps_previous_config_on_invalid_input() {
        let mut axis = XAxis::new().with_block(AxisBlock::new(1.0, 2.0));
        let mut invalid = XAxis::new();
        invalid.grid_line_width = 0.0;
        assert!(axis.apply(invalid).is_err());
        assert_eq!(axis.blocks.len(), 1);
    }
}
