use smallvec::{SmallVec, smallvec};

use crate::core::{Distance, Point, Transformer, Viewport};
use crate::render::TextAnchor;

use super::{AxisValueFormatter, TextMeasurer, XAxis, XAxisLabelPosition};

/// One row of labels: its baseline Y and the box corner pinned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPass {
    pub y: f64,
    pub anchor: TextAnchor,
}

/// Where a single tick label is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelPlacement {
    pub entry_index: usize,
    pub value: f64,
    pub point: Point,
    pub anchor: TextAnchor,
    pub text: String,
    pub max_width: Option<f64>,
    pub angle_radians: f64,
}

/// Label rows for the configured position; `BothSided` yields the top row
/// followed by the bottom row.
#[must_use]
pub fn label_passes(axis: &XAxis, viewport: Viewport) -> SmallVec<[LabelPass; 2]> {
    let y_offset = axis.y_offset;
    let rotated_height = axis.label_metrics.label_rotated_height;
    let top = LabelPass {
        y: viewport.content_top() - y_offset,
        anchor: TextAnchor::BOTTOM_CENTER,
    };
    let bottom = LabelPass {
        y: viewport.content_bottom() + y_offset,
        anchor: TextAnchor::TOP_CENTER,
    };

    match axis.label_position {
        XAxisLabelPosition::Top => smallvec![top],
        XAxisLabelPosition::TopInside => smallvec![LabelPass {
            y: viewport.content_top() + y_offset + rotated_height,
            anchor: TextAnchor::BOTTOM_CENTER,
        }],
        XAxisLabelPosition::Bottom => smallvec![bottom],
        XAxisLabelPosition::BottomInside => smallvec![LabelPass {
            y: viewport.content_bottom() - y_offset - rotated_height,
            anchor: TextAnchor::TOP_CENTER,
        }],
        XAxisLabelPosition::BothSided => smallvec![top, bottom],
    }
}

/// Wrap width for labels, one data unit wide scaled by the wrap percent.
#[must_use]
pub fn label_max_width(axis: &XAxis, transformer: &Transformer) -> Option<f64> {
    if !axis.word_wrap_enabled {
        return None;
    }
    let width = axis.word_wrap_width_percent * transformer.value_to_pixel_matrix().a;
    (width.is_finite() && width > 0.0).then_some(width)
}

/// Places every visible tick label for all label rows of the axis.
#[must_use]
pub fn compute_axis_label_positions(
    axis: &XAxis,
    viewport: Viewport,
    transformer: &Transformer,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn TextMeasurer,
) -> Vec<AxisLabelPlacement> {
    if !axis.enabled || !axis.draw_labels_enabled {
        return Vec::new();
    }

    let mut placements = Vec::new();
    for pass in label_passes(axis, viewport) {
        place_labels(
            axis,
            viewport,
            transformer,
            formatter,
            measurer,
            pass,
            &mut placements,
        );
    }
    placements
}

/// Places one row of labels, appending to `out`.
///
/// Entries outside the content X bounds are skipped. With first/last
/// clipping avoidance on, the first label shifts right by half its width
/// and the last shifts left by half its width when it would overflow the
/// chart edge.
pub fn place_labels(
    axis: &XAxis,
    viewport: Viewport,
    transformer: &Transformer,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn TextMeasurer,
    pass: LabelPass,
    out: &mut Vec<AxisLabelPlacement>,
) {
    let matrix = transformer.value_to_pixel_matrix();
    let max_width = label_max_width(axis, transformer);
    let angle_radians = axis.label_rotation_angle.to_radians();
    let entry_count = axis.entry_count();

    for (index, value) in axis.entries.iter().copied().enumerate() {
        let Some(position) = axis.placement_value(index) else {
            continue;
        };
        let mut x = matrix.apply(Point::new(position, 0.0)).x;
        if !x.is_finite() || !viewport.is_in_bounds_x(x) {
            continue;
        }

        let text = formatter.string_for_value(value, axis);

        if axis.avoid_first_last_clipping {
            if index == entry_count - 1 && entry_count > 1 {
                let width = measurer
                    .measure(&text, axis.label_font_size_px, max_width)
                    .width;
                if width > viewport.offset_right * 2.0 && x + width > viewport.chart_width {
                    x -= width / 2.0;
                }
            } else if index == 0 {
                let width = measurer
                    .measure(&text, axis.label_font_size_px, max_width)
                    .width;
                x += width / 2.0;
            }
        }

        out.push(AxisLabelPlacement {
            entry_index: index,
            value,
            point: Point::new(x, pass.y),
            anchor: pass.anchor,
            text,
            max_width,
            angle_radians,
        });
    }
}

/// Label whose anchor point is nearest to `point` under `distance`.
#[must_use]
pub fn closest_label(
    placements: &[AxisLabelPlacement],
    point: Point,
    distance: Distance,
) -> Option<&AxisLabelPlacement> {
    placements
        .iter()
        .map(|placement| (placement, distance.between(placement.point, point)))
        .filter(|(_, d)| d.is_finite())
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(placement, _)| placement)
}
