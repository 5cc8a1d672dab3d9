use smallvec::SmallVec;

use crate::core::{Point, Rect, Segment, Transformer, Viewport};

use super::XAxis;

/// Vertical grid line at one tick, spanning the content height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLineSegment {
    pub x: f64,
    pub top_y: f64,
    pub bottom_y: f64,
}

/// Grid lines for `entries`, kept only when
/// `offset_left <= x <= chart_width`.
#[must_use]
pub fn compute_grid_line_segments(
    entries: &[f64],
    viewport: Viewport,
    transformer: &Transformer,
) -> Vec<GridLineSegment> {
    let matrix = transformer.value_to_pixel_matrix();
    entries
        .iter()
        .map(|entry| matrix.apply(Point::new(*entry, 0.0)).x)
        .filter(|x| *x >= viewport.offset_left && *x <= viewport.chart_width)
        .map(|x| GridLineSegment {
            x,
            top_y: viewport.content_top(),
            bottom_y: viewport.content_bottom(),
        })
        .collect()
}

/// Content rect widened by half the grid stroke so edge lines stay whole.
#[must_use]
pub fn grid_clipping_rect(viewport: Viewport, grid_line_width: f64) -> Rect {
    viewport.content_rect().outset_x(grid_line_width / 2.0)
}

/// Axis line segments along the content top and/or bottom edge.
#[must_use]
pub fn compute_axis_line_segments(axis: &XAxis, viewport: Viewport) -> SmallVec<[Segment; 2]> {
    let mut segments = SmallVec::new();
    if !axis.enabled || !axis.draw_axis_line_enabled {
        return segments;
    }

    let left = viewport.content_left();
    let right = viewport.content_right();
    if axis.label_position.draws_top_line() {
        let y = viewport.content_top();
        segments.push(Segment::new(Point::new(left, y), Point::new(right, y)));
    }
    if axis.label_position.draws_bottom_line() {
        let y = viewport.content_bottom();
        segments.push(Segment::new(Point::new(left, y), Point::new(right, y)));
    }
    segments
}
