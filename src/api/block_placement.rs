//! Block overlay geometry.
//!
//! A block highlights `[start, start + length)` with a fill, a diagonal
//! hatch, a dashed baseline on the axis and an optional vertical gradient.
//! The block width is derived from the pixel delta of `length` alone, so it
//! does not depend on where the block starts.

use crate::core::{Point, Rect, Segment, Transformer, Viewport};

use super::{AxisBlock, XAxis};

/// Gap between hatch strokes, added to the stroke width to form the step.
pub const BLOCK_HATCH_GAP: f64 = 3.7;
/// Horizontal slack on each side of the gradient clip.
pub const BLOCK_GRADIENT_CLIP_SLACK: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockGeometry {
    pub fill_rect: Rect,
    pub clip_rect: Rect,
    pub hatch_segments: Vec<Segment>,
    /// Dashed segment drawn on the axis line under the block.
    pub baseline: Segment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGradientGeometry {
    pub rect: Rect,
    pub clip_rect: Rect,
    pub start: Point,
    pub end: Point,
}

/// Fill rect of a block and its visible part, without the hatch.
///
/// Returns `None` for a zero-length block or when the block does not
/// overlap the content area.
#[must_use]
pub fn compute_block_rects(
    block: AxisBlock,
    axis: &XAxis,
    viewport: Viewport,
    transformer: &Transformer,
) -> Option<(Rect, Rect)> {
    let origin_x = transformer.pixel_for_values(block.start, 0.0).x;
    let width = transformer.pixel_width_for_delta(block.length);
    let fill_rect = Rect::new(
        origin_x,
        viewport.content_top(),
        width,
        viewport.content_height() + axis.axis_line_width,
    )
    .standardized();
    if fill_rect.is_empty() {
        return None;
    }

    let visible_area = Rect::new(
        viewport.content_left(),
        viewport.content_top(),
        viewport.content_width(),
        viewport.content_height() + axis.axis_line_width,
    );
    let clip_rect = fill_rect.intersection(visible_area)?;
    Some((fill_rect, clip_rect))
}

/// Fill, clip and hatch geometry for a block.
///
/// Only hatch lines crossing `clip_rect` are kept, so the segment count
/// follows the visible size rather than the block length. Returns `None`
/// whenever [`compute_block_rects`] does, so nothing gets drawn for it.
#[must_use]
pub fn compute_block_geometry(
    block: AxisBlock,
    axis: &XAxis,
    viewport: Viewport,
    transformer: &Transformer,
) -> Option<BlockGeometry> {
    let (fill_rect, clip_rect) = compute_block_rects(block, axis, viewport, transformer)?;

    let hatch_segments = visible_hatch_segments(
        fill_rect,
        clip_rect,
        BLOCK_HATCH_GAP,
        axis.block_style.stroke_width,
    );
    let baseline_y = fill_rect.y + fill_rect.height - axis.axis_line_width;
    let baseline = Segment::new(
        Point::new(fill_rect.x, baseline_y),
        Point::new(fill_rect.x + fill_rect.width, baseline_y),
    );

    Some(BlockGeometry {
        fill_rect,
        clip_rect,
        hatch_segments,
        baseline,
    })
}

/// Step between hatch lines and index of the last one.
fn hatch_layout(bounds: Rect, gap: f64, stroke_width: f64) -> Option<(f64, f64)> {
    let step = gap + stroke_width;
    let total = bounds.width + bounds.height;
    if !step.is_finite() || step <= 0.0 || !total.is_finite() || total < 0.0 {
        return None;
    }
    Some((step, (total / step).floor()))
}

fn hatch_segment(bounds: Rect, distance: f64) -> Segment {
    let start = if distance < bounds.width {
        Point::new(bounds.x + distance, bounds.y)
    } else {
        Point::new(bounds.x + bounds.width, bounds.y + distance - bounds.width)
    };
    let end = if distance < bounds.height {
        Point::new(bounds.x, bounds.y + distance)
    } else {
        Point::new(bounds.x + distance - bounds.height, bounds.y + bounds.height)
    };
    Segment::new(start, end)
}

/// Diagonal hatch across `bounds` at a fixed step of `gap + stroke_width`.
///
/// Distances `d = i * step` walk the unrolled top+right edge. Each segment
/// starts on the top edge (or the right edge once `d` passes the width) and
/// ends on the left edge (or the bottom edge once `d` passes the height).
/// The count is `floor((width + height) / step) + 1`.
#[must_use]
pub fn hatch_segments(bounds: Rect, gap: f64, stroke_width: f64) -> Vec<Segment> {
    let Some((step, last)) = hatch_layout(bounds, gap, stroke_width) else {
        return Vec::new();
    };
    (0..=last as usize)
        .map(|index| hatch_segment(bounds, index as f64 * step))
        .collect()
}

/// The lines of [`hatch_segments`] that cross `clip`.
///
/// Line `i` lies on `x + y = bounds.x + bounds.y + i * step`, so the lines
/// touching `clip` form one contiguous index range.
#[must_use]
pub fn visible_hatch_segments(
    bounds: Rect,
    clip: Rect,
    gap: f64,
    stroke_width: f64,
) -> Vec<Segment> {
    let Some((step, last)) = hatch_layout(bounds, gap, stroke_width) else {
        return Vec::new();
    };
    if !clip.is_finite() {
        return Vec::new();
    }
    let first = if clip.min_x() <= bounds.min_x() && clip.min_y() <= bounds.min_y() {
        0.0
    } else {
        (((clip.min_x() - bounds.x) + (clip.min_y() - bounds.y)) / step)
            .ceil()
            .max(0.0)
    };
    let last = if clip.max_x() >= bounds.max_x() && clip.max_y() >= bounds.max_y() {
        last
    } else {
        (((clip.max_x() - bounds.x) + (clip.max_y() - bounds.y)) / step)
            .floor()
            .min(last)
    };
    if first.is_nan() || last.is_nan() || first > last {
        return Vec::new();
    }
    (first as usize..=last as usize)
        .map(|index| hatch_segment(bounds, index as f64 * step))
        .collect()
}

/// Vertical gradient geometry behind a block or a limit line.
///
/// The rect is one pixel wider than the block so zero-length blocks (limit
/// lines) still produce a sliver; the clip adds a little horizontal slack.
#[must_use]
pub fn compute_block_gradient_geometry(
    start: f64,
    length: f64,
    axis: &XAxis,
    viewport: Viewport,
    transformer: &Transformer,
) -> Option<BlockGradientGeometry> {
    axis.block_style.gradient_colors?;

    let origin_x = transformer.pixel_for_values(start, 0.0).x;
    let width = transformer.pixel_width_for_delta(length) + 1.0;
    let rect = Rect::new(
        origin_x,
        viewport.content_top(),
        width,
        viewport.content_height(),
    )
    .standardized();
    let visible = rect.intersection(viewport.content_rect())?;
    let clip_rect = visible.outset_x(BLOCK_GRADIENT_CLIP_SLACK);

    Some(BlockGradientGeometry {
        rect,
        clip_rect,
        start: Point::new(rect.x, viewport.content_top()),
        end: Point::new(
            rect.x,
            viewport.content_top() + axis.block_style.gradient_height,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        AxisBlock, BLOCK_HATCH_GAP, compute_block_geometry, compute_block_gradient_geometry,
        hatch_segments, visible_hatch_segments,
    };
    use crate::api::XAxis;
    use crate::core::{Affine, Point, Rect, Transformer, Viewport};
    use crate::render::Color;

    #[test]
    fn hatch_switches_edges_past_width_and_height() {
        let segments = hatch_segments(Rect::new(0.0, 0.0, 10.0, 4.0), 1.0, 1.0);
        assert_eq!(segments.len(), 8);
        // d = 0: top-left corner to itself.
        assert_eq!(segments[0].start, Point::new(0.0, 0.0));
        assert_eq!(segments[0].end, Point::new(0.0, 0.0));
        // d = 6: start on top edge, end on bottom edge.
        assert_eq!(segments[3].start, Point::new(6.0, 0.0));
        assert_eq!(segments[3].end, Point::new(2.0, 4.0));
        // d = 12: start on right edge.
        assert_eq!(segments[6].start, Point::new(10.0, 2.0));
        assert_eq!(segments[6].end, Point::new(8.0, 4.0));
    }

    #[test]
    fn hatch_respects_rect_origin() {
        let segments = hatch_segments(Rect::new(5.0, 20.0, 2.0, 2.0), 1.0, 0.0);
        assert_eq!(segments[3].start, Point::new(7.0, 21.0));
        assert_eq!(segments[3].end, Point::new(6.0, 22.0));
    }

    #[test]
    fn non_positive_step_yields_no_hatch() {
        assert!(hatch_segments(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, 0.0).is_empty());
    }

    #[test]
    fn visible_hatch_keeps_lines_crossing_clip() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 4.0);
        let clip = Rect::new(4.0, 0.0, 2.0, 4.0);
        let all = hatch_segments(bounds, 1.0, 1.0);
        let visible = visible_hatch_segments(bounds, clip, 1.0, 1.0);
        // x + y spans 4..=10 inside the clip: d = 4, 6, 8, 10.
        assert_eq!(visible, all[2..=5].to_vec());
    }

    #[test]
    fn visible_hatch_with_full_clip_matches_full_hatch() {
        let bounds = Rect::new(5.0, 20.0, 30.0, 12.0);
        assert_eq!(
            visible_hatch_segments(bounds, bounds, 3.7, 1.0),
            hatch_segments(bounds, 3.7, 1.0)
        );
    }

    #[test]
    fn huge_block_hatch_is_bounded_by_viewport() {
        let viewport = Viewport::new(200.0, 100.0);
        let transformer = Transformer::from_matrix(Affine::IDENTITY);
        let axis = XAxis::new();
        let geometry = compute_block_geometry(
            AxisBlock::new(0.0, 10_000_000.0),
            &axis,
            viewport,
            &transformer,
        )
        .expect("block overlaps the content");

        let step = BLOCK_HATCH_GAP + axis.block_style.stroke_width;
        let clip = geometry.clip_rect;
        let bound = ((clip.width + clip.height) / step).floor() as usize + 1;
        assert!(!geometry.hatch_segments.is_empty());
        assert!(geometry.hatch_segments.len() <= bound);
        assert!(geometry.hatch_segments.len() < 100);
    }

    #[test]
    fn gradient_requires_colors() {
        let viewport = Viewport::new(100.0, 100.0);
        let transformer = Transformer::from_matrix(Affine::IDENTITY);
        let mut axis = XAxis::new();
        assert!(compute_block_gradient_geometry(10.0, 0.0, &axis, viewport, &transformer).is_none());

        axis.block_style.gradient_colors = Some([Color::BLACK, Color::TRANSPARENT]);
        let gradient = compute_block_gradient_geometry(10.0, 0.0, &axis, viewport, &transformer)
            .expect("one pixel sliver");
        assert_eq!(gradient.rect, Rect::new(10.0, 0.0, 1.0, 100.0));
        assert_eq!(gradient.clip_rect, Rect::new(8.5, 0.0, 4.0, 100.0));
        assert_eq!(gradient.end, Point::new(10.0, 100.0));
    }
}
