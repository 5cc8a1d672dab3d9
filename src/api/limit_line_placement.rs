use crate::core::{Point, Rect, Segment, Transformer, Viewport};
use crate::render::TextHAlign;

use super::{LimitLine, TextMeasurer};

/// Fixed vertical gap between the content edge and a limit label.
pub const LIMIT_LABEL_BASE_Y_OFFSET: f64 = 2.0;

/// Top-left anchor of a limit-line label and the side the text grows to.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitLabelAnchor {
    pub point: Point,
    /// `Left` text grows rightward from the anchor, `Right` grows leftward.
    pub h_align: TextHAlign,
    pub text: String,
}

/// Soft glow painted behind a limit-line image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGlow {
    pub center: Point,
    pub start_radius: f64,
    pub end_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitImageGeometry {
    pub rect: Rect,
    pub glow: ImageGlow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitLineGeometry {
    pub marker: Segment,
    /// Content rect widened by half the line width on each side.
    pub clip_rect: Rect,
    pub label: Option<LimitLabelAnchor>,
    pub image: Option<LimitImageGeometry>,
}

/// Geometry for one limit line; `None` when its pixel position is not finite.
#[must_use]
pub fn compute_limit_line_geometry(
    limit_line: &LimitLine,
    viewport: Viewport,
    transformer: &Transformer,
    measurer: &dyn TextMeasurer,
) -> Option<LimitLineGeometry> {
    let position = transformer.pixel_for_values(limit_line.limit, 0.0);
    if !position.x.is_finite() {
        return None;
    }

    let marker = Segment::new(
        Point::new(position.x, viewport.content_top()),
        Point::new(position.x, viewport.content_bottom()),
    );
    let clip_rect = viewport
        .content_rect()
        .outset_x(limit_line.line_width / 2.0);
    let label = limit_label_anchor(
        limit_line,
        position.x,
        viewport,
        LIMIT_LABEL_BASE_Y_OFFSET + limit_line.y_offset,
        measurer,
    );
    let image = limit_image_geometry(limit_line, position.x, viewport, transformer);

    Some(LimitLineGeometry {
        marker,
        clip_rect,
        label,
        image,
    })
}

/// Label anchor for the requested corner; `None` when labels are disabled
/// or the label is empty.
#[must_use]
pub fn limit_label_anchor(
    limit_line: &LimitLine,
    x: f64,
    viewport: Viewport,
    y_offset: f64,
    measurer: &dyn TextMeasurer,
) -> Option<LimitLabelAnchor> {
    if !limit_line.draw_label_enabled || limit_line.label.is_empty() {
        return None;
    }

    let x_offset = limit_line.line_width + limit_line.x_offset;
    let line_height = measurer.line_height(limit_line.value_font_size_px);
    let top_y = viewport.content_top() + y_offset;
    let bottom_y = viewport.content_bottom() - line_height - y_offset;

    let position = limit_line.label_position;
    let (label_x, h_align) = if position.is_right() {
        (x + x_offset, TextHAlign::Left)
    } else {
        (x - x_offset, TextHAlign::Right)
    };
    let label_y = if position.is_top() { top_y } else { bottom_y };

    Some(LimitLabelAnchor {
        point: Point::new(label_x, label_y),
        h_align,
        text: limit_line.label.clone(),
    })
}

/// Image rect kept inside the content area and within the sticky distance
/// to the right of the line at pixel `x`; `None` for a zero-size image.
#[must_use]
pub fn limit_image_geometry(
    limit_line: &LimitLine,
    x: f64,
    viewport: Viewport,
    transformer: &Transformer,
) -> Option<LimitImageGeometry> {
    let image = limit_line.image.as_ref()?;
    let size = image.size;
    let inset = image.inset;
    let sticky_px = transformer.pixel_width_for_delta(image.sticky_length);
    let origin_x = viewport.content_rect().x;

    let image_x = (origin_x + inset.left)
        .min(x + sticky_px - size.width - inset.right)
        .max(x + inset.left);
    let rect = Rect::from_origin_size(
        Point::new(image_x, viewport.content_bottom() - size.height - inset.bottom),
        size,
    );
    if !rect.is_finite() || rect.is_empty() {
        return None;
    }

    Some(LimitImageGeometry {
        rect,
        glow: ImageGlow {
            center: rect.center(),
            start_radius: size.width / 2.0,
            end_radius: 1.0,
        },
    })
}
