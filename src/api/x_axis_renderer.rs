use tracing::{debug, trace};

use crate::core::{Distance, Point, Transformer, Viewport};
use crate::error::ChartResult;
use crate::render::{
    ImagePrimitive, LineDash, LinePrimitive, LinearGradientPrimitive, RadialGradientPrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::{
    AxisLabelPlacement, AxisValueFormatter, DefaultAxisValueFormatter, HeuristicTextMeasurer,
    TextMeasurer, XAxis, closest_label, compute_axis_entries, compute_axis_label_positions,
    compute_axis_line_segments, compute_axis_range, compute_block_geometry,
    compute_block_gradient_geometry, compute_block_rects, compute_grid_line_segments, compute_label_metrics,
    compute_limit_line_geometry, grid_clipping_rect,
};

/// Dash pattern of the baseline drawn under each block.
pub const BLOCK_BASELINE_DASH: LineDash = LineDash::new(2.0, 2.0);

/// Turns an [`XAxis`] into draw primitives for one viewport.
///
/// The axis and transformer are optional; every pass is a no-op until both
/// are attached.
pub struct XAxisRenderer {
    viewport: Viewport,
    transformer: Option<Transformer>,
    axis: Option<XAxis>,
    formatter: Box<dyn AxisValueFormatter>,
    measurer: Box<dyn TextMeasurer>,
}

impl std::fmt::Debug for XAxisRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XAxisRenderer")
            .field("viewport", &self.viewport)
            .field("transformer", &self.transformer)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

impl XAxisRenderer {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transformer: None,
            axis: None,
            formatter: Box::new(DefaultAxisValueFormatter::default()),
            measurer: Box::new(HeuristicTextMeasurer::default()),
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis: XAxis) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl AxisValueFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use]
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn axis(&self) -> Option<&XAxis> {
        self.axis.as_ref()
    }

    pub fn axis_mut(&mut self) -> Option<&mut XAxis> {
        self.axis.as_mut()
    }

    pub fn set_axis(&mut self, axis: Option<XAxis>) {
        self.axis = axis;
    }

    #[must_use]
    pub fn transformer(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    pub fn set_transformer(&mut self, transformer: Option<Transformer>) {
        self.transformer = transformer;
    }

    /// Recomputes entries, decimals and label metrics for `[min, max]`.
    ///
    /// When zoomed in, the visible range read back through the transformer
    /// replaces `[min, max]`.
    pub fn compute_axis(&mut self, min: f64, max: f64, inverted: bool) {
        let viewport = self.viewport;
        let (min, max) = match &self.transformer {
            Some(transformer) => compute_axis_range(min, max, inverted, viewport, transformer),
            None => (min, max),
        };
        let Some(axis) = self.axis.as_mut() else {
            trace!("skipping axis computation without an axis");
            return;
        };
        compute_axis_entries(axis, min, max);
        compute_label_metrics(axis, self.formatter.as_ref(), self.measurer.as_ref());
    }

    fn parts(&self) -> Option<(&XAxis, &Transformer)> {
        match (&self.axis, &self.transformer) {
            (Some(axis), Some(transformer)) if axis.enabled => Some((axis, transformer)),
            (Some(_), Some(_)) => {
                trace!("x axis disabled");
                None
            }
            _ => {
                trace!("x axis or transformer missing");
                None
            }
        }
    }

    /// Current label placements, for drawing or hit testing.
    #[must_use]
    pub fn label_placements(&self) -> Vec<AxisLabelPlacement> {
        let Some((axis, transformer)) = self.parts() else {
            return Vec::new();
        };
        compute_axis_label_positions(
            axis,
            self.viewport,
            transformer,
            self.formatter.as_ref(),
            self.measurer.as_ref(),
        )
    }

    /// Label nearest to `point`, e.g. under a pointer.
    #[must_use]
    pub fn closest_label(&self, point: Point, distance: Distance) -> Option<AxisLabelPlacement> {
        closest_label(&self.label_placements(), point, distance).cloned()
    }

    pub fn render_axis_labels(&self, frame: &mut RenderFrame) {
        let Some((axis, _)) = self.parts() else {
            return;
        };
        for placement in self.label_placements() {
            if placement.text.is_empty() {
                continue;
            }
            frame.texts.push(
                TextPrimitive::new(
                    placement.text,
                    placement.point.x,
                    placement.point.y,
                    axis.label_font_size_px,
                    axis.label_text_color,
                    TextHAlign::Center,
                )
                .with_anchor(placement.anchor)
                .with_angle_radians(placement.angle_radians)
                .with_max_width(placement.max_width),
            );
        }
    }

    pub fn render_axis_line(&self, frame: &mut RenderFrame) {
        let Some((axis, _)) = self.parts() else {
            return;
        };
        for segment in compute_axis_line_segments(axis, self.viewport) {
            frame.lines.push(
                LinePrimitive::new(
                    segment.start.x,
                    segment.start.y,
                    segment.end.x,
                    segment.end.y,
                    axis.axis_line_width,
                    axis.axis_line_color,
                )
                .with_dash(axis.axis_line_dash),
            );
        }
    }

    pub fn render_grid_lines(&self, frame: &mut RenderFrame) {
        let Some((axis, transformer)) = self.parts() else {
            return;
        };
        if !axis.draw_grid_lines_enabled {
            return;
        }
        let clip = grid_clipping_rect(self.viewport, axis.grid_line_width);
        for segment in compute_grid_line_segments(&axis.entries, self.viewport, transformer) {
            frame.lines.push(
                LinePrimitive::new(
                    segment.x,
                    segment.top_y,
                    segment.x,
                    segment.bottom_y,
                    axis.grid_line_width,
                    axis.grid_color,
                )
                .with_dash(axis.grid_line_dash)
                .with_clip(clip),
            );
        }
    }

    /// Marker lines, labels, images and optional gradients of the enabled
    /// limit lines.
    pub fn render_limit_lines(&self, frame: &mut RenderFrame) {
        let Some((axis, transformer)) = self.parts() else {
            return;
        };

        for limit_line in axis.limit_lines.iter().filter(|line| line.enabled) {
            let Some(geometry) = compute_limit_line_geometry(
                limit_line,
                self.viewport,
                transformer,
                self.measurer.as_ref(),
            ) else {
                trace!(limit = limit_line.limit, "limit line off the pixel grid");
                continue;
            };

            if limit_line.render_block_gradient {
                if let (Some(colors), Some(gradient)) = (
                    axis.block_style.gradient_colors,
                    compute_block_gradient_geometry(
                        limit_line.limit,
                        0.0,
                        axis,
                        self.viewport,
                        transformer,
                    ),
                ) {
                    if let Some(clip) = gradient.clip_rect.intersection(geometry.clip_rect) {
                        frame.linear_gradients.push(LinearGradientPrimitive {
                            start: gradient.start,
                            end: gradient.end,
                            colors,
                            clip,
                        });
                    }
                }
            }

            frame.lines.push(
                LinePrimitive::new(
                    geometry.marker.start.x,
                    geometry.marker.start.y,
                    geometry.marker.end.x,
                    geometry.marker.end.y,
                    limit_line.line_width,
                    limit_line.line_color,
                )
                .with_dash(limit_line.line_dash)
                .with_clip(geometry.clip_rect),
            );

            if let Some(label) = geometry.label {
                frame.texts.push(
                    TextPrimitive::new(
                        label.text,
                        label.point.x,
                        label.point.y,
                        limit_line.value_font_size_px,
                        limit_line.value_text_color,
                        label.h_align,
                    )
                    .with_clip(geometry.clip_rect),
                );
            }

            if let (Some(image), Some(image_geometry)) = (&limit_line.image, geometry.image) {
                if let Some(colors) = image.radial_gradient_colors {
                    frame.radial_gradients.push(RadialGradientPrimitive {
                        center: image_geometry.glow.center,
                        start_radius: image_geometry.glow.start_radius,
                        end_radius: image_geometry.glow.end_radius,
                        colors,
                        clip: Some(geometry.clip_rect),
                    });
                }
                frame.images.push(ImagePrimitive {
                    key: image.key.clone(),
                    rect: image_geometry.rect,
                    tint: image.tint,
                    clip: Some(geometry.clip_rect),
                });
            }
        }
    }

    /// Fill, hatch and baseline of every block overlapping the content.
    pub fn render_blocks(&self, frame: &mut RenderFrame) {
        let Some((axis, transformer)) = self.parts() else {
            return;
        };
        let style = axis.block_style;

        for block in &axis.blocks {
            let Some(geometry) = compute_block_geometry(*block, axis, self.viewport, transformer)
            else {
                trace!(start = block.start, length = block.length, "block not drawn");
                continue;
            };

            frame.rects.push(
                RectPrimitive::from_rect(geometry.fill_rect, style.fill_color)
                    .with_clip(geometry.clip_rect),
            );
            frame
                .lines
                .extend(geometry.hatch_segments.iter().map(|segment| {
                    LinePrimitive::new(
                        segment.start.x,
                        segment.start.y,
                        segment.end.x,
                        segment.end.y,
                        style.stroke_width,
                        style.stroke_color,
                    )
                    .with_clip(geometry.clip_rect)
                }));
            frame.lines.push(
                LinePrimitive::new(
                    geometry.baseline.start.x,
                    geometry.baseline.start.y,
                    geometry.baseline.end.x,
                    geometry.baseline.end.y,
                    axis.axis_line_width,
                    axis.axis_line_color,
                )
                .with_dash(Some(BLOCK_BASELINE_DASH))
                .with_clip(geometry.clip_rect),
            );
        }
    }

    /// Vertical gradients behind blocks that produce visible geometry.
    pub fn render_block_gradients(&self, frame: &mut RenderFrame) {
        let Some((axis, transformer)) = self.parts() else {
            return;
        };
        let Some(colors) = axis.block_style.gradient_colors else {
            return;
        };

        for block in &axis.blocks {
            if compute_block_rects(*block, axis, self.viewport, transformer).is_none() {
                continue;
            }
            let Some(gradient) = compute_block_gradient_geometry(
                block.start,
                block.length,
                axis,
                self.viewport,
                transformer,
            ) else {
                continue;
            };
            frame.linear_gradients.push(LinearGradientPrimitive {
                start: gradient.start,
                end: gradient.end,
                colors,
                clip: gradient.clip_rect,
            });
        }
    }

    /// Runs every pass into a fresh frame.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        self.render_block_gradients(&mut frame);
        self.render_blocks(&mut frame);
        self.render_grid_lines(&mut frame);
        self.render_axis_line(&mut frame);
        self.render_limit_lines(&mut frame);
        self.render_axis_labels(&mut frame);

        debug!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            gradients = frame.linear_gradients.len() + frame.radial_gradients.len(),
            images = frame.images.len(),
            "built x axis frame"
        );
        frame
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame();
        renderer.render(&frame)
    }
}
