use cairo::{Context, Format, ImageSurface, LinearGradient, RadialGradient};
use pango::FontDescription;
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::warn;

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, ImagePrimitive, LineDash, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub gradients_drawn: usize,
    pub images_drawn: usize,
    pub images_missing: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a widget draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
///
/// Limit-line images are looked up by key among surfaces registered with
/// [`CairoRenderer::register_image`].
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    images: HashMap<String, ImageSurface>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            images: HashMap::new(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    pub fn register_image(&mut self, key: impl Into<String>, image: ImageSurface) {
        self.images.insert(key.into(), image);
    }

    pub fn unregister_image(&mut self, key: &str) -> Option<ImageSurface> {
        self.images.remove(key)
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for gradient in &frame.linear_gradients {
            let pattern = LinearGradient::new(
                gradient.start.x,
                gradient.start.y,
                gradient.end.x,
                gradient.end.y,
            );
            add_color_stops(&pattern, gradient.colors);
            with_clip(context, Some(gradient.clip), |context| {
                context
                    .set_source(&pattern)
                    .map_err(|err| map_backend_error("failed to set gradient source", err))?;
                context
                    .paint()
                    .map_err(|err| map_backend_error("failed to paint linear gradient", err))
            })?;
            stats.gradients_drawn += 1;
        }

        for rect in &frame.rects {
            with_clip(context, rect.clip, |context| draw_rect(context, *rect))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            with_clip(context, line.clip, |context| draw_line(context, *line))?;
            stats.lines_drawn += 1;
        }

        for gradient in &frame.radial_gradients {
            let pattern = RadialGradient::new(
                gradient.center.x,
                gradient.center.y,
                gradient.start_radius,
                gradient.center.x,
                gradient.center.y,
                gradient.end_radius,
            );
            add_color_stops(&pattern, gradient.colors);
            with_clip(context, gradient.clip, |context| {
                context
                    .set_source(&pattern)
                    .map_err(|err| map_backend_error("failed to set gradient source", err))?;
                context.arc(
                    gradient.center.x,
                    gradient.center.y,
                    gradient.start_radius.max(gradient.end_radius),
                    0.0,
                    2.0 * PI,
                );
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill radial gradient", err))
            })?;
            stats.gradients_drawn += 1;
        }

        for image in &frame.images {
            let Some(surface) = self.images.get(&image.key) else {
                warn!(key = %image.key, "no cairo surface registered for image key");
                stats.images_missing += 1;
                continue;
            };
            with_clip(context, image.clip, |context| draw_image(context, image, surface))?;
            stats.images_drawn += 1;
        }

        for text in &frame.texts {
            with_clip(context, text.clip, |context| draw_text(context, text))?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Runs `draw` between save/restore, clipped to `clip` when present.
fn with_clip(
    context: &Context,
    clip: Option<Rect>,
    draw: impl FnOnce(&Context) -> ChartResult<()>,
) -> ChartResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    if let Some(clip) = clip {
        context.rectangle(clip.x, clip.y, clip.width, clip.height);
        context.clip();
    }
    let result = draw(context);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    result
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_dash(context: &Context, dash: Option<LineDash>) {
    match dash {
        Some(dash) => context.set_dash(&[dash.on, dash.off], dash.phase),
        None => context.set_dash(&[], 0.0),
    }
}

fn add_color_stops(pattern: &cairo::Gradient, colors: [Color; 2]) {
    for (offset, color) in [(0.0, colors[0]), (1.0, colors[1])] {
        pattern.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha);
    }
}

fn draw_line(context: &Context, line: LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    apply_dash(context, line.dash);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    append_rect_path(context, rect);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

/// Scales `surface` into the image rect; a tint paints the tint color
/// through the image alpha.
fn draw_image(context: &Context, image: &ImagePrimitive, surface: &ImageSurface) -> ChartResult<()> {
    let source_width = f64::from(surface.width());
    let source_height = f64::from(surface.height());
    if source_width <= 0.0 || source_height <= 0.0 || image.rect.is_empty() {
        return Ok(());
    }

    context.translate(image.rect.x, image.rect.y);
    context.scale(image.rect.width / source_width, image.rect.height / source_height);
    match image.tint {
        Some(tint) => {
            apply_color(context, tint);
            context
                .mask_surface(surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to draw tinted image", err))
        }
        None => {
            context
                .set_source_surface(surface, 0.0, 0.0)
                .map_err(|err| map_backend_error("failed to set image source", err))?;
            context
                .paint()
                .map_err(|err| map_backend_error("failed to paint image", err))
        }
    }
}

/// Draws a label with its anchor corner at `(x, y)`, rotated around that
/// point.
fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_alignment(match text.h_align {
        TextHAlign::Left => pango::Alignment::Left,
        TextHAlign::Center => pango::Alignment::Center,
        TextHAlign::Right => pango::Alignment::Right,
    });
    if let Some(max_width) = text.max_width {
        layout.set_width((max_width * f64::from(pango::SCALE)) as i32);
        layout.set_wrap(pango::WrapMode::WordChar);
    }
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = -f64::from(text_width) * text.anchor.x;
    let dy = -f64::from(text_height) * text.anchor.y;

    apply_color(context, text.color);
    context.translate(text.x, text.y);
    if text.angle_radians != 0.0 {
        context.rotate(text.angle_radians);
    }
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
