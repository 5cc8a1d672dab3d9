use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

/// 2-D affine matrix: `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Matrix that applies `self` first and `next` second.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    #[must_use]
    pub fn invert(self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det == 0.0 {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            tx: (self.c * self.ty - self.d * self.tx) / det,
            ty: (self.b * self.tx - self.a * self.ty) / det,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Data-space to pixel-space mapping owned by the parent chart.
///
/// The full matrix is `value_to_px`, then the host's zoom/pan `touch`
/// matrix, then the content `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transformer {
    value_to_px: Affine,
    touch: Affine,
    offset: Affine,
}

impl Transformer {
    /// Wraps an already composed value-to-pixel matrix.
    #[must_use]
    pub fn from_matrix(matrix: Affine) -> Self {
        Self {
            value_to_px: matrix,
            touch: Affine::IDENTITY,
            offset: Affine::IDENTITY,
        }
    }

    /// Fits the data ranges into the viewport content rectangle.
    ///
    /// Y grows upward in data space unless `inverted_y` is set.
    pub fn fit_to_viewport(
        x_range: (f64, f64),
        y_range: (f64, f64),
        viewport: Viewport,
        inverted_y: bool,
    ) -> ChartResult<Self> {
        let viewport = viewport.validate()?;
        let delta_x = x_range.1 - x_range.0;
        let delta_y = y_range.1 - y_range.0;
        for (name, start, delta) in [("x", x_range.0, delta_x), ("y", y_range.0, delta_y)] {
            if !start.is_finite() || !delta.is_finite() || delta == 0.0 {
                return Err(ChartError::InvalidTransform(format!(
                    "{name} range must be finite and non-empty"
                )));
            }
        }

        let scale_x = viewport.content_width() / delta_x;
        let scale_y = viewport.content_height() / delta_y;
        let (value_to_px, offset) = if inverted_y {
            (
                Affine::translation(-x_range.0, -y_range.0).then(Affine::scale(scale_x, scale_y)),
                Affine::translation(viewport.content_left(), viewport.content_top()),
            )
        } else {
            (
                Affine::translation(-x_range.0, -y_range.0)
                    .then(Affine::scale(scale_x, -scale_y)),
                Affine::translation(viewport.content_left(), viewport.content_bottom()),
            )
        };

        Ok(Self {
            value_to_px,
            touch: Affine::IDENTITY,
            offset,
        })
    }

    /// Replaces the zoom/pan matrix applied between scaling and offsetting.
    #[must_use]
    pub fn with_touch_matrix(mut self, touch: Affine) -> Self {
        self.touch = touch;
        self
    }

    #[must_use]
    pub fn value_to_pixel_matrix(&self) -> Affine {
        self.value_to_px.then(self.touch).then(self.offset)
    }

    #[must_use]
    pub fn pixel_for_values(&self, x: f64, y: f64) -> Point {
        self.value_to_pixel_matrix().apply(Point::new(x, y))
    }

    /// Pixel length of a data-space horizontal delta; translation cancels.
    #[must_use]
    pub fn pixel_width_for_delta(&self, delta: f64) -> f64 {
        self.pixel_for_values(delta, 0.0).x - self.pixel_for_values(0.0, 0.0).x
    }

    /// Data-space value under a pixel, `None` for a singular matrix.
    #[must_use]
    pub fn value_for_touch_point(&self, pixel: Point) -> Option<Point> {
        self.value_to_pixel_matrix()
            .invert()
            .map(|inverse| inverse.apply(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::{Affine, Transformer};
    use crate::core::{Point, Viewport};
    use approx::assert_abs_diff_eq;

    #[test]
    fn then_applies_left_matrix_first() {
        let matrix = Affine::scale(2.0, 1.0).then(Affine::translation(100.0, 0.0));
        assert_eq!(matrix.apply(Point::new(1.0, 0.0)), Point::new(102.0, 0.0));
        let reversed = Affine::translation(100.0, 0.0).then(Affine::scale(2.0, 1.0));
        assert_eq!(reversed.apply(Point::new(1.0, 0.0)), Point::new(202.0, 0.0));
    }

    #[test]
    fn invert_round_trips_a_point() {
        let matrix = Affine::new(2.0, 0.0, 0.0, -3.0, 40.0, 500.0);
        let inverse = matrix.invert().expect("invertible");
        let restored = inverse.apply(matrix.apply(Point::new(7.5, -2.0)));
        assert_abs_diff_eq!(restored.x, 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(restored.y, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Affine::scale(0.0, 1.0).invert().is_none());
        assert!(
            Transformer::from_matrix(Affine::scale(0.0, 1.0))
                .value_for_touch_point(Point::new(1.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn fit_maps_range_corners_to_content_corners() {
        let viewport = Viewport::new(300.0, 200.0).with_offsets(20.0, 10.0, 30.0, 40.0);
        let transformer =
            Transformer::fit_to_viewport((0.0, 50.0), (0.0, 10.0), viewport, false)
                .expect("valid transform");
        let bottom_left = transformer.pixel_for_values(0.0, 0.0);
        let top_right = transformer.pixel_for_values(50.0, 10.0);
        assert_abs_diff_eq!(bottom_left.x, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bottom_left.y, 160.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top_right.x, 270.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top_right.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn touch_zoom_scales_around_content_origin() {
        let viewport = Viewport::new(100.0, 100.0);
        let transformer = Transformer::fit_to_viewport((0.0, 10.0), (0.0, 1.0), viewport, false)
            .expect("valid transform")
            .with_touch_matrix(Affine::scale(2.0, 1.0));
        assert_abs_diff_eq!(transformer.pixel_for_values(5.0, 0.0).x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(transformer.pixel_width_for_delta(1.0), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_range_is_rejected() {
        let viewport = Viewport::new(100.0, 100.0);
        assert!(Transformer::fit_to_viewport((3.0, 3.0), (0.0, 1.0), viewport, false).is_err());
    }
}
