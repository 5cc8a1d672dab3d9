use serde::{Deserialize, Serialize};

/// Point in either data or pixel space; the owner decides which.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounding-box size of a `width x height` box rotated by `degrees`.
    #[must_use]
    pub fn rotated_by_degrees(self, degrees: f64) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        Self {
            width: (self.width * cos).abs() + (self.height * sin).abs(),
            height: (self.width * sin).abs() + (self.height * cos).abs(),
        }
    }
}

/// Straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Per-edge insets used to keep attached images away from viewport edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Axis-aligned rectangle in pixel space, origin at the top-left corner.
///
/// Widths and heights may be negative when produced by an inverted
/// transform; [`Rect::standardized`] folds those into a positive extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub fn min_x(self) -> f64 {
        self.x.min(self.x + self.width)
    }

    #[must_use]
    pub fn max_x(self) -> f64 {
        self.x.max(self.x + self.width)
    }

    #[must_use]
    pub fn min_y(self) -> f64 {
        self.y.min(self.y + self.height)
    }

    #[must_use]
    pub fn max_y(self) -> f64 {
        self.y.max(self.y + self.height)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True when the rectangle covers no area or is not finite.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.is_finite() || self.width == 0.0 || self.height == 0.0
    }

    #[must_use]
    pub fn standardized(self) -> Self {
        Self::new(
            self.min_x(),
            self.min_y(),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// Grows the rectangle by `dx` on both the left and right edges.
    #[must_use]
    pub fn outset_x(self, dx: f64) -> Self {
        Self::new(self.x - dx, self.y, self.width + 2.0 * dx, self.height)
    }

    /// Overlap of two rectangles, `None` when they share no area.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let left = self.min_x().max(other.min_x());
        let right = self.max_x().min(other.max_x());
        let top = self.min_y().max(other.min_y());
        let bottom = self.max_y().min(other.max_y());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}
