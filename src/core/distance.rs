use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;

/// Metric used when picking the pixel-space item nearest to a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Distance {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Only the X difference counts.
    Horizontal,
    /// Only the Y difference counts.
    Vertical,
}

impl Distance {
    #[must_use]
    pub fn between(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Euclidean => (a.x - b.x).hypot(a.y - b.y),
            Self::Horizontal => (a.x - b.x).abs(),
            Self::Vertical => (a.y - b.y).abs(),
        }
    }
}
