pub mod distance;
pub mod geometry;
pub mod transform;
pub mod types;

pub use distance::Distance;
pub use geometry::{EdgeInsets, Point, Rect, Segment, Size};
pub use transform::{Affine, Transformer};
pub use types::Viewport;
