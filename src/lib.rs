//! chart-xaxis: horizontal axis geometry for charts.
//!
//! Computes tick entries, label anchors, grid and limit lines and block
//! overlays for a chart's x axis, and emits them as backend-agnostic
//! primitives in a [`render::RenderFrame`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{XAxis, XAxisRenderer};
pub use error::{ChartError, ChartResult};
