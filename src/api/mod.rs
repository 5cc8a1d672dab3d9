mod axis_config;
mod axis_ticks;
mod block_placement;
mod grid_placement;
mod json_contract;
mod label_placement;
mod limit_line;
mod limit_line_placement;
mod text_measure;
mod value_formatter;
mod x_axis_renderer;

pub use axis_config::{
    AxisBlock, AxisLabelMetrics, BlockStyle, XAxis, XAxisLabelPosition,
};
pub use axis_ticks::{
    compute_axis_entries, compute_axis_range, compute_label_metrics, longest_label,
    rotated_label_size, round_to_next_significant,
};
pub use block_placement::{
    BLOCK_GRADIENT_CLIP_SLACK, BLOCK_HATCH_GAP, BlockGeometry, BlockGradientGeometry,
    compute_block_geometry, compute_block_gradient_geometry, compute_block_rects, hatch_segments,
    visible_hatch_segments,
};
pub use grid_placement::{
    GridLineSegment, compute_axis_line_segments, compute_grid_line_segments, grid_clipping_rect,
};
pub use json_contract::{XAXIS_CONFIG_JSON_SCHEMA_V1, XAxisConfigJsonContractV1};
pub use label_placement::{
    AxisLabelPlacement, LabelPass, closest_label, compute_axis_label_positions, label_max_width,
    label_passes, place_labels,
};
pub use limit_line::{LimitLabelPosition, LimitLine, LimitLineImage};
pub use limit_line_placement::{
    ImageGlow, LIMIT_LABEL_BASE_Y_OFFSET, LimitImageGeometry, LimitLabelAnchor, LimitLineGeometry,
    compute_limit_line_geometry, limit_image_geometry, limit_label_anchor,
};
pub use text_measure::{HeuristicTextMeasurer, TextMeasurer};
pub use value_formatter::{AxisValueFormatter, DefaultAxisValueFormatter, UtcTimeAxisFormatter};
pub use x_axis_renderer::{BLOCK_BASELINE_DASH, XAxisRenderer};
