use approx::assert_abs_diff_eq;
use chart_xaxis::api::{
    AxisBlock, BLOCK_HATCH_GAP, XAxis, compute_block_geometry, compute_block_gradient_geometry,
};
use chart_xaxis::core::{Affine, Point, Rect, Transformer, Viewport};
use chart_xaxis::render::Color;

fn viewport() -> Viewport {
    Viewport::new(200.0, 100.0).with_offsets(10.0, 10.0, 10.0, 10.0)
}

#[test]
fn fill_rect_covers_content_height_plus_axis_line() {
    let axis = XAxis::new();
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry = compute_block_geometry(AxisBlock::new(40.0, 30.0), &axis, viewport(), &transformer)
        .expect("visible block");

    assert_eq!(geometry.fill_rect, Rect::new(40.0, 10.0, 30.0, 80.5));
    assert_eq!(geometry.clip_rect, geometry.fill_rect);
    assert_eq!(geometry.baseline.start, Point::new(40.0, 90.0));
    assert_eq!(geometry.baseline.end, Point::new(70.0, 90.0));
}

#[test]
fn block_width_ignores_translation() {
    let axis = XAxis::new();
    let transformer =
        Transformer::from_matrix(Affine::scale(3.0, 1.0).then(Affine::translation(-25.0, 0.0)));

    let near = compute_block_geometry(AxisBlock::new(12.0, 4.0), &axis, viewport(), &transformer)
        .expect("near block");
    let far = compute_block_geometry(AxisBlock::new(50.0, 4.0), &axis, viewport(), &transformer)
        .expect("far block");

    assert_abs_diff_eq!(near.fill_rect.width, 12.0, epsilon = 1e-9);
    assert_abs_diff_eq!(near.fill_rect.width, far.fill_rect.width, epsilon = 1e-9);
}

#[test]
fn clip_is_intersection_with_extended_content_rect() {
    let axis = XAxis::new();
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry = compute_block_geometry(AxisBlock::new(0.0, 50.0), &axis, viewport(), &transformer)
        .expect("partially visible block");

    assert_eq!(geometry.fill_rect, Rect::new(0.0, 10.0, 50.0, 80.5));
    assert_eq!(geometry.clip_rect, Rect::new(10.0, 10.0, 40.0, 80.5));
}

#[test]
fn hatch_skips_lines_left_of_the_clip() {
    let axis = XAxis::new();
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry = compute_block_geometry(AxisBlock::new(0.0, 50.0), &axis, viewport(), &transformer)
        .expect("partially visible block");

    // x + y runs from 20 to 140.5 inside the clip; the fill starts at 10.
    // First visible d = 3 * 4.7, last d = 27 * 4.7.
    assert_eq!(geometry.hatch_segments.len(), 25);
    assert_abs_diff_eq!(geometry.hatch_segments[0].start.x, 14.1, epsilon = 1e-9);
    assert_abs_diff_eq!(geometry.hatch_segments[0].start.y, 10.0, epsilon = 1e-9);
}

#[test]
fn very_long_block_hatches_only_the_visible_part() {
    let axis = XAxis::new();
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry =
        compute_block_geometry(AxisBlock::new(0.0, 10_000_000.0), &axis, viewport(), &transformer)
            .expect("visible block");

    assert_eq!(geometry.clip_rect, Rect::new(10.0, 10.0, 180.0, 80.5));
    let step = BLOCK_HATCH_GAP + axis.block_style.stroke_width;
    let bound = ((180.0 + 80.5) / step).floor() as usize + 1;
    assert!(geometry.hatch_segments.len() <= bound);
}

#[test]
fn negative_length_is_standardized() {
    let axis = XAxis::new();
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry = compute_block_geometry(AxisBlock::new(50.0, -20.0), &axis, viewport(), &transformer)
        .expect("visible block");
    assert_eq!(geometry.fill_rect.x, 30.0);
    assert_eq!(geometry.fill_rect.width, 20.0);
}

#[test]
fn degenerate_and_offscreen_blocks_produce_nothing() {
    let mut axis = XAxis::new();
    axis.block_style.gradient_colors = Some([Color::BLACK, Color::TRANSPARENT]);
    let transformer = Transformer::from_matrix(Affine::IDENTITY);

    assert!(compute_block_geometry(AxisBlock::new(50.0, 0.0), &axis, viewport(), &transformer).is_none());
    assert!(compute_block_geometry(AxisBlock::new(500.0, 10.0), &axis, viewport(), &transformer).is_none());
    assert!(compute_block_geometry(AxisBlock::new(f64::NAN, 10.0), &axis, viewport(), &transformer).is_none());
    assert!(compute_block_gradient_geometry(500.0, 10.0, &axis, viewport(), &transformer).is_none());
}

#[test]
fn hatch_count_follows_step() {
    let mut axis = XAxis::new();
    axis.block_style.stroke_width = 1.3;
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let geometry = compute_block_geometry(AxisBlock::new(40.0, 30.0), &axis, viewport(), &transformer)
        .expect("visible block");

    let step = BLOCK_HATCH_GAP + 1.3;
    let expected = ((30.0 + 80.5) / step).floor() as usize + 1;
    assert_eq!(geometry.hatch_segments.len(), expected);
    assert_eq!(geometry.hatch_segments[0].start, Point::new(40.0, 10.0));
}

#[test]
fn gradient_spans_configured_height() {
    let mut axis = XAxis::new();
    axis.block_style.gradient_colors = Some([Color::rgb(1.0, 0.0, 0.0), Color::TRANSPARENT]);
    axis.block_style.gradient_height = 40.0;
    let transformer = Transformer::from_matrix(Affine::IDENTITY);

    let gradient = compute_block_gradient_geometry(40.0, 30.0, &axis, viewport(), &transformer)
        .expect("gradient");
    assert_eq!(gradient.rect, Rect::new(40.0, 10.0, 31.0, 80.0));
    assert_eq!(gradient.clip_rect, Rect::new(38.5, 10.0, 34.0, 80.0));
    assert_eq!(gradient.start, Point::new(40.0, 10.0));
    assert_eq!(gradient.end, Point::new(40.0, 50.0));
}
