use approx::assert_abs_diff_eq;
use chart_xaxis::api::{
    HeuristicTextMeasurer, LimitLabelPosition, LimitLine, LimitLineImage, TextMeasurer,
    compute_grid_line_segments, compute_limit_line_geometry, grid_clipping_rect,
};
use chart_xaxis::core::{Affine, EdgeInsets, Point, Rect, Size, Transformer, Viewport};
use chart_xaxis::render::TextHAlign;

fn viewport() -> Viewport {
    Viewport::new(300.0, 200.0).with_offsets(10.0, 20.0, 10.0, 30.0)
}

#[test]
fn grid_lines_use_strict_chart_bounds() {
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let entries = [9.0, 10.0, 150.0, 300.0, 300.5];
    let segments = compute_grid_line_segments(&entries, viewport(), &transformer);

    let xs: Vec<f64> = segments.iter().map(|s| s.x).collect();
    assert_eq!(xs, vec![10.0, 150.0, 300.0]);
    assert!(segments.iter().all(|s| s.top_y == 20.0 && s.bottom_y == 170.0));
}

#[test]
fn grid_clip_widens_content_rect() {
    assert_eq!(
        grid_clipping_rect(viewport(), 1.0),
        Rect::new(9.5, 20.0, 281.0, 150.0)
    );
}

#[test]
fn limit_marker_spans_content_height() {
    let transformer = Transformer::from_matrix(Affine::scale(2.0, 1.0));
    let line = LimitLine::new(50.0, "");
    let geometry = compute_limit_line_geometry(
        &line,
        viewport(),
        &transformer,
        &HeuristicTextMeasurer::default(),
    )
    .expect("finite limit");

    assert_eq!(geometry.marker.start, Point::new(100.0, 20.0));
    assert_eq!(geometry.marker.end, Point::new(100.0, 170.0));
}

#[test]
fn limit_label_anchors_follow_corner() {
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let measurer = HeuristicTextMeasurer::default();
    let line_height = measurer.line_height(13.0);
    let base = LimitLine::new(100.0, "target")
        .with_line_width(2.0)
        .with_offsets(3.0, 1.0);

    let cases = [
        (LimitLabelPosition::RightTop, 105.0, 23.0, TextHAlign::Left),
        (
            LimitLabelPosition::RightBottom,
            105.0,
            170.0 - line_height - 3.0,
            TextHAlign::Left,
        ),
        (LimitLabelPosition::LeftTop, 95.0, 23.0, TextHAlign::Right),
        (
            LimitLabelPosition::LeftBottom,
            95.0,
            170.0 - line_height - 3.0,
            TextHAlign::Right,
        ),
    ];

    for (position, x, y, h_align) in cases {
        let line = base.clone().with_label_position(position);
        let label = compute_limit_line_geometry(&line, viewport(), &transformer, &measurer)
            .and_then(|geometry| geometry.label)
            .expect("label drawn");
        assert_abs_diff_eq!(label.point.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(label.point.y, y, epsilon = 1e-9);
        assert_eq!(label.h_align, h_align);
        assert_eq!(label.text, "target");
    }
}

#[test]
fn hidden_label_yields_no_anchor() {
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let mut line = LimitLine::new(100.0, "target");
    line.draw_label_enabled = false;
    let geometry = compute_limit_line_geometry(
        &line,
        viewport(),
        &transformer,
        &HeuristicTextMeasurer::default(),
    )
    .expect("finite limit");
    assert!(geometry.label.is_none());
}

#[test]
fn non_finite_limit_is_skipped() {
    let transformer = Transformer::from_matrix(Affine::IDENTITY);
    let line = LimitLine::new(f64::INFINITY, "inf");
    assert!(
        compute_limit_line_geometry(
            &line,
            viewport(),
            &transformer,
            &HeuristicTextMeasurer::default()
        )
        .is_none()
    );
}

#[test]
fn limit_image_sits_on_content_bottom_within_sticky_reach() {
    // 4 px per data unit, content starts at x = 10.
    let transformer =
        Transformer::from_matrix(Affine::scale(4.0, 1.0).then(Affine::translation(10.0, 0.0)));
    let image = LimitLineImage::new("flag", Size::new(20.0, 10.0), 10.0)
        .with_inset(EdgeInsets::new(0.0, 4.0, 2.0, 6.0));
    let line = LimitLine::new(30.0, "").with_image(image);

    let geometry = compute_limit_line_geometry(
        &line,
        viewport(),
        &transformer,
        &HeuristicTextMeasurer::default(),
    )
    .expect("finite limit");
    let image = geometry.image.expect("image geometry");

    // line x = 130, sticky = 40 px:
    // max(min(10 + 4, 130 + 40 - 20 - 6), 130 + 4) = 134
    assert_eq!(image.rect, Rect::new(134.0, 158.0, 20.0, 10.0));
    assert_eq!(image.glow.center, Point::new(144.0, 163.0));
    assert_eq!(image.glow.end_radius, 1.0);
}
