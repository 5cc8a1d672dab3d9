use tracing::trace;

use crate::core::{Point, Size, Transformer, Viewport};

use super::{AxisLabelMetrics, AxisValueFormatter, TextMeasurer, XAxis};

/// Narrowest content width for which the zoomed visible range is used.
const MIN_CONTENT_WIDTH_FOR_VISIBLE_RANGE_PX: f64 = 10.0;

/// Returns the data range shown by the viewport.
///
/// While zoomed in, the range is read back from the content edges through
/// the transformer; otherwise `(min, max)` is returned unchanged.
#[must_use]
pub fn compute_axis_range(
    min: f64,
    max: f64,
    inverted: bool,
    viewport: Viewport,
    transformer: &Transformer,
) -> (f64, f64) {
    if viewport.content_width() <= MIN_CONTENT_WIDTH_FOR_VISIBLE_RANGE_PX
        || viewport.is_fully_zoomed_out_x()
    {
        return (min, max);
    }

    let left = transformer
        .value_for_touch_point(Point::new(viewport.content_left(), viewport.content_top()));
    let right = transformer
        .value_for_touch_point(Point::new(viewport.content_right(), viewport.content_top()));
    match (left, right) {
        (Some(left), Some(right)) if left.x.is_finite() && right.x.is_finite() => {
            if inverted {
                (right.x, left.x)
            } else {
                (left.x, right.x)
            }
        }
        _ => (min, max),
    }
}

/// Fills `axis.entries`, `axis.centered_entries` and `axis.decimals` with
/// "nice" ticks covering `[min, max]`.
pub fn compute_axis_entries(axis: &mut XAxis, min: f64, max: f64) {
    axis.entries.clear();
    axis.centered_entries.clear();

    let label_count = axis.label_count;
    let range = (max - min).abs();
    if label_count == 0 || !range.is_finite() || range <= 0.0 {
        trace!(label_count, range, "no axis entries for empty range");
        return;
    }

    let raw_interval = range / label_count as f64;
    let mut interval = round_to_next_significant(raw_interval);
    if axis.granularity_enabled && interval < axis.granularity {
        interval = axis.granularity;
    }
    if interval > 0.0 {
        let magnitude = 10f64.powf(interval.log10().floor());
        let significant_digit = (interval / magnitude) as i64;
        if significant_digit > 5 {
            interval = 10.0 * magnitude;
        }
    }

    let centering = axis.center_axis_labels;
    if axis.force_label_count {
        interval = range / (label_count.max(2) - 1) as f64;
        let start = min.min(max);
        axis.entries = (0..label_count)
            .map(|index| normalize_zero(start + interval * index as f64))
            .collect();
    } else {
        let mut first = if interval == 0.0 {
            0.0
        } else {
            (min / interval).ceil() * interval
        };
        if centering {
            first -= interval;
        }
        let last = if interval == 0.0 {
            0.0
        } else {
            next_up((max / interval).floor() * interval)
        };

        let mut count = usize::from(centering);
        if interval != 0.0 && last != first {
            if last >= first {
                count += ((last - first) / interval).floor() as usize + 1;
            }
        } else if last == first && count == 0 {
            count = 1;
        }

        axis.entries = (0..count)
            .map(|index| normalize_zero(first + interval * index as f64))
            .collect();
    }

    axis.decimals = if interval > 0.0 && interval < 1.0 {
        (-interval.log10()).ceil() as usize
    } else {
        0
    };

    if centering {
        let offset = interval / 2.0;
        axis.centered_entries = axis.entries.iter().map(|entry| entry + offset).collect();
    }

    trace!(
        count = axis.entries.len(),
        interval,
        decimals = axis.decimals,
        "computed axis entries"
    );
}

/// Measures the longest formatted label and stores its plain and rotated
/// extents on the axis.
pub fn compute_label_metrics(
    axis: &mut XAxis,
    formatter: &dyn AxisValueFormatter,
    measurer: &dyn TextMeasurer,
) -> AxisLabelMetrics {
    let longest = longest_label(axis, formatter);
    let size = measurer.measure(&longest, axis.label_font_size_px, None);
    let rotated = size.rotated_by_degrees(axis.label_rotation_angle);
    let metrics = AxisLabelMetrics {
        label_width: size.width,
        label_height: size.height,
        label_rotated_width: rotated.width,
        label_rotated_height: rotated.height,
    };
    axis.label_metrics = metrics;
    metrics
}

/// Longest formatted entry label by character count; empty without entries.
#[must_use]
pub fn longest_label(axis: &XAxis, formatter: &dyn AxisValueFormatter) -> String {
    axis.entries
        .iter()
        .map(|entry| formatter.string_for_value(*entry, axis))
        .fold(String::new(), |longest, label| {
            if label.chars().count() > longest.chars().count() {
                label
            } else {
                longest
            }
        })
}

/// Rounds to one significant digit, e.g. `0.0347 -> 0.03`, `7412 -> 7000`.
#[must_use]
pub fn round_to_next_significant(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }
    let digits = value.abs().log10().ceil();
    let power = 1.0 - digits;
    let magnitude = 10f64.powf(power);
    (value * magnitude).round() / magnitude
}

fn next_up(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        return value;
    }
    if value == 0.0 {
        return f64::from_bits(1);
    }
    let bits = value.to_bits();
    if value > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Label box size after rotation, for hosts reserving axis space.
#[must_use]
pub fn rotated_label_size(metrics: AxisLabelMetrics) -> Size {
    Size::new(metrics.label_rotated_width, metrics.label_rotated_height)
}

#[cfg(test)]
mod tests {
    use super::{compute_axis_entries, next_up, round_to_next_significant};
    use crate::api::XAxis;
    use approx::assert_abs_diff_eq;

    #[test]
    fn significant_rounding_keeps_one_digit() {
        assert_abs_diff_eq!(round_to_next_significant(0.0347), 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(round_to_next_significant(7412.0), 7000.0, epsilon = 1e-9);
        assert_eq!(round_to_next_significant(0.0), 0.0);
    }

    #[test]
    fn next_up_moves_past_the_value() {
        assert!(next_up(1.0) > 1.0);
        assert!(next_up(-1.0) > -1.0);
        assert!(next_up(0.0) > 0.0);
    }

    #[test]
    fn entries_snap_to_nice_interval() {
        let mut axis = XAxis::new();
        axis.label_count = 5;
        compute_axis_entries(&mut axis, 0.0, 100.0);
        assert_eq!(axis.entries, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(axis.decimals, 0);
    }

    #[test]
    fn large_significant_digit_rounds_up_to_next_decade() {
        let mut axis = XAxis::new();
        axis.label_count = 10;
        // raw interval 0.7 -> significant digit 7 -> interval 1.0
        compute_axis_entries(&mut axis, 0.0, 7.0);
        assert_eq!(axis.entries.len(), 8);
        assert_eq!(axis.entries[1], 1.0);
    }

    #[test]
    fn small_intervals_produce_decimals() {
        let mut axis = XAxis::new();
        axis.label_count = 4;
        compute_axis_entries(&mut axis, 0.0, 0.1);
        assert_eq!(axis.decimals, 2);
        assert!(!axis.entries.is_empty());
    }

    #[test]
    fn forced_count_spreads_entries_evenly() {
        let mut axis = XAxis::new();
        axis.label_count = 3;
        axis.force_label_count = true;
        compute_axis_entries(&mut axis, 10.0, 20.0);
        assert_eq!(axis.entries, vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn centering_adds_half_interval_entries() {
        let mut axis = XAxis::new();
        axis.label_count = 5;
        axis.center_axis_labels = true;
        compute_axis_entries(&mut axis, 0.0, 100.0);
        assert_eq!(axis.entries.first().copied(), Some(-20.0));
        assert_eq!(axis.centered_entries.first().copied(), Some(-10.0));
        assert_eq!(axis.entries.len(), axis.centered_entries.len());
    }

    #[test]
    fn empty_range_clears_entries() {
        let mut axis = XAxis::new().with_entries(vec![1.0, 2.0]);
        compute_axis_entries(&mut axis, 5.0, 5.0);
        assert!(axis.entries.is_empty());
    }

    #[test]
    fn granularity_raises_interval() {
        let mut axis = XAxis::new();
        axis.label_count = 10;
        axis.granularity_enabled = true;
        axis.granularity = 5.0;
        compute_axis_entries(&mut axis, 0.0, 10.0);
        assert_eq!(axis.entries, vec![0.0, 5.0, 10.0]);
    }
}
