use chrono::{DateTime, FixedOffset, Utc};

use super::XAxis;

/// Turns an axis entry into label text.
pub trait AxisValueFormatter {
    fn string_for_value(&self, value: f64, axis: &XAxis) -> String;
}

impl<F> AxisValueFormatter for F
where
    F: Fn(f64, &XAxis) -> String,
{
    fn string_for_value(&self, value: f64, axis: &XAxis) -> String {
        self(value, axis)
    }
}

/// Fixed-point formatter; falls back to the axis' computed decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultAxisValueFormatter {
    pub decimals: Option<usize>,
}

impl DefaultAxisValueFormatter {
    #[must_use]
    pub fn with_decimals(decimals: usize) -> Self {
        Self {
            decimals: Some(decimals),
        }
    }
}

impl AxisValueFormatter for DefaultAxisValueFormatter {
    fn string_for_value(&self, value: f64, axis: &XAxis) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        let precision = self.decimals.unwrap_or(axis.decimals);
        let text = format!("{value:.precision$}");
        if text.starts_with('-') && text[1..].chars().all(|ch| ch == '0' || ch == '.') {
            text[1..].to_owned()
        } else {
            text
        }
    }
}

/// Formats entries as unix timestamps (seconds) with a `chrono` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcTimeAxisFormatter {
    pattern: String,
    offset_minutes: i32,
}

impl Default for UtcTimeAxisFormatter {
    fn default() -> Self {
        Self::new("%Y-%m-%d")
    }
}

impl UtcTimeAxisFormatter {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            offset_minutes: 0,
        }
    }

    /// Shifts rendering to a fixed UTC offset; out-of-range offsets keep UTC.
    #[must_use]
    pub fn with_offset_minutes(mut self, offset_minutes: i32) -> Self {
        self.offset_minutes = offset_minutes;
        self
    }
}

impl AxisValueFormatter for UtcTimeAxisFormatter {
    fn string_for_value(&self, value: f64, axis: &XAxis) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        let seconds = value.round() as i64;
        let Some(dt) = DateTime::<Utc>::from_timestamp(seconds, 0) else {
            return DefaultAxisValueFormatter::default().string_for_value(value, axis);
        };
        match FixedOffset::east_opt(self.offset_minutes.saturating_mul(60)) {
            Some(offset) => dt.with_timezone(&offset).format(&self.pattern).to_string(),
            None => dt.format(&self.pattern).to_string(),
        }
    }
}
