//! Tooltip Module
//! Text shown in the floating panel while the pointer is over a mark.

use crate::data::{Axis, Metric, Record, ValueFormat};

/// Tooltip content for one record under the current axis selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Index of the hovered mark
    pub mark: usize,
    pub title: String,
    pub x_line: String,
    pub y_line: String,
}

impl Tooltip {
    pub fn for_record(mark: usize, record: &Record, x: Metric, y: Metric) -> Self {
        Self {
            mark,
            title: record.state.clone(),
            x_line: value_line(record, x, Axis::X),
            y_line: value_line(record, y, Axis::Y),
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.title, &self.x_line, &self.y_line]
    }
}

/// `"<metric>: <value>"` for one axis.
///
/// The x line follows the metric's own format; every y metric is a
/// percentage.
pub fn value_line(record: &Record, metric: Metric, axis: Axis) -> String {
    let format = match axis {
        Axis::X => metric.x_format(),
        Axis::Y => ValueFormat::Percent,
    };
    format!("{}: {}", metric, format_value(record.value(metric), format))
}

pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Percent => format!("{}%", value),
        ValueFormat::Grouped => format_grouped(value),
    }
}

/// English locale number: grouped thousands, up to three fraction digits.
pub fn format_grouped(value: f64) -> String {
    let text = group_thousands(value, 3);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Fixed-decimal rendering with `,` between thousands groups.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
