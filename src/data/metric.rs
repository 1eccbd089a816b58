//! Metric Module
//! The fixed set of numeric columns a chart axis can be driven by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// How a metric value is written in the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Raw value followed by `%`
    Percent,
    /// Thousands-grouped, at most three fraction digits
    Grouped,
}

/// A numeric column of the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Poverty,
    Age,
    Income,
    Obesity,
    Smokes,
    Healthcare,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Poverty,
        Metric::Age,
        Metric::Income,
        Metric::Obesity,
        Metric::Smokes,
        Metric::Healthcare,
    ];

    /// Metrics assigned to an axis, in label order (top to bottom).
    pub fn for_axis(axis: Axis) -> [Metric; 3] {
        match axis {
            Axis::X => [Metric::Poverty, Metric::Age, Metric::Income],
            Axis::Y => [Metric::Obesity, Metric::Smokes, Metric::Healthcare],
        }
    }

    /// CSV column name, also used as the tooltip key.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Poverty => "poverty",
            Metric::Age => "age",
            Metric::Income => "income",
            Metric::Obesity => "obesity",
            Metric::Smokes => "smokes",
            Metric::Healthcare => "healthcare",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Metric::Poverty | Metric::Age | Metric::Income => Axis::X,
            Metric::Obesity | Metric::Smokes | Metric::Healthcare => Axis::Y,
        }
    }

    /// Axis label text
    pub fn label(self) -> &'static str {
        match self {
            Metric::Poverty => "In Poverty (%)",
            Metric::Age => "Age (Median)",
            Metric::Income => "Household Income (Median)",
            Metric::Obesity => "Obese (%)",
            Metric::Smokes => "Smokes (%)",
            Metric::Healthcare => "Lacks Healthcare (%)",
        }
    }

    /// Position of the label within its group: -1, 0 or 1 label spacings.
    pub fn label_slot(self) -> i32 {
        let axis_metrics = Self::for_axis(self.axis());
        let idx = axis_metrics.iter().position(|m| *m == self).unwrap_or(1);
        idx as i32 - 1
    }

    /// Tooltip format when the metric drives the x axis.
    pub fn x_format(self) -> ValueFormat {
        match self {
            Metric::Poverty => ValueFormat::Percent,
            _ => ValueFormat::Grouped,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_sits_on_exactly_one_axis() {
        for axis in [Axis::X, Axis::Y] {
            for metric in Metric::for_axis(axis) {
                assert_eq!(metric.axis(), axis);
            }
        }
    }

    #[test]
    fn label_slots_spread_around_centre() {
        assert_eq!(Metric::Poverty.label_slot(), -1);
        assert_eq!(Metric::Age.label_slot(), 0);
        assert_eq!(Metric::Income.label_slot(), 1);
        assert_eq!(Metric::Healthcare.label_slot(), 1);
    }

    #[test]
    fn parses_column_names_case_insensitively() {
        assert_eq!("Income".parse::<Metric>(), Ok(Metric::Income));
        assert_eq!(" smokes ".parse::<Metric>(), Ok(Metric::Smokes));
        assert!("height".parse::<Metric>().is_err());
    }
}
