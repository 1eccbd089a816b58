//! Record Module
//! One row of the input table: a region and its metric values.

use crate::data::Metric;

/// A region with one value per metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub abbr: String,
    pub state: String,
    values: [f64; Metric::ALL.len()],
}

impl Record {
    /// Create a record with every metric set to NaN.
    pub fn new(abbr: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            abbr: abbr.into(),
            state: state.into(),
            values: [f64::NAN; Metric::ALL.len()],
        }
    }

    /// Builder-style setter, mostly used when assembling records by hand.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        self.values[Self::slot(metric)] = value;
    }

    /// Metric value; NaN when the source text was missing or malformed.
    pub fn value(&self, metric: Metric) -> f64 {
        self.values[Self::slot(metric)]
    }

    fn slot(metric: Metric) -> usize {
        Metric::ALL
            .iter()
            .position(|m| *m == metric)
            .unwrap_or_default()
    }
}

/// Parse a text cell as a number. Anything unparseable becomes NaN.
pub fn parse_number(text: Option<&str>) -> f64 {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_metrics_are_nan() {
        let r = Record::new("AL", "Alabama").with(Metric::Poverty, 18.3);
        assert_eq!(r.value(Metric::Poverty), 18.3);
        assert!(r.value(Metric::Income).is_nan());
    }

    #[test]
    fn parse_number_is_lenient() {
        assert_eq!(parse_number(Some(" 44345 ")), 44345.0);
        assert_eq!(parse_number(Some("12.5")), 12.5);
        assert!(parse_number(Some("n/a")).is_nan());
        assert!(parse_number(Some("")).is_nan());
        assert!(parse_number(None).is_nan());
    }
}
