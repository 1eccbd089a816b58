//! Linear Scale Module
//! Maps metric values into canvas pixels and picks axis ticks.

use crate::data::{Metric, Record};

/// Fraction added below the minimum and above the maximum of a domain.
pub const DOMAIN_PADDING: f64 = 0.10;

/// Monotonic linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// Map a domain value to the range. A collapsed domain maps to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    /// Roughly `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Spacing between the ticks returned by `ticks(count)`.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        tick_step(d0.min(d1), d0.max(d1), count)
    }
}

/// Padded domain of a metric over the full record set:
/// `[0.9 × min, 1.1 × max]`, skipping NaN values.
///
/// Returns `None` if no record carries a finite value.
pub fn padded_domain(records: &[Record], metric: Metric) -> Option<(f64, f64)> {
    let (min, max) = records
        .iter()
        .map(|r| r.value(metric))
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    Some((min * (1.0 - DOMAIN_PADDING), max * (1.0 + DOMAIN_PADDING)))
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick bounds plus increment; a negative increment means "divide by".
fn tick_bounds(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, inc)
    }
}

/// Round tick values between `start` and `stop`, in the order of the arguments.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_bounds(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    if count == 0 || !(hi > lo) {
        return 0.0;
    }
    let (_, _, inc) = tick_bounds(lo, hi, count as f64);
    if inc < 0.0 {
        1.0 / -inc
    } else {
        inc
    }
}

/// Tick label with as many decimals as the step needs and grouped thousands.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    crate::charts::tooltip::group_thousands(value, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn padded_domain_scales_min_and_max() {
        let records = vec![
            Record::new("AL", "Alabama").with(Metric::Poverty, 18.3),
            Record::new("AK", "Alaska").with(Metric::Poverty, 11.0),
        ];
        let (lo, hi) = padded_domain(&records, Metric::Poverty).unwrap();
        assert!(approx(lo, 9.9));
        assert!(approx(hi, 20.13));
    }

    #[test]
    fn padded_domain_skips_nan() {
        let records = vec![
            Record::new("AL", "Alabama").with(Metric::Age, 40.0),
            Record::new("AK", "Alaska"),
        ];
        let (lo, hi) = padded_domain(&records, Metric::Age).unwrap();
        assert!(approx(lo, 36.0));
        assert!(approx(hi, 44.0));
        assert_eq!(padded_domain(&records, Metric::Income), None);
    }

    #[test]
    fn apply_and_invert_are_inverse() {
        let scale = LinearScale::new((9.9, 20.13), (130.0, 940.0));
        assert!(approx(scale.apply(9.9), 130.0));
        assert!(approx(scale.apply(20.13), 940.0));
        assert!(approx(scale.invert(scale.apply(15.0)), 15.0));
    }

    #[test]
    fn inverted_range_maps_large_values_up() {
        let scale = LinearScale::new((0.0, 10.0), (500.0, 20.0));
        assert!(scale.apply(10.0) < scale.apply(0.0));
    }

    #[test]
    fn ticks_match_d3() {
        let t = ticks(9.9, 20.13, 10);
        assert_eq!(t, (10..=20).map(f64::from).collect::<Vec<_>>());

        let t = ticks(0.0, 1.0, 5);
        assert_eq!(t, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let t = ticks(0.0, 100_000.0, 5);
        assert_eq!(t, vec![0.0, 20_000.0, 40_000.0, 60_000.0, 80_000.0, 100_000.0]);
    }

    #[test]
    fn tick_labels_follow_step_precision() {
        assert_eq!(tick_label(40000.0, 10000.0), "40,000");
        assert_eq!(tick_label(0.4, 0.2), "0.4");
        assert_eq!(tick_label(12.0, 1.0), "12");
    }
}
