//! Linear Scale Module
//! Maps metric values to pixel coordinates with a domain rounded outward to
//! round numbers, and generates axis tick values.

use crate::data::{Axis, Dataset, Metric};
use tracing::warn;

/// Tick count used when rounding a domain.
pub const NICE_TICK_COUNT: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Linear mapping `domain -> range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale for one metric of the dataset on the given axis.
    ///
    /// Horizontal range is `[0, plot_width]`, vertical is `[plot_height, 0]`.
    pub fn for_metric(
        dataset: &Dataset,
        metric: Metric,
        axis: Axis,
        plot_width: f64,
        plot_height: f64,
    ) -> Self {
        let domain = dataset.extent(metric).unwrap_or_else(|| {
            warn!(metric = metric.column(), "no finite values, using unit domain");
            (0.0, 1.0)
        });
        let range = match axis {
            Axis::Horizontal => (0.0, plot_width),
            Axis::Vertical => (plot_height, 0.0),
        };
        Self::new(domain, range).nice(NICE_TICK_COUNT)
    }

    /// Project a value to pixels. Unclamped; `NaN` stays `NaN`.
    pub fn project(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Round the domain outward so both ends are multiples of the tick step.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut prestep: Option<f64> = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                break;
            };
            if prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        if count == 0 || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }
        (0..=(i2 - i1) as i64)
            .map(|k| {
                let i = i1 + k as f64;
                if inc < 0.0 {
                    i / -inc
                } else {
                    i * inc
                }
            })
            .collect()
    }

    /// Tick label with just enough decimals for the tick step and thousands
    /// separators, e.g. `45,000` or `0.5`.
    pub fn format_tick(&self, value: f64, count: usize) -> String {
        let (d0, d1) = self.domain;
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        let decimals = match tick_increment(start, stop, count) {
            Some(inc) if inc < 0.0 => (-inc).log10().ceil().max(0.0) as usize,
            _ => 0,
        };
        group_thousands(&format!("{:.*}", decimals, value))
    }

    /// Linear interpolation between two domains, used while animating an axis.
    pub fn lerp_domain(&self, target: &LinearScale, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            domain: (
                lerp(self.domain.0, target.domain.0),
                lerp(self.domain.1, target.domain.1),
            ),
            range: target.range,
        }
    }
}

/// Tick index span and increment. Negative increments are inverse steps
/// (`value = index / -inc`).
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step > 0.0) || !step.is_finite() {
        return None;
    }
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

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let fwd = 10f64.powf(power) * factor;
        i1 = (start / fwd).round();
        i2 = (stop / fwd).round();
        if i1 * fwd < start {
            i1 += 1.0;
        }
        if i2 * fwd > stop {
            i2 -= 1.0;
        }
        inc = fwd;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    tick_spec(start, stop, count as f64).map(|(_, _, inc)| inc)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nice(lo: f64, hi: f64) -> (f64, f64) {
        LinearScale::new((lo, hi), (0.0, 1.0))
            .nice(NICE_TICK_COUNT)
            .domain
    }

    #[test]
    fn nice_rounds_to_unit_step() {
        assert_eq!(nice(9.2, 21.5), (9.0, 22.0));
    }

    #[test]
    fn nice_rounds_to_step_of_two() {
        assert_eq!(nice(4.6, 24.9), (4.0, 26.0));
    }

    #[test]
    fn nice_rounds_income_to_thousands() {
        assert_eq!(nice(39665.0, 73397.0), (35000.0, 75000.0));
    }

    #[test]
    fn nice_handles_fractional_steps() {
        assert_eq!(nice(0.12, 0.98), (0.1, 1.0));
    }

    #[test]
    fn nice_leaves_degenerate_domain_alone() {
        assert_eq!(nice(5.0, 5.0), (5.0, 5.0));
    }

    #[test]
    fn nice_domain_contains_extent() {
        let cases = [
            (0.3, 0.7),
            (-12.5, 3.1),
            (30.5, 44.1),
            (17.0, 36.0),
            (1e-3, 7e-3),
            (123456.0, 987654.0),
        ];
        for (lo, hi) in cases {
            let (a, b) = nice(lo, hi);
            assert!(a <= lo && hi <= b, "({lo}, {hi}) -> ({a}, {b})");
        }
    }

    #[test]
    fn degenerate_domain_projects_to_range_middle() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 820.0));
        assert_eq!(s.project(5.0), 410.0);
    }

    #[test]
    fn nan_stays_nan_on_degenerate_domain() {
        let s = LinearScale::new((10.0, 10.0), (0.0, 820.0));
        assert!(s.project(f64::NAN).is_nan());
        assert_eq!(s.project(10.0), 410.0);
    }

    #[test]
    fn vertical_range_is_inverted() {
        let s = LinearScale::new((0.0, 10.0), (380.0, 0.0));
        assert_eq!(s.project(0.0), 380.0);
        assert_eq!(s.project(10.0), 0.0);
        assert_eq!(s.project(5.0), 190.0);
    }

    #[test]
    fn project_nan_is_nan() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert!(s.project(f64::NAN).is_nan());
    }

    #[test]
    fn ticks_cover_domain_with_round_values() {
        let s = LinearScale::new((4.0, 26.0), (0.0, 1.0));
        assert_eq!(
            s.ticks(10),
            vec![4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0]
        );
    }

    #[test]
    fn fractional_ticks_avoid_float_noise() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
    }

    #[test]
    fn tick_labels_follow_step() {
        let income = LinearScale::new((35000.0, 75000.0), (0.0, 1.0));
        assert_eq!(income.format_tick(45000.0, 10), "45,000");
        let rate = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(rate.format_tick(0.3, 10), "0.3");
        let negative = LinearScale::new((-2000.0, 0.0), (0.0, 1.0));
        assert_eq!(negative.format_tick(-1200.0, 10), "-1,200");
    }

    #[test]
    fn lerp_domain_halfway() {
        let a = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let b = LinearScale::new((10.0, 30.0), (0.0, 100.0));
        assert_eq!(a.lerp_domain(&b, 0.5).domain, (5.0, 20.0));
    }
}
