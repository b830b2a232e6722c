//! Descriptive statistics over the non-missing values of a numeric column.

use crate::schema::NumericSummary;

// =============================================================================
// STREAMING STATISTICS
// =============================================================================
// Welford's online algorithm for mean and variance in a single pass. Values
// are also retained so quartiles can be computed exactly.

/// Single-pass accumulator for mean, variance and extrema.
#[derive(Debug, Clone)]
pub(crate) struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
    min: f64,
    max: f64,
    values: Vec<f64>,
}

impl StreamingStats {
    pub(crate) fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            values: Vec::new(),
        }
    }

    /// Add a value using Welford's online algorithm.
    pub(crate) fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        self.values.push(value);
    }

    /// Sample variance (`n - 1` denominator).
    fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    /// Finish into a summary; `None` when no values were added.
    pub(crate) fn into_summary(mut self) -> Option<NumericSummary> {
        if self.count == 0 {
            return None;
        }

        self.values.sort_by(f64::total_cmp);

        Some(NumericSummary {
            count: self.count,
            mean: self.mean,
            std: self.sample_variance().map(f64::sqrt),
            min: self.min,
            q1: quantile(&self.values, 0.25),
            median: quantile(&self.values, 0.5),
            q3: quantile(&self.values, 0.75),
            max: self.max,
        })
    }
}

impl FromIterator<f64> for StreamingStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = StreamingStats::new();
        for value in iter {
            stats.add(value);
        }
        stats
    }
}

/// Quantile of sorted values by linear interpolation between closest ranks.
///
/// The position of `q` is `q * (n - 1)`; the result lies between the values
/// at the floor and ceiling of that position.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_summary_of_one_to_four() {
        let summary = [1.0, 2.0, 3.0, 4.0]
            .into_iter()
            .collect::<StreamingStats>()
            .into_summary()
            .unwrap();

        assert_eq!(summary.count, 4);
        assert!(approx(summary.mean, 2.5));
        assert!(approx(summary.std.unwrap(), 1.2909944487358056));
        assert_eq!(summary.min, 1.0);
        assert!(approx(summary.q1, 1.75));
        assert!(approx(summary.median, 2.5));
        assert!(approx(summary.q3, 3.25));
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_quartiles_unsorted_input() {
        let summary = [10.0, 1.0, 7.0, 3.0, 5.0]
            .into_iter()
            .collect::<StreamingStats>()
            .into_summary()
            .unwrap();

        assert!(approx(summary.q1, 3.0));
        assert!(approx(summary.median, 5.0));
        assert!(approx(summary.q3, 7.0));
        assert!(approx(summary.mean, 5.2));
    }

    #[test]
    fn test_single_value_has_no_std() {
        let summary = std::iter::once(7.0)
            .collect::<StreamingStats>()
            .into_summary()
            .unwrap();

        assert_eq!(summary.std, None);
        assert_eq!(summary.q1, 7.0);
        assert_eq!(summary.q3, 7.0);
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert!(StreamingStats::new().into_summary().is_none());
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [0.0, 10.0];
        assert!(approx(quantile(&sorted, 0.25), 2.5));
        assert!(approx(quantile(&sorted, 0.9), 9.0));
        assert!(quantile(&[], 0.5).is_nan());
    }
}
