//! Correlation coefficients.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EdaError;

/// Scoring function for a custom correlation method.
///
/// Receives two equal-length slices of pairwise-complete observations.
pub type ScoreFn = dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync;

/// Method used to score the association between two columns.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CorrelationMethod {
    /// Pearson product-moment correlation.
    #[default]
    Pearson,
    /// Spearman rank correlation (Pearson over average ranks).
    Spearman,
    /// Kendall tau-b rank correlation.
    Kendall,
    /// Caller-supplied scoring function.
    Custom { name: String, score: Arc<ScoreFn> },
}

impl CorrelationMethod {
    /// Wrap a scoring function as a method.
    pub fn custom(
        name: impl Into<String>,
        score: impl Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        CorrelationMethod::Custom {
            name: name.into(),
            score: Arc::new(score),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::Kendall => "kendall",
            CorrelationMethod::Custom { name, .. } => name,
        }
    }

    /// Score two equal-length samples.
    ///
    /// Returns `NaN` with fewer than two observations, and for built-in
    /// methods when either sample has no variation.
    pub fn score(&self, x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return f64::NAN;
        }

        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => pearson(&average_ranks(x), &average_ranks(y)),
            CorrelationMethod::Kendall => kendall_tau_b(x, y),
            CorrelationMethod::Custom { score, .. } => score(x, y),
        }
    }
}

impl fmt::Debug for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationMethod::Custom { name, .. } => {
                f.debug_struct("Custom").field("name", name).finish_non_exhaustive()
            }
            _ => f.write_str(match self {
                CorrelationMethod::Pearson => "Pearson",
                CorrelationMethod::Spearman => "Spearman",
                _ => "Kendall",
            }),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorrelationMethod {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            "kendall" => Ok(CorrelationMethod::Kendall),
            _ => Err(EdaError::InvalidArgument(format!(
                "method must be one of: pearson, spearman, kendall (got '{}')",
                s
            ))),
        }
    }
}

impl TryFrom<String> for CorrelationMethod {
    type Error = EdaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CorrelationMethod> for String {
    fn from(method: CorrelationMethod) -> Self {
        method.name().to_string()
    }
}

/// Whether every value in the sample is identical.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson correlation of two equal-length samples.
///
/// A constant sample is checked exactly first; its mean may not be
/// representable, which would leave rounding noise in the deviations.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if is_constant(x) || is_constant(y) {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

/// 1-based ranks with ties sharing their average rank.
pub(crate) fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}

/// Kendall tau-b with tie correction.
///
/// `(C - D) / sqrt((n0 - n1) * (n0 - n2))` where `n1` and `n2` count pairs
/// tied in `x` and in `y`.
fn kendall_tau_b(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    let mut concordant: i64 = 0;
    let mut discordant: i64 = 0;
    let mut untied_x: i64 = 0;
    let mut untied_y: i64 = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx != 0.0 {
                untied_x += 1;
            }
            if dy != 0.0 {
                untied_y += 1;
            }
            let product = dx * dy;
            if product > 0.0 {
                concordant += 1;
            } else if product < 0.0 {
                discordant += 1;
            }
        }
    }

    let denom = ((untied_x as f64) * (untied_y as f64)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    ((concordant - discordant) as f64 / denom).clamp(-1.0, 1.0)
}
