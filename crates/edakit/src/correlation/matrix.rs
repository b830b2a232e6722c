//! Full pairwise correlation matrix.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::input::DataTable;
use crate::profile::ColumnProfiler;
use super::method::CorrelationMethod;
use super::{complete_pairs, is_correlatable};

/// Square matrix of pairwise correlations.
///
/// Undefined entries are `NaN` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Name of the method used.
    pub method: String,
    /// Column names labelling both axes, in table order.
    pub columns: Vec<String>,
    /// Row-major values; `values[i][j]` correlates `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of columns on each axis.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the matrix has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column on the axes.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Correlation between two named columns.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.index_of(row)?;
        let j = self.index_of(col)?;
        Some(self.values[i][j])
    }

    /// Serialize to pretty JSON for a heatmap collaborator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Correlate every pair of numeric or boolean columns.
///
/// Each pair uses its own pairwise-complete rows. The diagonal is 1.0
/// unless a column cannot be correlated with itself (constant or too few
/// values), in which case it is `NaN`.
pub fn correlation_matrix(table: &DataTable, method: &CorrelationMethod) -> CorrelationMatrix {
    let profiler = ColumnProfiler::new();

    let numeric: Vec<(&str, Vec<Option<f64>>)> = table
        .columns()
        .iter()
        .filter(|c| is_correlatable(profiler.column_type(c)))
        .map(|c| (c.name.as_str(), c.numeric_values()))
        .collect();

    debug!(
        "{} correlation matrix over {} of {} columns",
        method,
        numeric.len(),
        table.column_count()
    );

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let (x, y) = complete_pairs(&numeric[i].1, &numeric[j].1);
            let score = method.score(&x, &y);
            if i == j {
                values[i][i] = if score.is_nan() { f64::NAN } else { 1.0 };
            } else {
                values[i][j] = score;
                values[j][i] = score;
            }
        }
    }

    CorrelationMatrix {
        method: method.name().to_string(),
        columns: numeric.into_iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}
