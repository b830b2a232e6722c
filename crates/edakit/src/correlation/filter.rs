//! Target correlation with threshold filtering and ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EdaError, Result};
use crate::input::DataTable;
use crate::profile::ColumnProfiler;
use super::method::CorrelationMethod;
use super::{complete_pairs, is_correlatable};

/// Configuration for target correlation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Correlation method. Default: Pearson.
    pub method: CorrelationMethod,
    /// Scores with absolute value strictly above this are kept. Default: 0.5.
    pub threshold: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            method: CorrelationMethod::Pearson,
            threshold: 0.5,
        }
    }
}

/// One column's correlation with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    /// Column name.
    pub variable: String,
    /// Correlation coefficient.
    pub score: f64,
}

/// Columns correlated with a target beyond a threshold, ascending by score.
///
/// An empty result means no column met the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Target column the scores were computed against.
    pub target: String,
    /// Name of the method used.
    pub method: String,
    /// Threshold applied.
    pub threshold: f64,
    /// Retained entries, ascending by score.
    pub entries: Vec<CorrelationEntry>,
}

impl CorrelationResult {
    /// Number of retained columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column met the threshold.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in ranked order.
    pub fn iter(&self) -> std::slice::Iter<'_, CorrelationEntry> {
        self.entries.iter()
    }

    /// Retained column names in ranked order.
    pub fn variables(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.variable.as_str()).collect()
    }

    /// Score of a retained column.
    pub fn score(&self, variable: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.variable == variable)
            .map(|e| e.score)
    }

    /// Chart title in the form `"<method> correlation with <target>"`.
    pub fn title(&self) -> String {
        format!("{} correlation with {}", self.method, self.target)
    }

    /// Serialize to pretty JSON for a chart collaborator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a CorrelationResult {
    type Item = &'a CorrelationEntry;
    type IntoIter = std::slice::Iter<'a, CorrelationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Ranks columns by their correlation with a target column.
#[derive(Debug, Clone, Default)]
pub struct CorrelationFilter {
    config: CorrelationConfig,
}

impl CorrelationFilter {
    /// Create a filter with default settings (Pearson, threshold 0.5).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with custom configuration.
    pub fn with_config(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Correlate every other column with `target`.
    ///
    /// Rows missing in either column are dropped pairwise. Columns that are
    /// not numeric or boolean are skipped. Scores are kept when
    /// `|score| > threshold` and returned ascending, ties in table order.
    pub fn compute(&self, table: &DataTable, target: &str) -> Result<CorrelationResult> {
        let profiler = ColumnProfiler::new();
        let method = &self.config.method;
        let threshold = self.config.threshold;

        let target_column = table.require_column(target)?;
        let target_type = profiler.column_type(target_column);
        if !is_correlatable(target_type) {
            return Err(EdaError::IncompatibleType {
                column: target.to_string(),
                dtype: target_type,
            });
        }
        let target_values = target_column.numeric_values();

        let mut entries = Vec::new();
        for column in table.columns() {
            if column.name == target {
                continue;
            }

            let dtype = profiler.column_type(column);
            if !is_correlatable(dtype) {
                debug!(
                    "Skipping column '{}' ({}) in {} correlation with '{}'",
                    column.name, dtype, method, target
                );
                continue;
            }

            let (x, y) = complete_pairs(&column.numeric_values(), &target_values);
            let score = method.score(&x, &y);

            // NaN fails both comparisons
            if score < -threshold || score > threshold {
                entries.push(CorrelationEntry {
                    variable: column.name.clone(),
                    score,
                });
            }
        }

        // Retained scores are never NaN; signed zeros compare equal
        entries.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        debug!(
            "{} correlation with '{}': {} columns above {}",
            method,
            target,
            entries.len(),
            threshold
        );

        Ok(CorrelationResult {
            target: target.to_string(),
            method: method.name().to_string(),
            threshold,
            entries,
        })
    }
}

/// Correlate every other column with `target` and keep scores beyond
/// `threshold`, ascending.
///
/// ```
/// use edakit::{correlation, Column, CorrelationMethod, DataTable};
///
/// let table = DataTable::from_columns([
///     Column::new("price", [1.0, 2.0, 3.0, 4.0, 5.0]),
///     Column::new("size", [1.1, 2.0, 2.9, 4.2, 5.0]),
///     Column::new("discount", [5.0, 4.0, 3.0, 2.0, 1.0]),
///     Column::new("noise", [3.1, 2.9, 3.0, 3.2, 2.8]),
/// ])
/// .unwrap();
///
/// let result = correlation(&table, "price", &CorrelationMethod::Pearson, 0.5).unwrap();
/// assert_eq!(result.variables(), vec!["discount", "size"]);
/// ```
pub fn correlation(
    table: &DataTable,
    target: &str,
    method: &CorrelationMethod,
    threshold: f64,
) -> Result<CorrelationResult> {
    CorrelationFilter::with_config(CorrelationConfig {
        method: method.clone(),
        threshold,
    })
    .compute(table, target)
}
