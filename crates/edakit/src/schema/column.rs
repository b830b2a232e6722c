//! Per-column profile and numeric summary.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Descriptive statistics for a numeric column (non-missing values only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1`); `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Calculate the z-score for a value, or `None` when the spread is
    /// undefined or zero.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        match self.std {
            Some(std) if std > 0.0 => Some((value - self.mean) / std),
            _ => None,
        }
    }
}

/// Profile of a single table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the input table.
    pub position: usize,
    /// Semantic data type.
    pub dtype: ColumnType,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Descriptive statistics, for numeric columns only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub numeric_summary: Option<NumericSummary>,
}

impl ColumnProfile {
    /// Get the missing percentage relative to `row_count`.
    pub fn missing_percentage(&self, row_count: usize) -> f64 {
        if row_count == 0 {
            0.0
        } else {
            (self.missing_count as f64 / row_count as f64) * 100.0
        }
    }

    /// Whether every non-missing value is the same.
    pub fn is_constant(&self) -> bool {
        self.unique_count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(std: Option<f64>) -> NumericSummary {
        NumericSummary {
            count: 4,
            mean: 2.5,
            std,
            min: 1.0,
            q1: 1.75,
            median: 2.5,
            q3: 3.25,
            max: 4.0,
        }
    }

    #[test]
    fn test_iqr() {
        assert!((summary(Some(1.0)).iqr() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_z_score_undefined_without_spread() {
        assert_eq!(summary(None).z_score(3.0), None);
        assert_eq!(summary(Some(0.0)).z_score(3.0), None);
        assert_eq!(summary(Some(0.5)).z_score(3.0), Some(1.0));
    }

    #[test]
    fn test_missing_percentage() {
        let profile = ColumnProfile {
            name: "age".to_string(),
            position: 0,
            dtype: ColumnType::Integer,
            unique_count: 3,
            missing_count: 1,
            numeric_summary: None,
        };
        assert_eq!(profile.missing_percentage(4), 25.0);
        assert_eq!(profile.missing_percentage(0), 0.0);
    }
}
