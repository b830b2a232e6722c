//! Correlation engine: target ranking and pairwise matrices.

mod filter;
mod matrix;
mod method;

pub use filter::{
    CorrelationConfig, CorrelationEntry, CorrelationFilter, CorrelationResult, correlation,
};
pub use matrix::{CorrelationMatrix, correlation_matrix};
pub use method::{CorrelationMethod, ScoreFn};

use crate::schema::ColumnType;

/// Whether a column of this type takes part in correlation.
///
/// Numeric and boolean columns do; columns without any values are kept so
/// they surface as undefined scores rather than disappearing.
fn is_correlatable(dtype: ColumnType) -> bool {
    dtype.is_numeric_compatible() || dtype == ColumnType::Unknown
}

/// Keep rows where both samples are present.
fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}
