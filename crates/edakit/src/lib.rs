//! edakit: column profiling and correlation filtering for exploratory data
//! analysis of in-memory tables.
//!
//! The crate computes data for an analyst inspecting a table before
//! modeling. Rendering is left to callers; every output is a plain value
//! that serializes with serde.
//!
//! # Core Principles
//!
//! - **Read-only**: Input tables are never modified
//! - **Pure**: Every call is a deterministic function of its inputs
//! - **Explicit**: Empty results are valid values, failures are typed errors
//!
//! # Example
//!
//! ```
//! use edakit::{
//!     correlation, profile, select_columns, Column, CorrelationMethod, DataTable, SelectMode,
//! };
//!
//! let table = DataTable::from_columns([
//!     Column::new("age", [34, 51, 29, 62, 45]),
//!     Column::new("bmi", [22.1, 27.9, 21.4, 30.2, 26.0]),
//!     Column::new("sex", ["F", "M", "F", "M", "F"]),
//! ])
//! .unwrap();
//!
//! let profiles = profile(&table);
//! assert_eq!(select_columns(&profiles, 3, SelectMode::LessThan), vec!["sex"]);
//!
//! let ranked = correlation(&table, "age", &CorrelationMethod::Pearson, 0.5).unwrap();
//! assert_eq!(ranked.variables(), vec!["bmi"]);
//! ```

pub mod correlation;
pub mod error;
pub mod input;
pub mod profile;
pub mod schema;

pub use correlation::{
    CorrelationConfig, CorrelationEntry, CorrelationFilter, CorrelationMatrix, CorrelationMethod,
    CorrelationResult, correlation, correlation_matrix,
};
pub use error::{EdaError, Result};
pub use input::{Column, DataTable, Value};
pub use profile::{
    ColumnProfiler, GroupedCounts, Histogram, ProfilerConfig, histogram, histogram_by, profile,
    profile_table, value_counts, value_counts_by,
};
pub use schema::{
    ColumnProfile, ColumnType, NumericSummary, SelectMode, SortKey, TableProfile, select_columns,
    sort_profiles,
};
