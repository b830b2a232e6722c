//! Column profiling engine.

mod distribution;
mod profiler;
mod stats;

pub use distribution::{GroupedCounts, Histogram, histogram, histogram_by, value_counts_by};
pub use profiler::{ColumnProfiler, ProfilerConfig, profile, profile_table, value_counts};
