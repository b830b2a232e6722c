//! Profile types describing the columns of a table.

mod column;
mod table;
mod types;

pub use column::{ColumnProfile, NumericSummary};
pub use table::{TableProfile, select_columns, sort_profiles};
pub use types::{ColumnType, SelectMode, SortKey};
