//! Column profiling: type, cardinality, missingness and numeric summary.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::input::{Column, DataTable, Value};
use crate::schema::{ColumnProfile, ColumnType, TableProfile};
use super::stats::StreamingStats;

/// Configuration for column profiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Maximum unique values for a string column to count as categorical.
    pub categorical_threshold: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            categorical_threshold: 20,
        }
    }
}

/// Hashable identity of a non-missing value, used for distinct counting.
///
/// Whole floats share a key with the equal integer so `1` and `1.0` count
/// once.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
    DateTime(NaiveDateTime),
}

impl<'a> ValueKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int(v) => Some(ValueKey::Int(*v)),
            Value::Float(v) if v.is_nan() => None,
            Value::Float(v) => {
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 {
                    Some(ValueKey::Int(*v as i64))
                } else {
                    Some(ValueKey::Float(v.to_bits()))
                }
            }
            Value::Bool(v) => Some(ValueKey::Bool(*v)),
            Value::Str(s) => Some(ValueKey::Str(s)),
            Value::DateTime(dt) => Some(ValueKey::DateTime(*dt)),
        }
    }
}

/// Kinds of non-missing values observed in a column.
#[derive(Debug, Default)]
struct KindsSeen {
    int: bool,
    float: bool,
    boolean: bool,
    string: bool,
    datetime: bool,
}

impl KindsSeen {
    fn observe(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::Int(_) => self.int = true,
            Value::Float(v) => {
                if !v.is_nan() {
                    self.float = true;
                }
            }
            Value::Bool(_) => self.boolean = true,
            Value::Str(_) => self.string = true,
            Value::DateTime(_) => self.datetime = true,
        }
    }

    fn non_numeric_kinds(&self) -> usize {
        [self.boolean, self.string, self.datetime]
            .iter()
            .filter(|seen| **seen)
            .count()
    }
}

/// One pass over a column: value kinds, distinct and missing counts.
struct ColumnScan {
    kinds: KindsSeen,
    unique_count: usize,
    missing_count: usize,
}

impl ColumnScan {
    fn of(column: &Column) -> Self {
        let mut kinds = KindsSeen::default();
        let mut distinct: HashSet<ValueKey<'_>> = HashSet::new();
        let mut missing_count = 0;

        for value in &column.values {
            match ValueKey::of(value) {
                Some(key) => {
                    kinds.observe(value);
                    distinct.insert(key);
                }
                None => missing_count += 1,
            }
        }

        Self {
            kinds,
            unique_count: distinct.len(),
            missing_count,
        }
    }
}

/// Builds column profiles for a table.
#[derive(Debug, Clone, Default)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
}

impl ColumnProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile every column, ascending by unique count.
    ///
    /// Columns with equal unique counts keep their table order.
    pub fn profile(&self, table: &DataTable) -> Vec<ColumnProfile> {
        debug!(
            "Profiling table: {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );

        let mut profiles: Vec<ColumnProfile> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| self.profile_column(position, column))
            .collect();

        profiles.sort_by_key(|p| p.unique_count);

        debug!(
            "Profiled {} columns, {} numeric",
            profiles.len(),
            profiles.iter().filter(|p| p.dtype.is_numeric()).count()
        );
        profiles
    }

    /// Profile every column and keep the table shape alongside.
    pub fn profile_table(&self, table: &DataTable) -> TableProfile {
        TableProfile {
            rows: table.row_count(),
            columns: table.column_count(),
            profiles: self.profile(table),
        }
    }

    /// Profile a single column found at `position` in its table.
    pub fn profile_column(&self, position: usize, column: &Column) -> ColumnProfile {
        let scan = ColumnScan::of(column);
        let unique_count = scan.unique_count;
        let missing_count = scan.missing_count;
        let dtype = self.infer_type(&scan.kinds, unique_count);

        let numeric_summary = if dtype.is_numeric() {
            column
                .values
                .iter()
                .filter_map(Value::as_f64)
                .collect::<StreamingStats>()
                .into_summary()
        } else {
            None
        };

        ColumnProfile {
            name: column.name.clone(),
            position,
            dtype,
            unique_count,
            missing_count,
            numeric_summary,
        }
    }

    /// Determine the type of a column without computing its summary.
    pub fn column_type(&self, column: &Column) -> ColumnType {
        let scan = ColumnScan::of(column);
        self.infer_type(&scan.kinds, scan.unique_count)
    }

    /// Decide the column type from the kinds of values present.
    fn infer_type(&self, kinds: &KindsSeen, unique_count: usize) -> ColumnType {
        let numeric = kinds.int || kinds.float;

        match (numeric, kinds.non_numeric_kinds()) {
            (false, 0) => ColumnType::Unknown,
            (true, 0) if kinds.float => ColumnType::Float,
            (true, 0) => ColumnType::Integer,
            (false, 1) if kinds.boolean => ColumnType::Boolean,
            (false, 1) if kinds.datetime => ColumnType::DateTime,
            (false, 1) => {
                if unique_count <= self.config.categorical_threshold {
                    ColumnType::Categorical
                } else {
                    ColumnType::Text
                }
            }
            _ => ColumnType::Mixed,
        }
    }
}

/// Profile every column with the default configuration.
///
/// ```
/// use edakit::{profile, Column, DataTable};
///
/// let table = DataTable::from_columns([
///     Column::new("age", [Some(25), None, Some(31), Some(25)]),
///     Column::new("smoker", [true, false, false, true]),
/// ])
/// .unwrap();
///
/// let profiles = profile(&table);
/// assert_eq!(profiles[0].name, "age");
/// assert_eq!(profiles[0].unique_count, 2);
/// assert_eq!(profiles[0].missing_count, 1);
/// assert!(profiles[0].numeric_summary.is_some());
/// assert!(profiles[1].numeric_summary.is_none());
/// ```
pub fn profile(table: &DataTable) -> Vec<ColumnProfile> {
    ColumnProfiler::new().profile(table)
}

/// Profile every column with the default configuration, keeping the shape.
pub fn profile_table(table: &DataTable) -> TableProfile {
    ColumnProfiler::new().profile_table(table)
}

/// Frequency of each distinct non-missing value in `column`.
///
/// Ordered by count descending; ties keep first-appearance order. Values are
/// rendered with [`Value`]'s `Display`, so `1` and `1.0` stay separate
/// labels.
pub fn value_counts(table: &DataTable, column: &str) -> Result<Vec<(String, usize)>> {
    let column = table.require_column(column)?;

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in column.present_values() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdaError;

    fn make_table(columns: Vec<Column>) -> DataTable {
        DataTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_infer_integer_type() {
        let table = make_table(vec![Column::new("count", [1, 2, 3, 100])]);
        let profiles = profile(&table);

        assert_eq!(profiles[0].dtype, ColumnType::Integer);
    }

    #[test]
    fn test_infer_float_type() {
        let table = make_table(vec![Column::new(
            "value",
            [Value::Int(1), Value::Float(2.7), Value::Float(3.14)],
        )]);
        let profiles = profile(&table);

        assert_eq!(profiles[0].dtype, ColumnType::Float);
        assert_eq!(profiles[0].numeric_summary.as_ref().unwrap().count, 3);
    }

    #[test]
    fn test_detect_categorical_and_text() {
        let table = make_table(vec![Column::new("category", ["A", "B", "A", "C", "B"])]);

        let default = ColumnProfiler::new().profile(&table);
        assert_eq!(default[0].dtype, ColumnType::Categorical);

        let strict = ColumnProfiler::with_config(ProfilerConfig {
            categorical_threshold: 2,
        })
        .profile(&table);
        assert_eq!(strict[0].dtype, ColumnType::Text);
        assert!(strict[0].numeric_summary.is_none());
    }

    #[test]
    fn test_mixed_and_unknown_types() {
        let table = make_table(vec![
            Column::new("mixed", [Value::Int(1), Value::from("one")]),
            Column::new("empty", [Value::Null, Value::Float(f64::NAN)]),
        ]);
        let profiles = profile(&table);

        let empty = profiles.iter().find(|p| p.name == "empty").unwrap();
        assert_eq!(empty.dtype, ColumnType::Unknown);
        assert_eq!(empty.unique_count, 0);
        assert_eq!(empty.missing_count, 2);

        let mixed = profiles.iter().find(|p| p.name == "mixed").unwrap();
        assert_eq!(mixed.dtype, ColumnType::Mixed);
        assert!(mixed.numeric_summary.is_none());
    }

    #[test]
    fn test_detect_missing() {
        let table = make_table(vec![Column::new(
            "value",
            [Some(1.0), None, Some(3.0), Some(f64::NAN), Some(5.0)],
        )]);
        let profiles = profile(&table);

        assert_eq!(profiles[0].missing_count, 2);
        assert_eq!(profiles[0].unique_count, 3);
        assert_eq!(profiles[0].numeric_summary.as_ref().unwrap().count, 3);
    }

    #[test]
    fn test_whole_floats_match_integers() {
        let table = make_table(vec![Column::new(
            "x",
            [Value::Int(1), Value::Float(1.0), Value::Float(1.5)],
        )]);
        assert_eq!(profile(&table)[0].unique_count, 2);
    }

    #[test]
    fn test_sorted_by_unique_count_stable() {
        let table = make_table(vec![
            Column::new("id", [1, 2, 3, 4]),
            Column::new("sex", ["F", "M", "F", "M"]),
            Column::new("smoker", [true, false, true, false]),
            Column::new("site", ["a", "a", "a", "a"]),
        ]);
        let names: Vec<String> = profile(&table).into_iter().map(|p| p.name).collect();

        assert_eq!(names, vec!["site", "sex", "smoker", "id"]);
    }

    #[test]
    fn test_profile_keeps_position() {
        let table = make_table(vec![
            Column::new("a", [1, 2]),
            Column::new("b", [1, 1]),
        ]);
        let profiles = profile(&table);

        assert_eq!(profiles[0].name, "b");
        assert_eq!(profiles[0].position, 1);
        assert_eq!(profiles[1].position, 0);
    }

    #[test]
    fn test_empty_table() {
        assert!(profile(&DataTable::new()).is_empty());

        let no_rows = make_table(vec![Column::new("x", Vec::<f64>::new())]);
        let profiles = profile(&no_rows);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].dtype, ColumnType::Unknown);
        assert_eq!(profiles[0].missing_count, 0);
    }

    #[test]
    fn test_profile_table_shape() {
        let table = make_table(vec![
            Column::new("a", [1, 2, 3]),
            Column::new("b", ["x", "y", "z"]),
        ]);
        let report = profile_table(&table);

        assert_eq!(report.shape(), (3, 2));
        assert_eq!(report.profiles.len(), 2);
    }

    #[test]
    fn test_value_counts() {
        let table = make_table(vec![Column::new(
            "diagnosis",
            [Some("UC"), Some("CD"), None, Some("CD"), Some("IBD"), Some("UC")],
        )]);
        let counts = value_counts(&table, "diagnosis").unwrap();

        assert_eq!(
            counts,
            vec![
                ("UC".to_string(), 2),
                ("CD".to_string(), 2),
                ("IBD".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_unknown_column() {
        let table = make_table(vec![Column::new("a", [1])]);
        assert!(matches!(
            value_counts(&table, "b"),
            Err(EdaError::UnknownColumn(_))
        ));
    }
}
