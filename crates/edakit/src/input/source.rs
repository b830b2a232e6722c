//! In-memory table abstraction.

use serde::Serialize;

use crate::error::{EdaError, Result};
use super::value::Value;

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name, unique within a table.
    pub name: String,
    /// Values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from anything convertible into values.
    pub fn new<V: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count missing values.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Iterate over non-missing values.
    pub fn present_values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Numeric view of every row (`None` where missing or non-numeric).
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Value::as_f64).collect()
    }
}

/// Rectangular, column-oriented table.
///
/// Column names are unique and every column has the same number of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: usize,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from columns, checking names and lengths.
    pub fn from_columns(columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Builder-style [`push_column`](Self::push_column).
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    /// Append a column.
    ///
    /// Fails when the name is already taken or the length differs from the
    /// table's row count.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(EdaError::InvalidArgument(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(EdaError::InvalidArgument(format!(
                "column '{}' has {} rows, table has {}",
                column.name,
                column.len(),
                self.rows
            )));
        }
        self.rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by name, or fail with `UnknownColumn`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| EdaError::UnknownColumn(name.to_string()))
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Table shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns() {
        let table = DataTable::from_columns([
            Column::new("age", [25, 30, 28]),
            Column::new("diagnosis", ["CD", "UC", "CD"]),
        ])
        .unwrap();

        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.column_names(), vec!["age", "diagnosis"]);
        assert_eq!(table.get(1, 1), Some(&Value::from("UC")));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let err = DataTable::new()
            .with_column(Column::new("a", [1, 2]))
            .and_then(|t| t.with_column(Column::new("a", [3, 4])))
            .unwrap_err();
        assert!(matches!(err, EdaError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_ragged_column() {
        let err = DataTable::from_columns([
            Column::new("a", [1, 2, 3]),
            Column::new("b", [1, 2]),
        ])
        .unwrap_err();
        assert!(matches!(err, EdaError::InvalidArgument(_)));
    }

    #[test]
    fn test_require_column() {
        let table = DataTable::from_columns([Column::new("a", [1])]).unwrap();
        assert!(table.require_column("a").is_ok());
        assert!(matches!(
            table.require_column("b"),
            Err(EdaError::UnknownColumn(name)) if name == "b"
        ));
    }

    #[test]
    fn test_missing_count() {
        let column = Column::new("x", [Some(1.0), None, Some(f64::NAN)]);
        assert_eq!(column.missing_count(), 2);
        assert_eq!(column.present_values().count(), 1);
    }
}
