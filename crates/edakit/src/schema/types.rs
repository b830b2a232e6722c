//! Core type definitions for column profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EdaError;

/// Semantic data type of a column, determined from its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers only.
    Integer,
    /// Numbers with at least one floating-point value.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Low-cardinality string values.
    Categorical,
    /// High-cardinality string values.
    Text,
    /// Date and/or time values.
    DateTime,
    /// More than one kind of value in the same column.
    Mixed,
    /// No non-missing values to decide from.
    Unknown,
}

impl ColumnType {
    /// Returns true if this type gets a numeric summary.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if values of this type can be correlated.
    ///
    /// Booleans take part in correlation as 0/1 but are not summarized.
    pub fn is_numeric_compatible(&self) -> bool {
        self.is_numeric() || *self == ColumnType::Boolean
    }

    /// Returns true if this type holds string values.
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::Categorical | ColumnType::Text)
    }

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
            ColumnType::DateTime => "date_time",
            ColumnType::Mixed => "mixed",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator used when selecting columns by unique-value count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// `unique_count < threshold`
    LessThan,
    /// `unique_count == threshold`
    Equal,
    /// `unique_count > threshold`
    GreaterThan,
}

impl SelectMode {
    /// Check whether a unique count satisfies this comparator.
    pub fn matches(&self, unique_count: usize, threshold: usize) -> bool {
        match self {
            SelectMode::LessThan => unique_count < threshold,
            SelectMode::Equal => unique_count == threshold,
            SelectMode::GreaterThan => unique_count > threshold,
        }
    }
}

impl Default for SelectMode {
    fn default() -> Self {
        SelectMode::Equal
    }
}

impl FromStr for SelectMode {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "less_than" | "less" | "lt" => Ok(SelectMode::LessThan),
            "equal" | "eq" => Ok(SelectMode::Equal),
            "greater_than" | "greater" | "more" | "gt" => Ok(SelectMode::GreaterThan),
            _ => Err(EdaError::InvalidArgument(format!(
                "mode must be one of: less_than, equal, greater_than (got '{}')",
                s
            ))),
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectMode::LessThan => write!(f, "less_than"),
            SelectMode::Equal => write!(f, "equal"),
            SelectMode::GreaterThan => write!(f, "greater_than"),
        }
    }
}

/// Field a profile table can be re-sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    UniqueCount,
    MissingCount,
    Name,
    /// Original column order.
    Position,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::UniqueCount
    }
}

impl FromStr for SortKey {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unique_count" | "nunique" => Ok(SortKey::UniqueCount),
            "missing_count" | "nans" => Ok(SortKey::MissingCount),
            "name" | "index" => Ok(SortKey::Name),
            "position" => Ok(SortKey::Position),
            _ => Err(EdaError::InvalidArgument(format!(
                "sort key must be one of: unique_count, missing_count, name, position (got '{}')",
                s
            ))),
        }
    }
}
