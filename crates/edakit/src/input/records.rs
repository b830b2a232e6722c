//! Typed tables from in-memory string records.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{EdaError, Result};
use super::source::{Column, DataTable};
use super::value::Value;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Date shapes compiled once on first use, each with the chrono formats tried
// when the shape matches.

static DATE_PATTERNS: Lazy<Vec<(Regex, &'static [&'static str])>> = Lazy::new(|| {
    [
        (
            r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2})?$",
            &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"][..],
        ),
        (r"^\d{4}-\d{2}-\d{2}$", &["%Y-%m-%d"][..]), // ISO date
        (r"^\d{4}/\d{2}/\d{2}$", &["%Y/%m/%d"][..]), // Alt ISO
        (r"^\d{2}/\d{2}/\d{4}$", &["%m/%d/%Y"][..]), // US date
        (r"^\d{2}-\d{2}-\d{4}$", &["%d-%m-%Y"][..]), // European date
    ]
    .into_iter()
    .filter_map(|(pattern, formats)| Regex::new(pattern).ok().map(|re| (re, formats)))
    .collect()
});

impl DataTable {
    /// Build a typed table from string records the caller already holds.
    ///
    /// Rows shorter than the header are padded with missing values and
    /// longer rows are truncated. Each cell is typed independently with
    /// [`parse_value`].
    pub fn from_records<H, R, S>(
        headers: impl IntoIterator<Item = H>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        H: Into<String>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); width];

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                let value = cells
                    .next()
                    .map(|cell| parse_value(cell.as_ref()))
                    .unwrap_or(Value::Null);
                column.push(value);
            }
        }

        if headers.is_empty() {
            return Ok(DataTable::new());
        }

        DataTable::from_columns(
            headers
                .into_iter()
                .zip(columns)
                .map(|(name, values)| Column { name, values }),
        )
        .map_err(|e| match e {
            EdaError::InvalidArgument(msg) => {
                EdaError::InvalidArgument(format!("bad header: {}", msg))
            }
            other => other,
        })
    }

    /// Check if a raw cell represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

/// Type a single raw cell.
///
/// Checked in order: missing tokens, boolean words, integers, floats,
/// dates, and finally plain strings.
pub fn parse_value(raw: &str) -> Value {
    if DataTable::is_null_value(raw) {
        return Value::Null;
    }

    let trimmed = raw.trim();

    match trimmed.to_lowercase().as_str() {
        "true" | "yes" => return Value::Bool(true),
        "false" | "no" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Int(v);
    }

    if let Ok(v) = trimmed.parse::<f64>() {
        return Value::Float(v);
    }

    if let Some(dt) = parse_date(trimmed) {
        return Value::DateTime(dt);
    }

    Value::Str(trimmed.to_string())
}

/// Parse a date or date-time in one of the recognized shapes.
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let (_, formats) = DATE_PATTERNS.iter().find(|(re, _)| re.is_match(value))?;

    formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt).ok().or_else(|| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
    })
}
