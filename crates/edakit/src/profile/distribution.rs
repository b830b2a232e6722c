//! Plot-ready distributions: histograms and grouped value counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EdaError, Result};
use crate::input::{Column, DataTable};
use super::profiler::ColumnProfiler;

/// Equal-width histogram of a numeric column.
///
/// `edges` has one more entry than `counts`. Every bin is half-open except
/// the last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Column the values came from.
    pub column: String,
    /// Bin edges, ascending.
    pub edges: Vec<f64>,
    /// Count of values in each bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Width shared by every bin.
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => {
                (hi - lo) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin holding `value`, if it lies within the edges.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let (&lo, &hi) = (self.edges.first()?, self.edges.last()?);
        let bins = self.counts.len();
        if bins == 0 || !(lo..=hi).contains(&value) {
            return None;
        }

        let width = (hi - lo) / bins as f64;
        let mut idx = (((value - lo) / width) as usize).min(bins - 1);

        // Correct for rounding in the division
        if value < self.edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && value >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }

    /// Serialize to pretty JSON for a chart collaborator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Empty bins spanning `[lo, hi]`; a zero-width range is widened by 0.5
    /// on each side.
    fn with_range(column: &str, lo: f64, hi: f64, bins: usize) -> Self {
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
        let width = (hi - lo) / bins as f64;

        let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        Self {
            column: column.to_string(),
            edges,
            counts: vec![0; bins],
        }
    }

    fn add(&mut self, value: f64) {
        if let Some(idx) = self.bin_of(value) {
            self.counts[idx] += 1;
        }
    }
}

/// Counts of `column` levels split by the levels of a second `hue` column.
///
/// `counts[i][j]` is the number of rows with `levels[i]` and `hue_levels[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedCounts {
    pub column: String,
    pub hue: String,
    /// Levels of `column`, in first-appearance order.
    pub levels: Vec<String>,
    /// Levels of `hue`, in first-appearance order.
    pub hue_levels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl GroupedCounts {
    /// Count for one `(level, hue_level)` cell.
    pub fn get(&self, level: &str, hue_level: &str) -> Option<usize> {
        let i = self.levels.iter().position(|l| l == level)?;
        let j = self.hue_levels.iter().position(|h| h == hue_level)?;
        Some(self.counts[i][j])
    }

    /// Rows counted across every cell.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Serialize to pretty JSON for a chart collaborator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Finite numeric view of every row, or `IncompatibleType` when the column
/// is not numeric.
fn finite_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let dtype = ColumnProfiler::new().column_type(column);
    if !dtype.is_numeric() {
        return Err(EdaError::IncompatibleType {
            column: column.name.clone(),
            dtype,
        });
    }

    Ok(column
        .numeric_values()
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Range of the values, `(0, 1)` when there are none.
fn value_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi { (0.0, 1.0) } else { (lo, hi) }
}

fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        return Err(EdaError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }
    Ok(())
}

/// Histogram of a numeric column over its non-missing values.
///
/// Bins span the observed minimum to maximum. Infinite values are left out.
///
/// ```
/// use edakit::{histogram, Column, DataTable};
///
/// let table = DataTable::from_columns([
///     Column::new("age", [Some(20.0), None, Some(25.0), Some(40.0), Some(30.0)]),
/// ])
/// .unwrap();
///
/// let hist = histogram(&table, "age", 2).unwrap();
/// assert_eq!(hist.edges, vec![20.0, 30.0, 40.0]);
/// assert_eq!(hist.counts, vec![2, 2]);
/// ```
pub fn histogram(table: &DataTable, column: &str, bins: usize) -> Result<Histogram> {
    check_bins(bins)?;
    let values: Vec<f64> = finite_values(table.require_column(column)?)?
        .into_iter()
        .flatten()
        .collect();

    let (lo, hi) = value_range(values.iter());
    let mut hist = Histogram::with_range(column, lo, hi, bins);
    for v in values {
        hist.add(v);
    }

    debug!(
        "Histogram of '{}': {} values in {} bins",
        column,
        hist.total(),
        bins
    );
    Ok(hist)
}

/// One histogram per level of `hue`, all sharing the same edges.
///
/// Rows missing in either column are dropped. Hue levels keep
/// first-appearance order.
pub fn histogram_by(
    table: &DataTable,
    column: &str,
    hue: &str,
    bins: usize,
) -> Result<Vec<(String, Histogram)>> {
    check_bins(bins)?;
    let values = finite_values(table.require_column(column)?)?;
    let hue_column = table.require_column(hue)?;

    let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (value, level) in values.into_iter().zip(&hue_column.values) {
        if let Some(v) = value.filter(|_| !level.is_missing()) {
            groups.entry(level.to_string()).or_default().push(v);
        }
    }

    let (lo, hi) = value_range(groups.values().flatten());
    let empty = Histogram::with_range(column, lo, hi, bins);

    debug!(
        "Histograms of '{}' by '{}': {} levels in {} bins",
        column,
        hue,
        groups.len(),
        bins
    );

    Ok(groups
        .into_iter()
        .map(|(level, vs)| {
            let mut hist = empty.clone();
            for v in vs {
                hist.add(v);
            }
            (level, hist)
        })
        .collect())
}

/// Counts of each `column` value split by the value of `hue`.
///
/// Rows missing in either column are dropped. Values are rendered with
/// [`Value`](crate::Value)'s `Display`, as in [`value_counts`](crate::value_counts).
/// When `hue` names `column` itself only the diagonal is filled.
pub fn value_counts_by(table: &DataTable, column: &str, hue: &str) -> Result<GroupedCounts> {
    let values = table.require_column(column)?;
    let hues = table.require_column(hue)?;

    let mut levels: IndexMap<String, usize> = IndexMap::new();
    let mut hue_levels: IndexMap<String, usize> = IndexMap::new();
    let mut cells: Vec<(usize, usize)> = Vec::new();

    for (value, level) in values.values.iter().zip(&hues.values) {
        if value.is_missing() || level.is_missing() {
            continue;
        }
        let next = levels.len();
        let i = *levels.entry(value.to_string()).or_insert(next);
        let next = hue_levels.len();
        let j = *hue_levels.entry(level.to_string()).or_insert(next);
        cells.push((i, j));
    }

    let mut counts = vec![vec![0; hue_levels.len()]; levels.len()];
    for (i, j) in cells {
        counts[i][j] += 1;
    }

    Ok(GroupedCounts {
        column: column.to_string(),
        hue: hue.to_string(),
        levels: levels.into_keys().collect(),
        hue_levels: hue_levels.into_keys().collect(),
        counts,
    })
}
