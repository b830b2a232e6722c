//! Table-level profile.

use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;
use super::types::{SelectMode, SortKey};

/// Profiles for every column of a table together with the table shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of rows in the profiled table.
    pub rows: usize,
    /// Number of columns in the profiled table.
    pub columns: usize,
    /// One profile per column, ascending by unique count.
    pub profiles: Vec<ColumnProfile>,
}

impl TableProfile {
    /// Table shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Get a column profile by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Get all column names in profile order.
    pub fn column_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Names of columns whose unique count satisfies `mode` against `threshold`.
    pub fn select_columns(&self, threshold: usize, mode: SelectMode) -> Vec<&str> {
        select_columns(&self.profiles, threshold, mode)
    }

    /// Return a copy with profiles re-ordered by `key`.
    pub fn sorted_by(&self, key: SortKey) -> Self {
        let mut profiles = self.profiles.clone();
        sort_profiles(&mut profiles, key);
        Self {
            rows: self.rows,
            columns: self.columns,
            profiles,
        }
    }

    /// Serialize to pretty JSON for a display collaborator.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Names of profiled columns whose unique count satisfies `mode` against
/// `threshold`, in the same relative order as `profiles`.
pub fn select_columns(profiles: &[ColumnProfile], threshold: usize, mode: SelectMode) -> Vec<&str> {
    profiles
        .iter()
        .filter(|p| mode.matches(p.unique_count, threshold))
        .map(|p| p.name.as_str())
        .collect()
}

/// Stable, ascending sort of profiles by `key`.
pub fn sort_profiles(profiles: &mut [ColumnProfile], key: SortKey) {
    match key {
        SortKey::UniqueCount => profiles.sort_by_key(|p| p.unique_count),
        SortKey::MissingCount => profiles.sort_by_key(|p| p.missing_count),
        SortKey::Name => profiles.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Position => profiles.sort_by_key(|p| p.position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn profile(
        name: &str,
        position: usize,
        unique_count: usize,
        missing_count: usize,
    ) -> ColumnProfile {
        ColumnProfile {
            name: name.to_string(),
            position,
            dtype: ColumnType::Categorical,
            unique_count,
            missing_count,
            numeric_summary: None,
        }
    }

    fn table() -> TableProfile {
        TableProfile {
            rows: 10,
            columns: 4,
            profiles: vec![
                profile("flag", 2, 2, 0),
                profile("sex", 0, 2, 3),
                profile("city", 3, 5, 1),
                profile("id", 1, 10, 0),
            ],
        }
    }

    #[test]
    fn test_select_columns_keeps_profile_order() {
        let t = table();
        assert_eq!(t.select_columns(2, SelectMode::Equal), vec!["flag", "sex"]);
        assert_eq!(t.select_columns(5, SelectMode::LessThan), vec!["flag", "sex"]);
        assert_eq!(t.select_columns(2, SelectMode::GreaterThan), vec!["city", "id"]);
    }

    #[test]
    fn test_select_columns_empty_is_not_error() {
        let t = table();
        assert!(t.select_columns(0, SelectMode::LessThan).is_empty());
    }

    #[test]
    fn test_sorted_by_is_stable() {
        let t = table();
        let by_missing = t.sorted_by(SortKey::MissingCount);
        assert_eq!(by_missing.column_names(), vec!["flag", "id", "city", "sex"]);

        let by_position = t.sorted_by(SortKey::Position);
        assert_eq!(by_position.column_names(), vec!["sex", "id", "flag", "city"]);

        let by_name = t.sorted_by(SortKey::Name);
        assert_eq!(by_name.column_names(), vec!["city", "flag", "id", "sex"]);
    }

    #[test]
    fn test_to_json_omits_absent_summary() {
        let json = table().to_json().unwrap();
        assert!(json.contains("\"unique_count\": 2"));
        assert!(!json.contains("numeric_summary"));
    }
}
