//! Column and table profiles
//!
//! A profile is the read-only record of metric values computed by one
//! profiling run. Every metric is optional: `None` means the profiler did not
//! compute it, which evaluators must treat differently from a computed zero.

use crate::column_name::ColumnName;
use crate::config::SampleConfig;
use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use crate::value::MetricValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Metric values computed for a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    /// Column name
    pub name: ColumnName,

    /// Number of non-null values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_count: Option<u64>,

    /// Number of null values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_count: Option<u64>,

    /// Share of rows that are null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_proportion: Option<f64>,

    /// Number of distinct non-null values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_count: Option<u64>,

    /// Share of non-null values that are distinct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_proportion: Option<f64>,

    /// Number of values that appear exactly once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<u64>,

    /// Share of non-null values that appear exactly once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_proportion: Option<f64>,

    /// Number of non-null values that are not unique
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<u64>,

    /// Minimum value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<MetricValue>,

    /// Maximum value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<MetricValue>,

    /// Arithmetic mean
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    /// Sum of values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    /// Sample standard deviation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,

    /// Shortest text length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    /// Longest text length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl ColumnProfile {
    /// Create an empty profile for a column
    pub fn new(name: impl Into<ColumnName>) -> Self {
        Self {
            name: name.into(),
            values_count: None,
            null_count: None,
            null_proportion: None,
            distinct_count: None,
            distinct_proportion: None,
            unique_count: None,
            unique_proportion: None,
            duplicate_count: None,
            min: None,
            max: None,
            mean: None,
            sum: None,
            stddev: None,
            min_length: None,
            max_length: None,
        }
    }
}

/// Metric values computed for a table and its columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProfile {
    /// Table name
    pub name: TableName,

    /// When the profile was computed
    pub profile_date: DateTime<Utc>,

    /// Number of rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,

    /// Number of columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u64>,

    /// Sample the metrics were computed on; `None` for a full-table profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleConfig>,

    /// Per-column profiles
    #[serde(default)]
    pub columns: Vec<ColumnProfile>,
}

impl TableProfile {
    /// Create an empty table profile dated `profile_date`
    pub fn new(name: impl Into<TableName>, profile_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            profile_date,
            row_count: None,
            column_count: None,
            sample: None,
            columns: Vec::new(),
        }
    }

    /// True when the metrics cover a sample rather than every row
    pub fn is_sampled(&self) -> bool {
        self.sample.is_some()
    }

    /// Look up a column profile by name
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Profiles of every table in a run, keyed by table name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet {
    tables: BTreeMap<TableName, TableProfile>,
}

impl ProfileSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table profile
    pub fn insert(&mut self, profile: TableProfile) {
        self.tables.insert(profile.name.clone(), profile);
    }

    /// Look up a table profile
    pub fn get(&self, table: &str) -> Option<&TableProfile> {
        self.tables.get(table)
    }

    /// Iterate table profiles in name order
    pub fn iter(&self) -> impl Iterator<Item = &TableProfile> {
        self.tables.values()
    }

    /// Number of profiled tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no table has been profiled
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Load a profile set from a JSON file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ProfileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the profile set as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::IoWithPath {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl FromIterator<TableProfile> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = TableProfile>>(iter: I) -> Self {
        let mut set = ProfileSet::new();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
