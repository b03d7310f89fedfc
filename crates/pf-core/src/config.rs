//! Configuration types and parsing for profiler.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from profiler.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// SQL dialect used to render metric queries
    #[serde(default)]
    pub dialect: Dialect,

    /// Schema holding the profiled tables
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Tables to profile (empty = every table in the schema)
    #[serde(default)]
    pub tables: Vec<String>,

    /// Sampling used for sampled metric queries
    #[serde(default)]
    pub profile_sample: Option<SampleConfig>,

    /// Test suite file, relative to the project directory
    #[serde(default = "default_test_suite")]
    pub test_suite: String,

    /// Where `pf profile` writes computed profiles
    #[serde(default = "default_profile_output")]
    pub profile_output: String,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file-based DuckDB or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// PostgreSQL dialect
    Postgres,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}

/// Sampling configuration: either a percentage or a fixed number of rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleConfig {
    /// Percentage of rows to sample, in (0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,

    /// Number of rows to sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,

    /// Seed making the sample repeatable within a run
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl SampleConfig {
    fn validate(&self) -> CoreResult<()> {
        match (self.percent, self.rows) {
            (Some(_), Some(_)) => Err(CoreError::ConfigInvalid {
                message: "profile_sample takes either percent or rows, not both".to_string(),
            }),
            (None, None) => Err(CoreError::ConfigInvalid {
                message: "profile_sample needs percent or rows".to_string(),
            }),
            (Some(p), None) if !(p > 0.0 && p <= 100.0) => Err(CoreError::ConfigInvalid {
                message: format!("profile_sample.percent must be in (0, 100], got {}", p),
            }),
            (None, Some(0)) => Err(CoreError::ConfigInvalid {
                message: "profile_sample.rows must be greater than 0".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn default_schema() -> String {
    "main".to_string()
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

fn default_test_suite() -> String {
    "tests.yml".to_string()
}

fn default_profile_output() -> String {
    "target/profiles.json".to_string()
}

fn default_seed() -> u64 {
    42
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for profiler.yml or profiler.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("profiler.yml");
        let yaml_path = dir.join("profiler.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }
        if self.tables.iter().any(|t| t.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "tables must not contain empty names".to_string(),
            });
        }
        if let Some(sample) = &self.profile_sample {
            sample.validate()?;
        }
        Ok(())
    }

    /// Test suite path resolved against the project directory
    pub fn test_suite_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.test_suite)
    }

    /// Profile output path resolved against the project directory
    pub fn profile_output_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.profile_output)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
