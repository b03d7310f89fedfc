//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use pf_core::{Config, ProfileSet, TableName};
use pf_db::{Database, DuckDbBackend};
use pf_metrics::{DbQueryRunner, ProfileBuilder, ProfileSample, SampleMode};
use pf_sql::SqlDialect;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Loaded project: its directory and configuration
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

/// Load the project from the global CLI arguments, honoring `--config`.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project config")?;
    Ok(Project { root, config })
}

/// Open the configured database, or the `--target` override.
///
/// Relative paths are resolved against the project directory. Bare table
/// names resolve against the configured schema, both in introspection and,
/// through the search path, in queries.
pub(crate) async fn create_database_connection(
    project: &Project,
    target: Option<&str>,
) -> Result<Arc<dyn Database>> {
    let path = target.unwrap_or(&project.config.database.path);
    let resolved = if path == ":memory:" || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        project.root.join(path).display().to_string()
    };
    log::debug!(
        "Connecting to {} at {}",
        project.config.database.db_type,
        resolved
    );
    let schema = &project.config.schema;
    let backend = DuckDbBackend::new(&resolved)
        .context("Failed to connect to database")?
        .with_default_schema(schema.as_str());
    let db: Arc<dyn Database> = Arc::new(backend);

    if schema != "main" {
        db.execute_batch(&format!(
            "SET search_path = '{},main'",
            pf_core::sql_utils::escape_sql_string(schema)
        ))
        .await
        .context("Failed to set search_path")?;
    }
    Ok(db)
}

/// Split a comma-separated CLI list, dropping blanks
pub(crate) fn parse_list(value: Option<&str>) -> Option<Vec<String>> {
    value.map(|v| {
        v.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

/// Tables to profile: the CLI filter, else the configured list, else every
/// table in the configured schema.
pub(crate) async fn resolve_tables(
    db: &dyn Database,
    project: &Project,
    filter: Option<Vec<String>>,
) -> Result<Vec<String>> {
    if let Some(tables) = filter {
        return Ok(tables);
    }
    if !project.config.tables.is_empty() {
        return Ok(project.config.tables.clone());
    }
    db.list_tables(&project.config.schema)
        .await
        .with_context(|| format!("Failed to list tables in schema {}", project.config.schema))
}

/// Configured sample, if any
pub(crate) fn configured_sample(project: &Project) -> Option<ProfileSample> {
    project
        .config
        .profile_sample
        .as_ref()
        .and_then(ProfileSample::from_config)
}

/// Profile each table in turn
pub(crate) async fn build_profiles(
    db: &dyn Database,
    dialect: &dyn SqlDialect,
    tables: &[String],
    sample: Option<ProfileSample>,
    mode: SampleMode,
) -> Result<ProfileSet> {
    let mut profiles = ProfileSet::new();
    for table in tables {
        let runner =
            DbQueryRunner::new(db, dialect, TableName::new(table.as_str())).with_sample(sample);
        let profile = ProfileBuilder::new(&runner)
            .build(mode)
            .await
            .with_context(|| format!("Failed to profile table {}", table))?;
        profiles.insert(profile);
    }
    Ok(profiles)
}

/// Calculate column widths for a table given headers and row data.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);
    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", line(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        println!("{}", line(row.clone()));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
