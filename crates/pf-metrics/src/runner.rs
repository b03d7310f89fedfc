//! Executing metric expressions against one table

use crate::error::{RunnerError, RunnerResult};
use crate::metric::BoundMetric;
use async_trait::async_trait;
use pf_core::{ColumnName, MetricValue, TableName};
use pf_db::{ColumnInfo, Database, DbError, QueryRows};
use pf_sql::{NamedExpression, ProfileSample, SqlDialect, SqlError};
use std::collections::BTreeMap;

/// One result row keyed by output name
pub type MetricRow = BTreeMap<String, MetricValue>;

/// Whether a query reads the whole table or the configured sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Every row
    #[default]
    Full,
    /// The configured sample; the whole table when none is configured
    Sample,
}

/// Computes metrics against one table
///
/// Sampled results are repeatable within a run but callers must not rely on
/// them being identical across runs.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    /// Table this runner is bound to
    fn table(&self) -> &TableName;

    /// Run aggregate expressions and return the single result row.
    ///
    /// Zero result rows yield an empty map.
    async fn run(&self, exprs: &[NamedExpression], mode: SampleMode) -> RunnerResult<MetricRow>;

    /// Run expressions per distinct value of `group_by`; the group key is
    /// stored under `"value"`.
    async fn run_grouped(
        &self,
        exprs: &[NamedExpression],
        group_by: &ColumnName,
        mode: SampleMode,
    ) -> RunnerResult<Vec<MetricRow>>;

    /// Live column metadata
    async fn columns(&self) -> RunnerResult<Vec<ColumnInfo>>;

    /// Sample used for [`SampleMode::Sample`] queries, if any
    fn sample(&self) -> Option<&ProfileSample> {
        None
    }

    /// Find a column by name, falling back to a case-insensitive match
    async fn resolve_column(&self, name: &str) -> RunnerResult<ColumnInfo> {
        let columns = self.columns().await?;
        let found = columns
            .iter()
            .position(|c| c.name == name)
            .or_else(|| {
                columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
            });
        match found {
            Some(idx) => Ok(columns[idx].clone()),
            None => Err(RunnerError::ColumnNotFound {
                table: self.table().to_string(),
                column: name.to_string(),
            }),
        }
    }

    /// First row of `exprs` over the whole table
    async fn select_first_from_table(&self, exprs: &[NamedExpression]) -> RunnerResult<MetricRow> {
        self.run(exprs, SampleMode::Full).await
    }

    /// First row of `exprs` over the sample
    async fn select_first_from_sample(
        &self,
        exprs: &[NamedExpression],
    ) -> RunnerResult<MetricRow> {
        self.run(exprs, SampleMode::Sample).await
    }

    /// Compute a single bound metric; `Null` when the query returned no row
    async fn compute(
        &self,
        metric: &BoundMetric,
        column: Option<&ColumnName>,
        mode: SampleMode,
    ) -> RunnerResult<MetricValue> {
        let named = metric.to_expression(column)?;
        let mut row = self.run(std::slice::from_ref(&named), mode).await?;
        Ok(row.remove(&named.name).unwrap_or_default())
    }
}

/// [`QueryRunner`] backed by a [`Database`]
pub struct DbQueryRunner<'a> {
    db: &'a dyn Database,
    dialect: &'a dyn SqlDialect,
    table: TableName,
    sample: Option<ProfileSample>,
}

impl<'a> DbQueryRunner<'a> {
    /// Bind a runner to `table`
    pub fn new(db: &'a dyn Database, dialect: &'a dyn SqlDialect, table: TableName) -> Self {
        Self {
            db,
            dialect,
            table,
            sample: None,
        }
    }

    /// Use `sample` for [`SampleMode::Sample`] queries
    pub fn with_sample(mut self, sample: Option<ProfileSample>) -> Self {
        self.sample = sample;
        self
    }

    fn sample_for(&self, mode: SampleMode) -> Option<&ProfileSample> {
        match mode {
            SampleMode::Full => None,
            SampleMode::Sample => self.sample.as_ref(),
        }
    }

    fn invalid(&self, source: SqlError) -> RunnerError {
        RunnerError::InvalidExpression {
            table: self.table.to_string(),
            source,
        }
    }

    fn failed(&self, source: DbError) -> RunnerError {
        RunnerError::QueryExecution {
            table: self.table.to_string(),
            source,
        }
    }

    async fn query(&self, sql: &str) -> RunnerResult<QueryRows> {
        log::debug!("Running metric query on {}: {}", self.table, sql);
        self.db.query_rows(sql).await.map_err(|e| self.failed(e))
    }
}

fn to_metric_rows(result: QueryRows) -> Vec<MetricRow> {
    let QueryRows { columns, rows } = result;
    rows.into_iter()
        .map(|row| columns.iter().cloned().zip(row).collect())
        .collect()
}

#[async_trait]
impl QueryRunner for DbQueryRunner<'_> {
    fn table(&self) -> &TableName {
        &self.table
    }

    fn sample(&self) -> Option<&ProfileSample> {
        self.sample.as_ref()
    }

    async fn run(&self, exprs: &[NamedExpression], mode: SampleMode) -> RunnerResult<MetricRow> {
        let sql = self
            .dialect
            .render_select(&self.table, exprs, self.sample_for(mode))
            .map_err(|e| self.invalid(e))?;
        let rows = to_metric_rows(self.query(&sql).await?);
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn run_grouped(
        &self,
        exprs: &[NamedExpression],
        group_by: &ColumnName,
        mode: SampleMode,
    ) -> RunnerResult<Vec<MetricRow>> {
        let sql = self
            .dialect
            .render_grouped_select(&self.table, group_by, exprs, self.sample_for(mode))
            .map_err(|e| self.invalid(e))?;
        Ok(to_metric_rows(self.query(&sql).await?))
    }

    async fn columns(&self) -> RunnerResult<Vec<ColumnInfo>> {
        let columns = self
            .db
            .table_columns(&self.table)
            .await
            .map_err(|e| self.failed(e))?;
        if columns.is_empty() {
            let exists = self
                .db
                .relation_exists(&self.table)
                .await
                .map_err(|e| self.failed(e))?;
            if !exists {
                return Err(self.failed(DbError::TableNotFound(self.table.to_string())));
            }
        }
        Ok(columns)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
