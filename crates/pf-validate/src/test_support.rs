//! Fixtures shared by the evaluator and dispatcher tests

use crate::diagnostics::Diagnostics;
use crate::evaluator::EvalContext;
use crate::provider::RunnerProvider;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pf_core::{ColumnName, ColumnProfile, MetricValue, SampleConfig, TableName, TableProfile};
use pf_db::{ColumnInfo, DbError};
use pf_metrics::{MetricRow, NamedExpression, QueryRunner, RunnerError, RunnerResult, SampleMode};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub(crate) fn execution_date() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub(crate) fn context<'a>(
    runner: Option<&'a dyn QueryRunner>,
    diagnostics: &'a dyn Diagnostics,
) -> EvalContext<'a> {
    EvalContext {
        execution_date: execution_date(),
        runner,
        diagnostics,
    }
}

/// `orders` profile with the given column profiles
pub(crate) fn orders_profile(columns: Vec<ColumnProfile>) -> TableProfile {
    let mut profile = TableProfile::new("orders", execution_date());
    profile.row_count = Some(100);
    profile.column_count = Some(2);
    profile.columns = columns;
    profile
}

/// `orders` profile computed on a 50% sample
pub(crate) fn sampled_orders_profile(columns: Vec<ColumnProfile>) -> TableProfile {
    let mut profile = orders_profile(columns);
    profile.sample = Some(SampleConfig {
        percent: Some(50.0),
        rows: None,
        seed: 42,
    });
    profile
}

/// `status` column profile with only `nullCount` set
pub(crate) fn status_with_nulls(null_count: u64) -> ColumnProfile {
    let mut column = ColumnProfile::new("status");
    column.null_count = Some(null_count);
    column
}

/// Recorded runner call: requested output names and sample mode
pub(crate) type Call = (Vec<String>, SampleMode);

/// Scripted runner: answers every requested name it has a value for
#[derive(Clone)]
pub(crate) struct FakeRunner {
    table: TableName,
    columns: Vec<ColumnInfo>,
    values: BTreeMap<String, MetricValue>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeRunner {
    pub(crate) fn orders() -> Self {
        Self {
            table: TableName::new("orders"),
            columns: vec![
                ColumnInfo::new("id", "INTEGER"),
                ColumnInfo::new("status", "VARCHAR"),
            ],
            values: BTreeMap::new(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_value(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns
            .iter()
            .map(|c| ColumnInfo::new(*c, "VARCHAR"))
            .collect();
        self
    }

    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryRunner for FakeRunner {
    fn table(&self) -> &TableName {
        &self.table
    }

    async fn run(&self, exprs: &[NamedExpression], mode: SampleMode) -> RunnerResult<MetricRow> {
        let names: Vec<String> = exprs.iter().map(|e| e.name.clone()).collect();
        self.calls.lock().unwrap().push((names.clone(), mode));
        if let Some(message) = &self.failure {
            return Err(RunnerError::QueryExecution {
                table: self.table.to_string(),
                source: DbError::ExecutionError(message.clone()),
            });
        }
        Ok(names
            .into_iter()
            .filter_map(|n| self.values.get(&n).map(|v| (n, v.clone())))
            .collect())
    }

    async fn run_grouped(
        &self,
        _exprs: &[NamedExpression],
        _group_by: &ColumnName,
        _mode: SampleMode,
    ) -> RunnerResult<Vec<MetricRow>> {
        Ok(Vec::new())
    }

    async fn columns(&self) -> RunnerResult<Vec<ColumnInfo>> {
        if let Some(message) = &self.failure {
            return Err(RunnerError::QueryExecution {
                table: self.table.to_string(),
                source: DbError::ExecutionError(message.clone()),
            });
        }
        Ok(self.columns.clone())
    }
}

/// Hands out clones of scripted runners by table name
#[derive(Default)]
pub(crate) struct FakeProvider {
    runners: BTreeMap<String, FakeRunner>,
}

impl FakeProvider {
    pub(crate) fn with(mut self, runner: FakeRunner) -> Self {
        self.runners.insert(runner.table.to_string(), runner);
        self
    }
}

impl RunnerProvider for FakeProvider {
    fn runner(&self, profile: &TableProfile) -> Option<Box<dyn QueryRunner + '_>> {
        self.runners
            .get(profile.name.as_str())
            .map(|r| Box::new(r.clone()) as Box<dyn QueryRunner>)
    }
}
