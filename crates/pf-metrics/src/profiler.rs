//! Builds table profiles by running the registry's metrics

use crate::error::RunnerResult;
use crate::metric::BoundMetric;
use crate::registry::Metrics;
use crate::runner::{MetricRow, QueryRunner, SampleMode};
use chrono::{DateTime, Utc};
use pf_core::{ColumnProfile, MetricValue, TableProfile};
use pf_db::ColumnInfo;
use pf_sql::{Expression, NamedExpression, ProfileSample, GROUP_KEY};

const FREQUENCY: &str = "frequency";

/// Computes a [`TableProfile`] through a [`QueryRunner`]
pub struct ProfileBuilder<'a> {
    runner: &'a dyn QueryRunner,
    profile_date: DateTime<Utc>,
}

impl<'a> ProfileBuilder<'a> {
    /// Profile the runner's table, dated now
    pub fn new(runner: &'a dyn QueryRunner) -> Self {
        Self {
            runner,
            profile_date: Utc::now(),
        }
    }

    /// Override the profile date
    pub fn with_profile_date(mut self, profile_date: DateTime<Utc>) -> Self {
        self.profile_date = profile_date;
        self
    }

    /// Run every applicable metric and assemble the profile
    pub async fn build(&self, mode: SampleMode) -> RunnerResult<TableProfile> {
        let table = self.runner.table();
        let columns = self.runner.columns().await?;
        log::debug!("Profiling {} ({} columns, {:?})", table, columns.len(), mode);

        let mut profile = TableProfile::new(table.clone(), self.profile_date);
        profile.column_count = Some(columns.len() as u64);
        if mode == SampleMode::Sample {
            profile.sample = self.runner.sample().map(ProfileSample::to_config);
        }

        let row_count = BoundMetric::unbound(Metrics::RowCount.metric());
        profile.row_count = self.runner.compute(&row_count, None, mode).await?.as_u64();

        for column in &columns {
            profile.columns.push(self.profile_column(column, mode).await?);
        }
        Ok(profile)
    }

    async fn profile_column(
        &self,
        column: &ColumnInfo,
        mode: SampleMode,
    ) -> RunnerResult<ColumnProfile> {
        let exprs = static_metrics_for(column)
            .into_iter()
            .map(|id| BoundMetric::unbound(id.metric()).to_expression(Some(&column.name)))
            .collect::<Result<Vec<_>, _>>()?;
        let row = self.runner.run(&exprs, mode).await?;

        let mut profile = ColumnProfile::new(column.name.clone());
        let count = |id: Metrics| metric_value(&row, id).and_then(|v| v.as_u64());
        let float = |id: Metrics| metric_value(&row, id).and_then(|v| v.as_f64());

        profile.values_count = count(Metrics::ValuesCount);
        profile.null_count = count(Metrics::NullCount);
        profile.distinct_count = count(Metrics::DistinctCount);
        profile.min = metric_value(&row, Metrics::Min).cloned();
        profile.max = metric_value(&row, Metrics::Max).cloned();
        profile.mean = float(Metrics::Mean);
        profile.sum = float(Metrics::Sum);
        profile.stddev = float(Metrics::Stddev);
        profile.min_length = count(Metrics::MinLength);
        profile.max_length = count(Metrics::MaxLength);

        profile.unique_count = Some(self.unique_count(column, mode).await?);

        let composed = |id: Metrics, profile: &ColumnProfile| id.metric().compute(profile);
        profile.null_proportion =
            composed(Metrics::NullProportion, &profile).and_then(|v| v.as_f64());
        profile.distinct_proportion =
            composed(Metrics::DistinctProportion, &profile).and_then(|v| v.as_f64());
        profile.unique_proportion =
            composed(Metrics::UniqueProportion, &profile).and_then(|v| v.as_f64());
        profile.duplicate_count =
            composed(Metrics::DuplicateCount, &profile).and_then(|v| v.as_u64());

        Ok(profile)
    }

    /// Non-null values occurring exactly once
    async fn unique_count(&self, column: &ColumnInfo, mode: SampleMode) -> RunnerResult<u64> {
        let frequency = [NamedExpression::new(FREQUENCY, Expression::CountAll)];
        let groups = self
            .runner
            .run_grouped(&frequency, &column.name, mode)
            .await?;
        let unique = groups
            .iter()
            .filter(|g| g.get(GROUP_KEY).is_some_and(|v| !v.is_null()))
            .filter(|g| g.get(FREQUENCY).and_then(MetricValue::as_u64) == Some(1))
            .count();
        Ok(unique as u64)
    }
}

/// Non-null metric value from a result row; aggregates over zero rows are NULL
fn metric_value(row: &MetricRow, id: Metrics) -> Option<&MetricValue> {
    row.get(id.name()).filter(|v| !v.is_null())
}

/// Static metrics worth computing for a column of this type
fn static_metrics_for(column: &ColumnInfo) -> Vec<Metrics> {
    let mut metrics = vec![
        Metrics::ValuesCount,
        Metrics::NullCount,
        Metrics::DistinctCount,
    ];
    if column.is_numeric() {
        metrics.extend([
            Metrics::Min,
            Metrics::Max,
            Metrics::Mean,
            Metrics::Sum,
            Metrics::Stddev,
        ]);
    } else if column.is_text() {
        metrics.extend([Metrics::MinLength, Metrics::MaxLength]);
    } else if column.is_temporal() {
        metrics.extend([Metrics::Min, Metrics::Max]);
    }
    metrics
}

#[cfg(test)]
#[path = "profiler_test.rs"]
mod tests;
