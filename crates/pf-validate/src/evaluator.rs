//! The evaluator protocol and the helpers every evaluator shares

use crate::diagnostics::Diagnostics;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pf_core::{
    ColumnProfile, MetricValue, TableProfile, TestCase, TestCaseKind, TestCaseResult,
};
use pf_metrics::{BoundMetric, QueryRunner, SampleMode};
use std::fmt::Display;

/// Everything an evaluator may use besides the test case and profile
pub struct EvalContext<'a> {
    /// Execution date stamped on every verdict
    pub execution_date: DateTime<Utc>,
    /// Runner bound to the test case's table, when supplemental queries are possible
    pub runner: Option<&'a dyn QueryRunner>,
    /// Diagnostics sink for this run
    pub diagnostics: &'a dyn Diagnostics,
}

/// Turns one test case and its table profile into a verdict.
///
/// Evaluators check their profile prerequisites first, optionally compute a
/// supplemental metric, then decide. Every failure along the way becomes an
/// `Aborted` verdict; `evaluate` never errors.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Kind this evaluator handles
    fn kind(&self) -> TestCaseKind;

    /// Evaluate `case` against `table`
    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult;
}

/// Aborted verdict, reported to the run's diagnostics
pub(crate) fn abort(ctx: &EvalContext<'_>, case: &TestCase, message: String) -> TestCaseResult {
    ctx.diagnostics.warn(&case.name, &message);
    TestCaseResult::aborted(ctx.execution_date, message)
}

/// Success/Failed verdict for a decided comparison
pub(crate) fn verdict(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    passed: bool,
    message: String,
) -> TestCaseResult {
    let result = TestCaseResult::from_check(ctx.execution_date, passed, message);
    ctx.diagnostics
        .debug(&case.name, &format!("{}: {}", result.status, result.result));
    result
}

/// Aborted verdict for a profile field the evaluator needs but did not get
pub(crate) fn missing_prerequisite(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    field: &str,
) -> TestCaseResult {
    abort(
        ctx,
        case,
        format!(
            "We expect `{}` to be informed on the profiler for {}.",
            field,
            case.kind()
        ),
    )
}

/// Aborted verdict for a failed supplemental computation
pub(crate) fn supplemental_failure(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    error: impl Display,
) -> TestCaseResult {
    abort(
        ctx,
        case,
        format!("Error computing {} for {} - {}", case.kind(), case.target, error),
    )
}

/// Aborted verdict for a definition that does not belong to this evaluator
pub(crate) fn mismatched_definition(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    expected: TestCaseKind,
) -> TestCaseResult {
    abort(
        ctx,
        case,
        format!(
            "Test case '{}' is a {} test case and cannot be evaluated as {}.",
            case.name,
            case.kind(),
            expected
        ),
    )
}

/// Column profile the test case targets
pub(crate) fn target_column<'p>(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    table: &'p TableProfile,
) -> Result<&'p ColumnProfile, TestCaseResult> {
    case.target
        .column
        .as_ref()
        .and_then(|column| table.column(column))
        .ok_or_else(|| {
            abort(
                ctx,
                case,
                format!("No column profile found for {} for {}.", case.target, case.kind()),
            )
        })
}

/// Runner for supplemental queries
pub(crate) fn require_runner<'a>(
    ctx: &EvalContext<'a>,
    case: &TestCase,
) -> Result<&'a dyn QueryRunner, TestCaseResult> {
    ctx.runner.ok_or_else(|| {
        supplemental_failure(
            ctx,
            case,
            format!("no query runner available for table {}", case.target.table),
        )
    })
}

/// Rows a supplemental query must read to agree with `table`'s counts
fn profile_mode(table: &TableProfile) -> SampleMode {
    if table.is_sampled() {
        SampleMode::Sample
    } else {
        SampleMode::Full
    }
}

/// Compute a count-valued column metric as a supplemental query.
///
/// The query reads the same rows as `table`: the whole table for a full
/// profile, the profile's sample otherwise. The column is resolved against
/// the live table first so a stale test case aborts with a column-not-found
/// message instead of an engine error.
pub(crate) async fn supplemental_count(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    table: &TableProfile,
    metric: BoundMetric,
) -> Result<u64, TestCaseResult> {
    let mode = profile_mode(table);
    let runner = require_runner(ctx, case)?;
    let Some(column) = case.target.column.as_ref() else {
        return Err(supplemental_failure(ctx, case, "test case has no column"));
    };
    let resolved = runner
        .resolve_column(column)
        .await
        .map_err(|e| supplemental_failure(ctx, case, e))?;
    let value = runner
        .compute(&metric, Some(&resolved.name), mode)
        .await
        .map_err(|e| supplemental_failure(ctx, case, e))?;

    match value {
        MetricValue::Null => Ok(0),
        other => other.as_u64().ok_or_else(|| {
            supplemental_failure(
                ctx,
                case,
                format!("{} returned a non-count value {}", metric.metric(), other),
            )
        }),
    }
}
