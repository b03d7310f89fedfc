//! columnValuesToMatchRegex

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, supplemental_count, supplemental_failure,
    target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};
use pf_metrics::{MetricParams, Metrics};
use regex::Regex;

/// Checks that every non-null value matches a regular expression
///
/// The pattern is compiled locally before it is sent to the engine so that a
/// malformed pattern aborts with a readable error. The local check uses the
/// `regex` crate's syntax while the count runs on the engine's own regex
/// (RE2 on DuckDB, POSIX on PostgreSQL). Patterns outside the common subset
/// can pass the local check and still abort with an engine error, or be
/// rejected locally although the engine would accept them (lookaround,
/// backreferences).
pub struct RegexMatchEvaluator;

#[async_trait]
impl Evaluator for RegexMatchEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToMatchRegex
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValuesToMatchRegex(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        let Some(values_count) = column.values_count else {
            return missing_prerequisite(ctx, case, "valuesCount");
        };
        if let Err(e) = Regex::new(&params.regex) {
            return supplemental_failure(ctx, case, format!("invalid regex: {}", e));
        }

        let bound = match Metrics::RegexCount
            .metric()
            .bind(MetricParams::new().with_regex(params.regex.as_str()))
        {
            Ok(bound) => bound,
            Err(e) => return supplemental_failure(ctx, case, e),
        };
        let matched = match supplemental_count(ctx, case, table, bound).await {
            Ok(count) => count,
            Err(aborted) => return aborted,
        };

        verdict(
            ctx,
            case,
            matched == values_count,
            format!(
                "Found regexCount={} vs. valuesCount={}. Every non-null value should match the pattern.",
                matched, values_count
            ),
        )
    }
}
