//! tableColumnToMatchSet

use super::bracketed;
use crate::evaluator::{
    mismatched_definition, require_runner, supplemental_failure, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};
use std::collections::BTreeSet;

/// Checks the live column names against an expected set or sequence
pub struct ColumnSetEvaluator;

#[async_trait]
impl Evaluator for ColumnSetEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::TableColumnToMatchSet
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        _table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::TableColumnToMatchSet(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let runner = match require_runner(ctx, case) {
            Ok(runner) => runner,
            Err(aborted) => return aborted,
        };
        let found: Vec<String> = match runner.columns().await {
            Ok(columns) => columns.into_iter().map(|c| c.name.into_inner()).collect(),
            Err(e) => return supplemental_failure(ctx, case, e),
        };

        let passed = if params.ordered {
            found == params.column_names
        } else {
            found.iter().collect::<BTreeSet<_>>() == params.column_names.iter().collect()
        };

        verdict(
            ctx,
            case,
            passed,
            format!(
                "Found columns={} vs. the expected {}.",
                bracketed(&found),
                bracketed(&params.column_names)
            ),
        )
    }
}
