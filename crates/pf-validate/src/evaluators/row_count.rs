//! tableRowCountToEqual and tableRowCountToBeBetween

use crate::evaluator::{mismatched_definition, missing_prerequisite, verdict, EvalContext, Evaluator};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks the profiled row count against an exact value
pub struct RowCountEqualEvaluator;

/// Checks the profiled row count against an inclusive range
pub struct RowCountBetweenEvaluator;

#[async_trait]
impl Evaluator for RowCountEqualEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::TableRowCountToEqual
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::TableRowCountToEqual(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let Some(row_count) = table.row_count else {
            return missing_prerequisite(ctx, case, "rowCount");
        };
        verdict(
            ctx,
            case,
            row_count == params.value,
            format!("Found rowCount={}. It should be {}.", row_count, params.value),
        )
    }
}

#[async_trait]
impl Evaluator for RowCountBetweenEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::TableRowCountToBeBetween
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::TableRowCountToBeBetween(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let Some(row_count) = table.row_count else {
            return missing_prerequisite(ctx, case, "rowCount");
        };
        verdict(
            ctx,
            case,
            (params.min_value..=params.max_value).contains(&row_count),
            format!(
                "Found rowCount={} vs. the expected range [{}, {}].",
                row_count, params.min_value, params.max_value
            ),
        )
    }
}
