//! columnValuesToBeNotNull

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks that the column holds no nulls
pub struct NotNullEvaluator;

#[async_trait]
impl Evaluator for NotNullEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToBeNotNull
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        if !matches!(case.definition, TestDefinition::ColumnValuesToBeNotNull) {
            return mismatched_definition(ctx, case, self.kind());
        }
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        let Some(null_count) = column.null_count else {
            return missing_prerequisite(ctx, case, "nullCount");
        };

        verdict(
            ctx,
            case,
            null_count == 0,
            format!("Found nullCount={}. It should be 0.", null_count),
        )
    }
}
