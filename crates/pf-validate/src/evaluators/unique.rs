//! columnValuesToBeUnique

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks that every non-null value occurs exactly once
pub struct UniqueEvaluator;

#[async_trait]
impl Evaluator for UniqueEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToBeUnique
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        if !matches!(case.definition, TestDefinition::ColumnValuesToBeUnique) {
            return mismatched_definition(ctx, case, self.kind());
        }
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        let Some(values_count) = column.values_count else {
            return missing_prerequisite(ctx, case, "valuesCount");
        };
        let Some(unique_count) = column.unique_count else {
            return missing_prerequisite(ctx, case, "uniqueCount");
        };

        verdict(
            ctx,
            case,
            values_count == unique_count,
            format!(
                "Found valuesCount={} vs. uniqueCount={}. Both counts should be equal for column values to be unique.",
                values_count, unique_count
            ),
        )
    }
}
