//! tableColumnCountToEqual

use crate::evaluator::{mismatched_definition, missing_prerequisite, verdict, EvalContext, Evaluator};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks the profiled column count against an exact value
pub struct ColumnCountEqualEvaluator;

#[async_trait]
impl Evaluator for ColumnCountEqualEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::TableColumnCountToEqual
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::TableColumnCountToEqual(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let Some(column_count) = table.column_count else {
            return missing_prerequisite(ctx, case, "columnCount");
        };
        verdict(
            ctx,
            case,
            column_count == params.column_count,
            format!(
                "Found columnCount={}. It should be {}.",
                column_count, params.column_count
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::test_support::{context, orders_profile};
    use pf_core::{ColumnCountParams, TestCaseStatus};

    fn column_count_case(column_count: u64) -> TestCase {
        TestCase::for_table(
            "orders_columns",
            "orders",
            TestDefinition::TableColumnCountToEqual(ColumnCountParams { column_count }),
        )
    }

    #[tokio::test]
    async fn test_column_count() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = context(None, &diagnostics);
        let table = orders_profile(vec![]);

        let result = ColumnCountEqualEvaluator
            .evaluate(&ctx, &column_count_case(2), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Success);
        assert_eq!(result.result, "Found columnCount=2. It should be 2.");

        let result = ColumnCountEqualEvaluator
            .evaluate(&ctx, &column_count_case(3), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Failed);
    }

    #[tokio::test]
    async fn test_missing_column_count_aborts() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = context(None, &diagnostics);
        let mut table = orders_profile(vec![]);
        table.column_count = None;

        let result = ColumnCountEqualEvaluator
            .evaluate(&ctx, &column_count_case(2), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Aborted);
    }
}
