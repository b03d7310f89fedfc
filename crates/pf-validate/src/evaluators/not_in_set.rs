//! columnValuesToBeNotInSet

use crate::evaluator::{
    mismatched_definition, supplemental_count, supplemental_failure, target_column, verdict,
    EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};
use pf_metrics::{MetricParams, Metrics};

/// Checks that no value is one of the forbidden values
pub struct NotInSetEvaluator;

#[async_trait]
impl Evaluator for NotInSetEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToBeNotInSet
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValuesToBeNotInSet(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        if let Err(aborted) = target_column(ctx, case, table) {
            return aborted;
        }

        let bound = match Metrics::CountInSet.metric().bind(
            MetricParams::new().with_values(params.forbidden_values.iter().cloned()),
        ) {
            Ok(bound) => bound,
            Err(e) => return supplemental_failure(ctx, case, e),
        };
        let in_set = match supplemental_count(ctx, case, table, bound).await {
            Ok(count) => count,
            Err(aborted) => return aborted,
        };

        verdict(
            ctx,
            case,
            in_set == 0,
            format!("Found countInSet={}. It should be 0.", in_set),
        )
    }
}
