//! columnValuesToBeInSet

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, supplemental_count, supplemental_failure,
    target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};
use pf_metrics::{MetricParams, Metrics};

/// Checks that every non-null value is one of the allowed values
pub struct InSetEvaluator;

#[async_trait]
impl Evaluator for InSetEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToBeInSet
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValuesToBeInSet(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        let Some(values_count) = column.values_count else {
            return missing_prerequisite(ctx, case, "valuesCount");
        };

        let bound = match Metrics::CountInSet.metric().bind(
            MetricParams::new().with_values(params.allowed_values.iter().cloned()),
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
            in_set == values_count,
            format!(
                "Found countInSet={} vs. valuesCount={}. Every non-null value should be in the set.",
                in_set, values_count
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::test_support::{context, orders_profile, sampled_orders_profile, FakeRunner};
    use pf_core::{ColumnProfile, InSetParams, MetricValue, TestCaseStatus};
    use pf_metrics::{QueryRunner, SampleMode};

    fn in_set_case(allowed: &[&str]) -> TestCase {
        TestCase::for_column(
            "status_in_set",
            "orders",
            "status",
            TestDefinition::ColumnValuesToBeInSet(InSetParams {
                allowed_values: allowed.iter().map(|v| MetricValue::from(*v)).collect(),
            }),
        )
    }

    fn status(values_count: Option<u64>) -> ColumnProfile {
        let mut column = ColumnProfile::new("status");
        column.values_count = values_count;
        column
    }

    #[tokio::test]
    async fn test_all_values_in_set() {
        let diagnostics = CollectingDiagnostics::new();
        let runner = FakeRunner::orders().with_value("countInSet", 8_i64);
        let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
        let table = orders_profile(vec![status(Some(8))]);

        let result = InSetEvaluator
            .evaluate(&ctx, &in_set_case(&["open", "closed"]), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Success);
        assert_eq!(
            result.result,
            "Found countInSet=8 vs. valuesCount=8. Every non-null value should be in the set."
        );
        assert_eq!(
            runner.calls(),
            vec![(vec!["countInSet".to_string()], SampleMode::Full)]
        );
    }

    #[tokio::test]
    async fn test_sampled_profile_counts_the_sample() {
        let diagnostics = CollectingDiagnostics::new();
        let runner = FakeRunner::orders().with_value("countInSet", 4_i64);
        let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
        let table = sampled_orders_profile(vec![status(Some(4))]);

        let result = InSetEvaluator
            .evaluate(&ctx, &in_set_case(&["open", "closed"]), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Success);
        assert_eq!(
            runner.calls(),
            vec![(vec!["countInSet".to_string()], SampleMode::Sample)]
        );
    }

    #[tokio::test]
    async fn test_value_outside_set_fails() {
        let diagnostics = CollectingDiagnostics::new();
        let runner = FakeRunner::orders().with_value("countInSet", 7_i64);
        let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
        let table = orders_profile(vec![status(Some(8))]);

        let result = InSetEvaluator
            .evaluate(&ctx, &in_set_case(&["open"]), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Failed);
    }

    #[tokio::test]
    async fn test_missing_values_count_aborts_before_querying() {
        let diagnostics = CollectingDiagnostics::new();
        let runner = FakeRunner::orders();
        let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
        let table = orders_profile(vec![status(None)]);

        let result = InSetEvaluator
            .evaluate(&ctx, &in_set_case(&["open"]), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Aborted);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_without_runner_aborts() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = context(None, &diagnostics);
        let table = orders_profile(vec![status(Some(8))]);

        let result = InSetEvaluator
            .evaluate(&ctx, &in_set_case(&["open"]), &table)
            .await;
        assert_eq!(result.status, TestCaseStatus::Aborted);
        assert!(result
            .result
            .starts_with("Error computing columnValuesToBeInSet for orders.status - "));
    }
}
