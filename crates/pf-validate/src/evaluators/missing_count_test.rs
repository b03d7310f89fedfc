use super::*;
use crate::diagnostics::CollectingDiagnostics;
use crate::test_support::{
    context, orders_profile, sampled_orders_profile, status_with_nulls, FakeRunner,
};
use pf_core::{MetricValue, MissingCountParams, TestCaseStatus};
use pf_metrics::{QueryRunner, SampleMode};

fn missing_count_case(expected: u64, matches: Option<Vec<&str>>) -> TestCase {
    TestCase::for_column(
        "orders_status_missing",
        "orders",
        "status",
        TestDefinition::ColumnValuesMissingCountToBeEqual(MissingCountParams {
            missing_count_value: expected,
            missing_value_match: matches
                .map(|m| m.into_iter().map(MetricValue::from).collect()),
        }),
    )
}

#[tokio::test]
async fn test_null_count_equal_to_expected_succeeds() {
    let diagnostics = CollectingDiagnostics::new();
    let ctx = context(None, &diagnostics);
    let table = orders_profile(vec![status_with_nulls(5)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, None), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Success);
    assert_eq!(result.result, "Found missingCount=5. It should be 5.");
    assert_eq!(result.timestamp, ctx.execution_date);
}

#[tokio::test]
async fn test_null_count_below_expected_fails() {
    let diagnostics = CollectingDiagnostics::new();
    let ctx = context(None, &diagnostics);
    let table = orders_profile(vec![status_with_nulls(4)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, None), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Failed);
    assert!(result.result.contains("missingCount=4"));
    assert!(result.result.contains("should be 5"));
}

#[tokio::test]
async fn test_matched_values_add_to_null_count() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().with_value("countInSet", 2_i64);
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, Some(vec!["N/A"])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Success, "{}", result.result);
    assert_eq!(result.result, "Found missingCount=5. It should be 5.");
    assert_eq!(
        runner.calls(),
        vec![(vec!["countInSet".to_string()], SampleMode::Full)]
    );
}

#[tokio::test]
async fn test_sampled_profile_counts_matches_on_the_sample() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().with_value("countInSet", 1_i64);
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = sampled_orders_profile(vec![status_with_nulls(2)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(3, Some(vec!["N/A"])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Success, "{}", result.result);
    assert_eq!(
        runner.calls(),
        vec![(vec!["countInSet".to_string()], SampleMode::Sample)]
    );
}

#[tokio::test]
async fn test_empty_match_list_skips_supplemental_query() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().with_value("countInSet", 2_i64);
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(3, Some(vec![])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Success);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_missing_null_count_aborts() {
    let diagnostics = CollectingDiagnostics::new();
    let ctx = context(None, &diagnostics);
    let mut column = status_with_nulls(0);
    column.null_count = None;
    let table = orders_profile(vec![column]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, None), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Aborted);
    assert_eq!(
        result.result,
        "We expect `nullCount` to be informed on the profiler for columnValuesMissingCountToBeEqual."
    );
    assert_eq!(diagnostics.for_test_case("orders_status_missing").len(), 1);
}

#[tokio::test]
async fn test_runner_failure_aborts() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().failing("connection reset");
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, Some(vec!["N/A"])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Aborted);
    assert!(result
        .result
        .starts_with("Error computing columnValuesMissingCountToBeEqual for orders.status - "));
    assert!(result.result.contains("connection reset"));
}

#[tokio::test]
async fn test_missing_runner_aborts() {
    let diagnostics = CollectingDiagnostics::new();
    let ctx = context(None, &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, Some(vec!["N/A"])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Aborted);
    assert!(result.result.contains("no query runner"));
}

#[tokio::test]
async fn test_unknown_column_aborts() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().with_columns(&["id"]);
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);

    let result = MissingCountEvaluator
        .evaluate(&ctx, &missing_count_case(5, Some(vec!["N/A"])), &table)
        .await;

    assert_eq!(result.status, TestCaseStatus::Aborted);
    assert!(result.result.contains("Column 'status' not found"));
}

#[tokio::test]
async fn test_evaluation_is_deterministic() {
    let diagnostics = CollectingDiagnostics::new();
    let runner = FakeRunner::orders().with_value("countInSet", 1_i64);
    let ctx = context(Some(&runner as &dyn QueryRunner), &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);
    let case = missing_count_case(5, Some(vec!["N/A"]));

    let first = MissingCountEvaluator.evaluate(&ctx, &case, &table).await;
    let second = MissingCountEvaluator.evaluate(&ctx, &case, &table).await;
    assert_eq!(first, second);
    assert_eq!(first.status, TestCaseStatus::Failed);
}

#[tokio::test]
async fn test_wrong_definition_aborts() {
    let diagnostics = CollectingDiagnostics::new();
    let ctx = context(None, &diagnostics);
    let table = orders_profile(vec![status_with_nulls(3)]);
    let case = TestCase::for_column("x", "orders", "status", TestDefinition::ColumnValuesToBeNotNull);

    let result = MissingCountEvaluator.evaluate(&ctx, &case, &table).await;
    assert_eq!(result.status, TestCaseStatus::Aborted);
}
