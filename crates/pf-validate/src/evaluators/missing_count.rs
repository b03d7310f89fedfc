//! columnValuesMissingCountToBeEqual

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, supplemental_count, supplemental_failure,
    target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};
use pf_metrics::{MetricParams, Metrics};

/// Checks that nulls plus values counted as missing equal the expected count.
///
/// `missingValueMatch` values are counted over the profile's rows and added
/// to its `nullCount`. SQL `IN` never matches NULL, so the two counts cover
/// disjoint rows.
pub struct MissingCountEvaluator;

#[async_trait]
impl Evaluator for MissingCountEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesMissingCountToBeEqual
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValuesMissingCountToBeEqual(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        let Some(null_count) = column.null_count else {
            return missing_prerequisite(ctx, case, "nullCount");
        };

        let mut missing_count = null_count;
        if let Some(matches) = params.missing_value_match.as_ref().filter(|m| !m.is_empty()) {
            let bound = match Metrics::CountInSet
                .metric()
                .bind(MetricParams::new().with_values(matches.iter().cloned()))
            {
                Ok(bound) => bound,
                Err(e) => return supplemental_failure(ctx, case, e),
            };
            match supplemental_count(ctx, case, table, bound).await {
                Ok(matched) => missing_count += matched,
                Err(aborted) => return aborted,
            }
        }

        let expected = params.missing_count_value;
        verdict(
            ctx,
            case,
            missing_count == expected,
            format!(
                "Found missingCount={}. It should be {}.",
                missing_count, expected
            ),
        )
    }
}

#[cfg(test)]
#[path = "missing_count_test.rs"]
mod tests;
