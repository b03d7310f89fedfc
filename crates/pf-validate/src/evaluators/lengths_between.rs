//! columnValueLengthsToBeBetween

use crate::evaluator::{
    mismatched_definition, missing_prerequisite, target_column, verdict, EvalContext, Evaluator,
};
use async_trait::async_trait;
use pf_core::{TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks the shortest and longest text lengths against inclusive bounds
pub struct LengthsBetweenEvaluator;

fn display(value: Option<u64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[async_trait]
impl Evaluator for LengthsBetweenEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValueLengthsToBeBetween
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValueLengthsToBeBetween(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        if params.min_length.is_some() && column.min_length.is_none() {
            return missing_prerequisite(ctx, case, "minLength");
        }
        if params.max_length.is_some() && column.max_length.is_none() {
            return missing_prerequisite(ctx, case, "maxLength");
        }

        let min_ok = params
            .min_length
            .zip(column.min_length)
            .map_or(true, |(bound, found)| found >= bound);
        let max_ok = params
            .max_length
            .zip(column.max_length)
            .map_or(true, |(bound, found)| found <= bound);

        verdict(
            ctx,
            case,
            min_ok && max_ok,
            format!(
                "Found minLength={}, maxLength={} vs. the expected minLength={}, maxLength={}.",
                display(column.min_length),
                display(column.max_length),
                params
                    .min_length
                    .map_or_else(|| "0".to_string(), |v| v.to_string()),
                params
                    .max_length
                    .map_or_else(|| "inf".to_string(), |v| v.to_string()),
            ),
        )
    }
}
