//! columnValuesToBeBetween

use crate::evaluator::{
    abort, mismatched_definition, missing_prerequisite, target_column, verdict, EvalContext,
    Evaluator,
};
use async_trait::async_trait;
use pf_core::{MetricValue, TableProfile, TestCase, TestCaseKind, TestCaseResult, TestDefinition};

/// Checks that the column's min and max lie within the inclusive bounds.
///
/// An absent bound is unbounded; only the profile fields a given bound needs
/// are required.
pub struct ValuesBetweenEvaluator;

/// Numeric view of `found` when it has to be compared against `bound`
fn comparable(
    ctx: &EvalContext<'_>,
    case: &TestCase,
    field: &str,
    found: &MetricValue,
    bound: Option<f64>,
) -> Result<Option<(f64, f64)>, TestCaseResult> {
    let Some(bound) = bound else {
        return Ok(None);
    };
    match found.as_f64() {
        Some(value) => Ok(Some((value, bound))),
        None => Err(abort(
            ctx,
            case,
            format!(
                "Found {}={} for {}, which cannot be compared with {}.",
                field, found, case.target, bound
            ),
        )),
    }
}

#[async_trait]
impl Evaluator for ValuesBetweenEvaluator {
    fn kind(&self) -> TestCaseKind {
        TestCaseKind::ColumnValuesToBeBetween
    }

    async fn evaluate(
        &self,
        ctx: &EvalContext<'_>,
        case: &TestCase,
        table: &TableProfile,
    ) -> TestCaseResult {
        let TestDefinition::ColumnValuesToBeBetween(params) = &case.definition else {
            return mismatched_definition(ctx, case, self.kind());
        };
        let column = match target_column(ctx, case, table) {
            Ok(column) => column,
            Err(aborted) => return aborted,
        };
        if params.min_value.is_some() && column.min.is_none() {
            return missing_prerequisite(ctx, case, "min");
        }
        if params.max_value.is_some() && column.max.is_none() {
            return missing_prerequisite(ctx, case, "max");
        }

        let found_min = column.min.clone().unwrap_or_default();
        let found_max = column.max.clone().unwrap_or_default();
        let min = match comparable(ctx, case, "min", &found_min, params.min_value) {
            Ok(min) => min,
            Err(aborted) => return aborted,
        };
        let max = match comparable(ctx, case, "max", &found_max, params.max_value) {
            Ok(max) => max,
            Err(aborted) => return aborted,
        };
        let passed = min.map_or(true, |(value, bound)| value >= bound)
            && max.map_or(true, |(value, bound)| value <= bound);

        verdict(
            ctx,
            case,
            passed,
            format!(
                "Found min={}, max={} vs. the expected min={}, max={}.",
                found_min,
                found_max,
                params.min_value.unwrap_or(f64::NEG_INFINITY),
                params.max_value.unwrap_or(f64::INFINITY)
            ),
        )
    }
}
