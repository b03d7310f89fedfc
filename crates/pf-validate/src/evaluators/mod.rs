//! One evaluator per test case kind

mod column_count;
mod column_set;
mod in_set;
mod lengths_between;
mod missing_count;
mod not_in_set;
mod not_null;
mod regex_match;
mod row_count;
mod unique;
mod values_between;

pub use column_count::ColumnCountEqualEvaluator;
pub use column_set::ColumnSetEvaluator;
pub use in_set::InSetEvaluator;
pub use lengths_between::LengthsBetweenEvaluator;
pub use missing_count::MissingCountEvaluator;
pub use not_in_set::NotInSetEvaluator;
pub use not_null::NotNullEvaluator;
pub use regex_match::RegexMatchEvaluator;
pub use row_count::{RowCountBetweenEvaluator, RowCountEqualEvaluator};
pub use unique::UniqueEvaluator;
pub use values_between::ValuesBetweenEvaluator;

use crate::evaluator::Evaluator;

/// An evaluator for every built-in kind
pub fn default_evaluators() -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(MissingCountEvaluator),
        Box::new(NotNullEvaluator),
        Box::new(UniqueEvaluator),
        Box::new(ValuesBetweenEvaluator),
        Box::new(LengthsBetweenEvaluator),
        Box::new(InSetEvaluator),
        Box::new(NotInSetEvaluator),
        Box::new(RegexMatchEvaluator),
        Box::new(RowCountEqualEvaluator),
        Box::new(RowCountBetweenEvaluator),
        Box::new(ColumnCountEqualEvaluator),
        Box::new(ColumnSetEvaluator),
    ]
}

/// `[a, b]` rendering used in result messages
pub(crate) fn bracketed<T: std::fmt::Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", items.join(", "))
}
