//! pf-validate - Test case evaluation
//!
//! Each [`TestCaseKind`](pf_core::TestCaseKind) has one [`Evaluator`] that
//! turns a table profile (plus, for some kinds, a supplemental query) into a
//! [`TestCaseResult`](pf_core::TestCaseResult). The [`ValidationDispatcher`]
//! maps test cases to their evaluators and runs them in input order.

pub mod diagnostics;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod evaluators;
pub mod provider;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use diagnostics::{CollectingDiagnostics, DiagnosticEvent, Diagnostics, LogDiagnostics};
pub use dispatcher::{DispatcherBuilder, ValidationDispatcher, ValidationPlan};
pub use error::{ValidationError, ValidationResult};
pub use evaluator::{EvalContext, Evaluator};
pub use provider::{DbRunnerProvider, RunnerProvider};
pub use summary::ValidationSummary;
