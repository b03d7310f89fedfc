//! Error types for pf-validate

use pf_core::TestCaseKind;
use thiserror::Error;

/// Errors that stop a validation run before any test case is evaluated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// V001: No evaluator is registered for the test case's kind
    #[error("[V001] No evaluator registered for kind {kind} (test case '{name}')")]
    UnsupportedTestCaseKind { name: String, kind: TestCaseKind },

    /// V002: Two evaluators registered for one kind
    #[error("[V002] An evaluator for {kind} is already registered")]
    DuplicateEvaluator { kind: TestCaseKind },
}

/// Result type alias for ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;
