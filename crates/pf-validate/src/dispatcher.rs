//! Routing test cases to their evaluators

use crate::diagnostics::Diagnostics;
use crate::error::{ValidationError, ValidationResult};
use crate::evaluator::{EvalContext, Evaluator};
use crate::evaluators::default_evaluators;
use crate::provider::RunnerProvider;
use chrono::{DateTime, Utc};
use pf_core::{ProfileSet, TestCase, TestCaseKind, TestCaseResult};
use std::collections::BTreeMap;

/// Maps each test case kind to the evaluator registered for it
pub struct ValidationDispatcher {
    evaluators: BTreeMap<TestCaseKind, Box<dyn Evaluator>>,
}

/// Collects evaluators for a [`ValidationDispatcher`]
#[derive(Default)]
pub struct DispatcherBuilder {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl DispatcherBuilder {
    /// Add an evaluator
    pub fn register(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluators.push(Box::new(evaluator));
        self
    }

    fn register_boxed(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    /// Build the dispatcher; fails when two evaluators claim one kind
    pub fn build(self) -> ValidationResult<ValidationDispatcher> {
        let mut evaluators = BTreeMap::new();
        for evaluator in self.evaluators {
            let kind = evaluator.kind();
            if evaluators.insert(kind, evaluator).is_some() {
                return Err(ValidationError::DuplicateEvaluator { kind });
            }
        }
        Ok(ValidationDispatcher { evaluators })
    }
}

impl ValidationDispatcher {
    /// Start registering evaluators
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatcher with an evaluator for every built-in kind
    pub fn with_default_evaluators() -> ValidationResult<Self> {
        default_evaluators()
            .into_iter()
            .fold(Self::builder(), DispatcherBuilder::register_boxed)
            .build()
    }

    /// Whether an evaluator is registered for `kind`
    pub fn supports(&self, kind: TestCaseKind) -> bool {
        self.evaluators.contains_key(&kind)
    }

    /// Registered kinds
    pub fn kinds(&self) -> impl Iterator<Item = TestCaseKind> + '_ {
        self.evaluators.keys().copied()
    }

    /// Pair every test case with its evaluator.
    ///
    /// Fails on the first kind without an evaluator; nothing is evaluated.
    pub fn prepare<'a>(&'a self, cases: &'a [TestCase]) -> ValidationResult<ValidationPlan<'a>> {
        let steps = cases
            .iter()
            .map(|case| {
                self.evaluators
                    .get(&case.kind())
                    .map(|evaluator| (case, evaluator.as_ref()))
                    .ok_or_else(|| ValidationError::UnsupportedTestCaseKind {
                        name: case.name.clone(),
                        kind: case.kind(),
                    })
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(ValidationPlan { steps })
    }
}

/// Test cases resolved against their evaluators, ready to run
pub struct ValidationPlan<'a> {
    steps: Vec<(&'a TestCase, &'a dyn Evaluator)>,
}

impl ValidationPlan<'_> {
    /// Number of test cases in the plan
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the plan has no test cases
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Evaluate every test case in input order.
    ///
    /// Returns exactly one verdict per test case. Missing profiles and
    /// supplemental failures become `Aborted` verdicts.
    pub async fn run(
        &self,
        profiles: &ProfileSet,
        execution_date: DateTime<Utc>,
        runners: Option<&dyn RunnerProvider>,
        diagnostics: &dyn Diagnostics,
    ) -> Vec<TestCaseResult> {
        let mut results = Vec::with_capacity(self.steps.len());
        for (case, evaluator) in &self.steps {
            let Some(table) = profiles.get(case.target.table.as_str()) else {
                let message = format!(
                    "No profile found for table {} for {}.",
                    case.target.table,
                    case.kind()
                );
                diagnostics.warn(&case.name, &message);
                results.push(TestCaseResult::aborted(execution_date, message));
                continue;
            };

            let runner = runners.and_then(|p| p.runner(table));
            let ctx = EvalContext {
                execution_date,
                runner: runner.as_deref(),
                diagnostics,
            };
            log::debug!("Evaluating {} ({}) on {}", case.name, case.kind(), case.target);
            results.push(evaluator.evaluate(&ctx, case, table).await);
        }
        results
    }
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;
