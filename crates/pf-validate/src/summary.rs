//! Aggregate counts over a validation run

use pf_core::{TestCaseResult, TestCaseStatus};
use std::time::Duration;

/// Summary of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Test cases evaluated
    pub total: usize,

    /// Verdicts with status `Success`
    pub success: usize,

    /// Verdicts with status `Failed`
    pub failed: usize,

    /// Verdicts with status `Aborted`
    pub aborted: usize,

    /// Wall time of the run
    pub duration: Duration,
}

impl ValidationSummary {
    /// Count verdicts by status
    pub fn from_results(results: &[TestCaseResult], duration: Duration) -> Self {
        let count = |status: TestCaseStatus| results.iter().filter(|r| r.status == status).count();
        Self {
            total: results.len(),
            success: count(TestCaseStatus::Success),
            failed: count(TestCaseStatus::Failed),
            aborted: count(TestCaseStatus::Aborted),
            duration,
        }
    }

    /// True when nothing failed or aborted
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.aborted == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::execution_date;

    #[test]
    fn test_from_results() {
        let ts = execution_date();
        let results = vec![
            TestCaseResult::from_check(ts, true, "ok"),
            TestCaseResult::from_check(ts, false, "bad"),
            TestCaseResult::aborted(ts, "no profile"),
            TestCaseResult::from_check(ts, true, "ok"),
        ];
        let summary = ValidationSummary::from_results(&results, Duration::from_millis(12));
        assert_eq!(summary.total, 4);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.aborted, 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_run_passes() {
        let summary = ValidationSummary::from_results(&[], Duration::ZERO);
        assert_eq!(summary.total, 0);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_aborted_is_not_a_pass() {
        let results = vec![TestCaseResult::aborted(execution_date(), "query failed")];
        assert!(!ValidationSummary::from_results(&results, Duration::ZERO).all_passed());
    }
}
