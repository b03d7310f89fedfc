//! Test case verdicts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCaseStatus {
    /// The rule holds
    Success,
    /// The rule is violated
    Failed,
    /// The rule could not be evaluated (missing profile data, query error)
    Aborted,
}

impl fmt::Display for TestCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestCaseStatus::Success => "Success",
            TestCaseStatus::Failed => "Failed",
            TestCaseStatus::Aborted => "Aborted",
        };
        f.write_str(s)
    }
}

/// Verdict for one test case at one execution date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    /// Execution date of the validation run (Unix seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Verdict status
    #[serde(rename = "testCaseStatus")]
    pub status: TestCaseStatus,

    /// Human-readable explanation naming the computed and expected values
    pub result: String,
}

impl TestCaseResult {
    /// Build a verdict
    pub fn new(timestamp: DateTime<Utc>, status: TestCaseStatus, result: impl Into<String>) -> Self {
        Self {
            timestamp,
            status,
            result: result.into(),
        }
    }

    /// `Success` when `passed`, `Failed` otherwise
    pub fn from_check(timestamp: DateTime<Utc>, passed: bool, result: impl Into<String>) -> Self {
        let status = if passed {
            TestCaseStatus::Success
        } else {
            TestCaseStatus::Failed
        };
        Self::new(timestamp, status, result)
    }

    /// Aborted verdict carrying the reason
    pub fn aborted(timestamp: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self::new(timestamp, TestCaseStatus::Aborted, reason)
    }

    /// True for `Success`
    pub fn is_success(&self) -> bool {
        self.status == TestCaseStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_check() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(
            TestCaseResult::from_check(ts, true, "ok").status,
            TestCaseStatus::Success
        );
        assert_eq!(
            TestCaseResult::from_check(ts, false, "bad").status,
            TestCaseStatus::Failed
        );
    }

    #[test]
    fn test_wire_format() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let verdict = TestCaseResult::aborted(ts, "no profile");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_i64);
        assert_eq!(json["testCaseStatus"], "Aborted");
        assert_eq!(json["result"], "no profile");

        let back: TestCaseResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, verdict);
    }
}
