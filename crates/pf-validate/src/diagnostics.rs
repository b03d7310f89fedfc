//! Per-run diagnostics sink
//!
//! Evaluators report through an injected [`Diagnostics`] rather than a global
//! logger so that runs can be correlated and tests can inspect what was said.

use log::Level;
use std::sync::Mutex;
use uuid::Uuid;

/// Receives diagnostic events raised while validating
pub trait Diagnostics: Send + Sync {
    /// Record one event about `test_case`
    fn record(&self, level: Level, test_case: &str, message: &str);

    /// Record a debug event
    fn debug(&self, test_case: &str, message: &str) {
        self.record(Level::Debug, test_case, message);
    }

    /// Record a warning
    fn warn(&self, test_case: &str, message: &str) {
        self.record(Level::Warn, test_case, message);
    }
}

/// Forwards events to the `log` facade, tagged with a per-run id
pub struct LogDiagnostics {
    run_id: Uuid,
}

impl LogDiagnostics {
    /// Create a sink with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }

    /// Id attached to every event of this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for LogDiagnostics {
    fn record(&self, level: Level, test_case: &str, message: &str) {
        log::log!(level, "[run {}] {}: {}", self.run_id, test_case, message);
    }
}

/// A recorded diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub level: Level,
    pub test_case: String,
    pub message: String,
}

/// Keeps events in memory
#[derive(Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events recorded for one test case
    pub fn for_test_case(&self, test_case: &str) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.test_case == test_case)
            .collect()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn record(&self, level: Level, test_case: &str, message: &str) {
        let event = DiagnosticEvent {
            level,
            test_case: test_case.to_string(),
            message: message.to_string(),
        };
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_diagnostics() {
        let diagnostics = CollectingDiagnostics::new();
        diagnostics.warn("a", "first");
        diagnostics.debug("b", "second");

        let events = diagnostics.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Level::Warn);
        assert_eq!(diagnostics.for_test_case("b")[0].message, "second");
    }

    #[test]
    fn test_log_diagnostics_run_ids_differ() {
        assert_ne!(LogDiagnostics::new().run_id(), LogDiagnostics::new().run_id());
    }
}
