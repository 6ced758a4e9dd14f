//! Run results and progress reporting.

use litmus_domain::TestCase;
use thiserror::Error;

use super::state::RunState;
use crate::assertion::GetterOutcome;
use crate::error::RunError;

/// The outcome of one passing test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Resolved request URL, without query parameters.
    pub url: String,
    /// Response status code.
    pub status: u16,
    /// Header getter results followed by body getter results.
    pub getters: Vec<GetterOutcome>,
    /// Time spent on the case, in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Iterates over `(variable, value)` pairs written to the environment.
    pub fn propagated(&self) -> impl Iterator<Item = (&str, &str)> {
        self.getters
            .iter()
            .filter_map(|g| g.stored_as.as_deref().map(|name| (name, g.value.as_str())))
    }
}

/// The case that stopped the run and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test {name:?} failed: {error}")]
pub struct CaseFailure {
    /// Name of the failing case.
    pub name: String,
    /// The terminal error.
    #[source]
    pub error: RunError,
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Cases that passed, in execution order.
    pub passed: Vec<CaseReport>,
    /// The failure that aborted the run, if any.
    pub failure: Option<CaseFailure>,
    /// Terminal state: `Done` or `Aborted`.
    pub state: RunState,
    /// Total run time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Returns true if every selected case passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the number of cases that executed, including a failed one.
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.passed.len() + usize::from(self.failure.is_some())
    }
}

/// Receives progress events while a run executes.
///
/// Every method has an empty default so observers only implement what
/// they display.
pub trait RunObserver {
    /// A case passed the name filter and is about to resolve.
    fn case_started(&mut self, _case: &TestCase) {}

    /// A case resolved; `url` is the URL about to be requested.
    fn case_resolved(&mut self, _name: &str, _url: &str) {}

    /// A getter wrote `value` into the environment as `name`.
    fn variable_set(&mut self, _name: &str, _value: &str) {}

    /// A case passed.
    fn case_passed(&mut self, _report: &CaseReport) {}

    /// A case failed; the run stops after this call.
    fn case_failed(&mut self, _failure: &CaseFailure) {}
}

/// An observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpClientError;
    use pretty_assertions::assert_eq;

    fn report(name: &str) -> CaseReport {
        CaseReport {
            name: name.to_string(),
            url: "http://x".to_string(),
            status: 200,
            getters: vec![
                GetterOutcome {
                    path: "id".to_string(),
                    value: "7".to_string(),
                    stored_as: Some("user_id".to_string()),
                },
                GetterOutcome {
                    path: "name".to_string(),
                    value: "a".to_string(),
                    stored_as: None,
                },
            ],
            duration_ms: 3,
        }
    }

    #[test]
    fn test_propagated_values() {
        let report = report("t");
        assert_eq!(report.propagated().collect::<Vec<_>>(), vec![("user_id", "7")]);
    }

    #[test]
    fn test_executed_count() {
        let ok = RunReport {
            passed: vec![report("a")],
            failure: None,
            state: RunState::Done,
            duration_ms: 5,
        };
        assert!(ok.is_success());
        assert_eq!(ok.executed_count(), 1);

        let failure = CaseFailure {
            name: "b".to_string(),
            error: RunError::PerformingRequest(HttpClientError::Timeout { timeout_ms: 1000 }),
        };
        let failed = RunReport {
            passed: vec![report("a")],
            failure: Some(failure),
            state: RunState::Aborted,
            duration_ms: 5,
        };
        assert_eq!(failed.executed_count(), 2);
        assert!(!failed.is_success());
    }

    #[test]
    fn test_failure_message() {
        let failure = CaseFailure {
            name: "status".to_string(),
            error: RunError::StatusMismatch {
                expected: 200,
                actual: 500,
            },
        };
        assert_eq!(
            failure.to_string(),
            "test \"status\" failed: expected response code: 200 (OK), but got: 500 (Internal Server Error)"
        );
    }
}
