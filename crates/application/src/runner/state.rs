//! Execution driver states

use std::fmt;

/// Where the driver is in its per-case cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing has started.
    Idle,
    /// Templates of the current case are being expanded.
    Resolving,
    /// The HTTP exchange is in flight.
    Dispatching,
    /// Values are being pulled from the response.
    Extracting,
    /// Extracted values are being compared and propagated.
    Asserting,
    /// The current case passed; moving to the next one.
    Advancing,
    /// Every selected case passed.
    Done,
    /// A case failed and the run stopped.
    Aborted,
}

impl RunState {
    /// Returns the state name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Dispatching => "dispatching",
            Self::Extracting => "extracting",
            Self::Asserting => "asserting",
            Self::Advancing => "advancing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(RunState::Dispatching.to_string(), "dispatching");
        assert_eq!(RunState::Aborted.to_string(), "aborted");
    }
}
