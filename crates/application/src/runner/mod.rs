//! Test execution.
//!
//! The [`TestRunner`] drives an ordered sequence of test cases through
//! resolution, dispatch, extraction and assertion, stopping at the first
//! failure.

mod driver;
mod report;
mod state;

pub use driver::{RunOptions, TestRunner};
pub use report::{CaseFailure, CaseReport, NoopObserver, RunObserver, RunReport};
pub use state::RunState;
