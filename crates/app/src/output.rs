//! Console reporting.
//!
//! Prints one line per event:
//!
//! ```text
//! [TEST] create user - http://example.com/users
//!     [SET]  u-7 -> user_id
//!     [PASS]
//! [TEST] fetch user - http://example.com/users/u-7
//!     [FAIL] expected response code: 200 (OK), but got: 404 (Not Found)
//! ```

use std::io::{self, Write};

use litmus_application::{CaseFailure, CaseReport, RunObserver, RunReport};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// A [`RunObserver`] that prints colored progress lines.
///
/// Write failures never stop the run; the first one is logged and the rest
/// are dropped.
pub struct ConsoleObserver<W> {
    out: W,
    write_failed: bool,
}

impl ConsoleObserver<StandardStream> {
    /// Writes to stdout, coloring only when it is a terminal.
    pub fn stdout() -> Self {
        Self::new(StandardStream::stdout(ColorChoice::Auto))
    }
}

impl<W: WriteColor> ConsoleObserver<W> {
    /// Writes to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    /// Prints the closing line of a run.
    pub fn summary(&mut self, report: &RunReport) {
        let (color, label) = if report.is_success() {
            (Color::Green, "DONE")
        } else {
            (Color::Red, "ABORTED")
        };
        let rest = format!(
            " {} of {} passed in {}ms",
            report.passed.len(),
            report.executed_count(),
            report.duration_ms
        );
        self.line("", color, label, &rest);
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, indent: &str, color: Color, label: &str, rest: &str) {
        if let Err(error) = self.write_line(indent, color, label, rest) {
            if !self.write_failed {
                tracing::warn!(%error, "cannot write to console");
            }
            self.write_failed = true;
        }
    }

    fn write_line(&mut self, indent: &str, color: Color, label: &str, rest: &str) -> io::Result<()> {
        write!(self.out, "{indent}")?;
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.out, "[{label}]")?;
        self.out.reset()?;
        writeln!(self.out, "{rest}")
    }
}

impl<W: WriteColor> RunObserver for ConsoleObserver<W> {
    fn case_resolved(&mut self, name: &str, url: &str) {
        self.line("", Color::Blue, "TEST", &format!(" {name} - {url}"));
    }

    fn variable_set(&mut self, name: &str, value: &str) {
        self.line("\t", Color::Yellow, "SET", &format!("  {value} -> {name}"));
    }

    fn case_passed(&mut self, _report: &CaseReport) {
        self.line("\t", Color::Green, "PASS", "");
    }

    fn case_failed(&mut self, failure: &CaseFailure) {
        self.line("\t", Color::Red, "FAIL", &format!(" {}", failure.error));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use litmus_application::{RunError, RunState};
    use pretty_assertions::assert_eq;
    use termcolor::Buffer;

    fn output(observer: ConsoleObserver<Buffer>) -> String {
        String::from_utf8(observer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_passing_case_lines() {
        let mut observer = ConsoleObserver::new(Buffer::no_color());
        let report = CaseReport {
            name: "create".to_string(),
            url: "http://x/users".to_string(),
            status: 201,
            getters: Vec::new(),
            duration_ms: 1,
        };

        observer.case_resolved("create", "http://x/users");
        observer.variable_set("user_id", "u-7");
        observer.case_passed(&report);

        assert_eq!(
            output(observer),
            "[TEST] create - http://x/users\n\t[SET]  u-7 -> user_id\n\t[PASS]\n"
        );
    }

    #[test]
    fn test_failure_and_summary() {
        let mut observer = ConsoleObserver::new(Buffer::no_color());
        let failure = CaseFailure {
            name: "fetch".to_string(),
            error: RunError::StatusMismatch {
                expected: 200,
                actual: 404,
            },
        };

        observer.case_failed(&failure);
        observer.summary(&RunReport {
            passed: Vec::new(),
            failure: Some(failure),
            state: RunState::Aborted,
            duration_ms: 12,
        });

        assert_eq!(
            output(observer),
            "\t[FAIL] expected response code: 200 (OK), but got: 404 (Not Found)\n\
             [ABORTED] 0 of 1 passed in 12ms\n"
        );
    }

    #[test]
    fn test_successful_summary() {
        let mut observer = ConsoleObserver::new(Buffer::no_color());
        observer.summary(&RunReport {
            passed: Vec::new(),
            failure: None,
            state: RunState::Done,
            duration_ms: 3,
        });

        assert_eq!(output(observer), "[DONE] 0 of 0 passed in 3ms\n");
    }

    /// A console whose every write fails.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl WriteColor for BrokenPipe {
        fn supports_color(&self) -> bool {
            false
        }

        fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
            Ok(())
        }

        fn reset(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failures_do_not_stop_reporting() {
        let mut observer = ConsoleObserver::new(BrokenPipe);
        assert!(!observer.write_failed);

        observer.case_resolved("create", "http://x/users");
        assert!(observer.write_failed);

        observer.variable_set("user_id", "u-7");
        observer.summary(&RunReport {
            passed: Vec::new(),
            failure: None,
            state: RunState::Done,
            duration_ms: 1,
        });
        assert!(observer.write_failed);
    }
}
