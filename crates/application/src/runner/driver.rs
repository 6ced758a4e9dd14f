//! Execution driver
//!
//! Runs test cases strictly in order: resolve, dispatch, extract, assert,
//! advance. The first error aborts the run.

use std::time::Instant;

use litmus_domain::{Environment, GetterConfig, GetterSource, TestCase};

use super::report::{CaseFailure, CaseReport, NoopObserver, RunObserver, RunReport};
use super::state::RunState;
use crate::assertion::{GetterError, GetterOutcome, check_value};
use crate::error::{RunError, RunResult};
use crate::extract::{BodyExtractor, Extractor, ExtractorRegistry, HeaderExtractor};
use crate::ports::{HttpClient, HttpRequest, HttpResponse};
use crate::variable_resolver::TemplateResolver;

/// Options that select which cases run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Only cases with exactly this name run. Empty runs every case.
    /// Every case sharing the name runs, not just the first.
    pub name_filter: String,
}

impl RunOptions {
    /// Restricts the run to cases named `name`.
    #[must_use]
    pub fn with_name_filter(mut self, name: impl Into<String>) -> Self {
        self.name_filter = name.into();
        self
    }
}

/// Drives test cases against an [`HttpClient`].
///
/// The environment is passed in by the caller and mutated in place; values
/// propagated by one case are visible to every later case and are never
/// rolled back.
#[derive(Debug)]
pub struct TestRunner<C> {
    client: C,
    registry: ExtractorRegistry,
    options: RunOptions,
}

impl<C: HttpClient> TestRunner<C> {
    /// Creates a runner with the default (JSON) decoder registry.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            registry: ExtractorRegistry::default(),
            options: RunOptions::default(),
        }
    }

    /// Replaces the body decoder registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the run options.
    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every selected case in order, stopping at the first failure.
    pub async fn run<I>(&self, cases: I, env: &mut Environment) -> RunReport
    where
        I: IntoIterator<Item = TestCase>,
    {
        self.run_with_observer(cases, env, &mut NoopObserver).await
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    pub async fn run_with_observer<I>(
        &self,
        cases: I,
        env: &mut Environment,
        observer: &mut dyn RunObserver,
    ) -> RunReport
    where
        I: IntoIterator<Item = TestCase>,
    {
        let started = Instant::now();
        let mut state = RunState::Idle;
        let mut passed = Vec::new();

        let selected = cases
            .into_iter()
            .filter(|case| case.matches_name(&self.options.name_filter));

        for case in selected {
            observer.case_started(&case);

            match self
                .execute_case(&case, Some(&mut *env), observer, &mut state)
                .await
            {
                Ok(report) => {
                    transition(&mut state, RunState::Advancing, &case.name);
                    tracing::info!(case = %case.name, status = report.status, "test passed");
                    observer.case_passed(&report);
                    passed.push(report);
                }
                Err(error) => {
                    transition(&mut state, RunState::Aborted, &case.name);
                    let failure = CaseFailure {
                        name: case.name.clone(),
                        error,
                    };
                    tracing::warn!(error = %failure, "run aborted");
                    observer.case_failed(&failure);

                    return RunReport {
                        passed,
                        failure: Some(failure),
                        state,
                        duration_ms: elapsed_ms(started),
                    };
                }
            }
        }

        transition(&mut state, RunState::Done, "");
        RunReport {
            passed,
            failure: None,
            state,
            duration_ms: elapsed_ms(started),
        }
    }

    /// Runs a single case regardless of the name filter.
    ///
    /// With `env` set to `None` templates resolve against an empty
    /// environment and any propagation fails.
    ///
    /// # Errors
    ///
    /// Returns the [`RunError`] that stopped the case.
    pub async fn run_case(
        &self,
        case: &TestCase,
        env: Option<&mut Environment>,
    ) -> RunResult<CaseReport> {
        let mut state = RunState::Idle;
        self.execute_case(case, env, &mut NoopObserver, &mut state)
            .await
    }

    async fn execute_case(
        &self,
        case: &TestCase,
        mut env: Option<&mut Environment>,
        observer: &mut dyn RunObserver,
        state: &mut RunState,
    ) -> RunResult<CaseReport> {
        let started = Instant::now();

        transition(state, RunState::Resolving, &case.name);
        let resolved = {
            let empty = Environment::new();
            let vars = env.as_deref().unwrap_or(&empty);
            TemplateResolver::new(vars).resolve_case(case)?
        };
        observer.case_resolved(&resolved.name, &resolved.url);
        tracing::info!(case = %resolved.name, method = %resolved.method, url = %resolved.url, "running test");

        transition(state, RunState::Dispatching, &case.name);
        let request = HttpRequest::from(&resolved);
        let HttpResponse {
            status,
            headers,
            body,
        } = self.client.execute(&request).await?;

        if resolved.wants_code != 0 && resolved.wants_code != status {
            return Err(RunError::StatusMismatch {
                expected: resolved.wants_code,
                actual: status,
            });
        }

        let mut outcomes = Vec::with_capacity(resolved.getters.len());

        for getter in resolved.getters_for(GetterSource::Header) {
            let outcome = run_getter(
                &HeaderExtractor,
                getter,
                &headers,
                env.as_deref_mut(),
                observer,
                state,
            )
            .map_err(RunError::ExtractingHeader)?;
            outcomes.push(outcome);
        }

        let body_getters: Vec<&GetterConfig> = resolved.getters_for(GetterSource::Body).collect();
        if !body_getters.is_empty() {
            let decoder = self
                .registry
                .select(headers.content_type())
                .map_err(|e| RunError::ExtractingBody(e.into()))?;
            let bytes = body.read_all().await.map_err(RunError::ReadingBody)?;
            let document = decoder
                .decode(&bytes)
                .map_err(|e| RunError::ExtractingBody(e.into()))?;

            for getter in body_getters {
                let outcome = run_getter(
                    &BodyExtractor,
                    getter,
                    &*document,
                    env.as_deref_mut(),
                    observer,
                    state,
                )
                .map_err(RunError::ExtractingBody)?;
                outcomes.push(outcome);
            }
        }

        Ok(CaseReport {
            name: resolved.name,
            url: resolved.url,
            status,
            getters: outcomes,
            duration_ms: elapsed_ms(started),
        })
    }
}

fn run_getter<S: ?Sized>(
    extractor: &dyn Extractor<S>,
    getter: &GetterConfig,
    source: &S,
    env: Option<&mut Environment>,
    observer: &mut dyn RunObserver,
    state: &mut RunState,
) -> Result<GetterOutcome, GetterError> {
    transition(state, RunState::Extracting, &getter.path);
    let value = extractor.get(getter, source)?;

    transition(state, RunState::Asserting, &getter.path);
    let outcome = check_value(getter, value, env)?;
    if let Some(name) = &outcome.stored_as {
        observer.variable_set(name, &outcome.value);
    }

    Ok(outcome)
}

fn transition(state: &mut RunState, next: RunState, subject: &str) {
    tracing::trace!(from = %state, to = %next, subject, "state transition");
    *state = next;
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
