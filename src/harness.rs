//! The harness: one discover→run→report cycle over a [`Context`].
//!
//! Execution is fully sequential. `setUp` runs once before any test and
//! its failure aborts the run; a broken environment is not one more test
//! failure. Each test is invoked with the shared scope, timed, and
//! recorded whether it returns, errors, or panics. `tearDown` runs exactly
//! once after the last test, even when every test failed; its failure is
//! likewise fatal, but only after all records exist.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::context::{Binding, Context, SETUP, Scope, TEARDOWN, TEST_PREFIX, Thrown};
use crate::report::{Failure, Outcome, Record, RunSummary};
use crate::reporter::{NullReporter, Reporter};

/// Whether to measure per-test wall-clock time.
///
/// `Disabled` stores `None` in each record rather than a fabricated zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingMode {
    #[default]
    Wall,
    Disabled,
}

/// What to do with the collected records when `tearDown` fails.
///
/// The observed source behavior leaves this unspecified, so it is a
/// configuration knob rather than a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeardownPolicy {
    /// Carry the partial summary inside [`HarnessError::Teardown`].
    #[default]
    SurfaceRecords,
    /// Discard everything; the error is all the caller gets.
    DiscardRecords,
}

/// Phase of a run, for lifecycle logging. Terminal states are `Complete`
/// and the two aborts; there is no retry or re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    SettingUp,
    RunningTests,
    TearingDown,
    Complete,
    AbortedInSetup,
    AbortedInTeardown,
}

/// Fatal harness-level failures. Per-test failures never surface here;
/// they are absorbed into the [`RunSummary`].
#[derive(Debug, Error)]
pub enum HarnessError {
    /// `setUp` raised before any test ran. No summary exists.
    #[error("setUp failed: {0}")]
    Setup(Failure),
    /// `tearDown` raised after all tests ran and were recorded. The
    /// partial summary is carried per [`TeardownPolicy`].
    #[error("tearDown failed: {failure}")]
    Teardown {
        failure: Failure,
        summary: Option<RunSummary>,
    },
}

/// The test harness. Cheap to construct; one value can run any number of
/// contexts, one at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Harness {
    timing: TimingMode,
    teardown_policy: TeardownPolicy,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timing(mut self, mode: TimingMode) -> Self {
        self.timing = mode;
        self
    }

    pub fn teardown_policy(mut self, policy: TeardownPolicy) -> Self {
        self.teardown_policy = policy;
        self
    }

    /// Run the full lifecycle over a context, without progress reporting.
    pub fn run(&self, cx: &mut Context) -> Result<RunSummary, HarnessError> {
        self.run_with(cx, &mut NullReporter)
    }

    /// Run the full lifecycle, driving the reporter's per-test callbacks.
    pub fn run_with(
        &self,
        cx: &mut Context,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, HarnessError> {
        let mut state = RunState::NotStarted;
        debug!(state = ?state, "starting run");

        // Discovery happens fresh each run: scan the bindings in insertion
        // order for test-prefixed names and the two reserved hooks.
        let test_indices: Vec<usize> = cx
            .bindings
            .iter()
            .enumerate()
            .filter(|(_, b)| b.name.starts_with(TEST_PREFIX))
            .map(|(i, _)| i)
            .collect();
        let setup = cx.bindings.iter().position(|b| b.name == SETUP);
        let teardown = cx.bindings.iter().position(|b| b.name == TEARDOWN);

        let Context { bindings, scope } = cx;

        state = RunState::SettingUp;
        debug!(state = ?state, hook = setup.is_some(), "setting up");
        if let Some(i) = setup {
            if let Err(thrown) = (bindings[i].func)(scope) {
                state = RunState::AbortedInSetup;
                debug!(state = ?state, "setUp raised, aborting run");
                return Err(HarnessError::Setup(Failure::normalize(thrown)));
            }
        }

        state = RunState::RunningTests;
        debug!(state = ?state, tests = test_indices.len(), "running tests");
        let mut summary = RunSummary::default();
        for i in test_indices {
            let name = bindings[i].name.clone();
            reporter.on_test_start(&name);

            let timer = (self.timing == TimingMode::Wall).then(Instant::now);
            let outcome = match Self::invoke(&mut bindings[i], scope) {
                Ok(()) => Outcome::Passed,
                Err(thrown) => Outcome::Failed(Failure::normalize(thrown)),
            };
            let elapsed = timer.map(|t| t.elapsed());

            summary.attempted += 1;
            match outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
            let record = Record { name, outcome, elapsed };
            debug!(test = %record.name, passed = record.passed(), "test complete");
            reporter.on_test_complete(&record);
            summary.records.push(record);
        }

        state = RunState::TearingDown;
        debug!(state = ?state, hook = teardown.is_some(), "tearing down");
        if let Some(i) = teardown {
            if let Err(thrown) = (bindings[i].func)(scope) {
                state = RunState::AbortedInTeardown;
                debug!(state = ?state, "tearDown raised");
                let summary = match self.teardown_policy {
                    TeardownPolicy::SurfaceRecords => Some(summary),
                    TeardownPolicy::DiscardRecords => None,
                };
                return Err(HarnessError::Teardown {
                    failure: Failure::normalize(thrown),
                    summary,
                });
            }
        }

        state = RunState::Complete;
        debug!(
            state = ?state,
            attempted = summary.attempted,
            passed = summary.passed,
            failed = summary.failed,
            "run complete"
        );
        Ok(summary)
    }

    /// Invoke one test, converting a panic into a raised value so that
    /// every discovered test produces exactly one record. Scope sharing
    /// across tests is the documented contract, hence `AssertUnwindSafe`.
    fn invoke(binding: &mut Binding, scope: &mut Scope) -> Result<(), Thrown> {
        match panic::catch_unwind(AssertUnwindSafe(|| (binding.func)(scope))) {
            Ok(result) => result,
            Err(payload) => Err(thrown_from_panic(payload)),
        }
    }
}

#[derive(Debug, Error)]
#[error("test panicked with a non-string payload")]
struct OpaquePanic;

/// A `String`/`&str` panic payload takes the bare-string path (with the
/// origin marker); anything else becomes an opaque structured failure.
fn thrown_from_panic(payload: Box<dyn Any + Send>) -> Thrown {
    match payload.downcast::<String>() {
        Ok(message) => Thrown::Message(*message),
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => Thrown::Message((*message).to_string()),
            Err(_) => Thrown::error(OpaquePanic),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payload_string_becomes_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom".to_string());
        assert!(matches!(thrown_from_panic(payload), Thrown::Message(m) if m == "boom"));
    }

    #[test]
    fn panic_payload_str_becomes_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert!(matches!(thrown_from_panic(payload), Thrown::Message(m) if m == "boom"));
    }

    #[test]
    fn panic_payload_other_becomes_opaque_error() {
        let payload: Box<dyn Any + Send> = Box::new(1337_u32);
        match thrown_from_panic(payload) {
            Thrown::Error(err) => {
                assert_eq!(err.to_string(), "test panicked with a non-string payload");
            }
            other => panic!("expected structured error, got {:?}", other),
        }
    }
}
