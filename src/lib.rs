#![forbid(unsafe_code)]
//! quipu: an embeddable unit-test execution harness.
//!
//! Callers register named test callables and optional `setUp`/`tearDown`
//! hooks into a [`Context`]; the [`Harness`] discovers tests by the
//! `test` name prefix, runs them in binding order against a shared
//! mutable [`Scope`], and returns a [`RunSummary`] of per-test records.
//! [`run_suites`] batches several named contexts, with console and
//! JUnit-style XML reporting on top.
//!
//! ```
//! use quipu::{Context, Harness};
//!
//! let mut cx = Context::new();
//! cx.set_up(|scope| { scope.set("ready", true); Ok(()) });
//! cx.bind("testReady", |scope| {
//!     quipu::asserts::assert_true(scope.get_bool("ready").unwrap_or(false))
//! });
//!
//! let summary = Harness::new().run(&mut cx).unwrap();
//! assert_eq!((summary.attempted, summary.passed, summary.failed), (1, 1, 0));
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`;
//!   no `.unwrap()` or `.expect()`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Caught panics**: the harness converts a panicking test body into a
//!   recorded failure (`catch_unwind`); that is the one place panics are
//!   expected to cross, and only for test bodies; a panicking hook
//!   unwinds to the caller.

pub mod asserts;
pub mod context;
pub mod harness;
pub mod junit;
pub mod report;
pub mod reporter;
pub mod sample;
pub mod suite;

pub use context::{Context, SETUP, Scope, TEARDOWN, TEST_PREFIX, TestFn, Thrown};
pub use harness::{Harness, HarnessError, RunState, TeardownPolicy, TimingMode};
pub use report::{BatchSummary, Failure, Outcome, Record, RunSummary, SuiteResult};
pub use reporter::{ConsoleReporter, NullReporter, Reporter};
pub use suite::{Suite, SuiteError, run_suites};
