//! Reporting, separated from execution.
//!
//! Implement [`Reporter`] to customize output format (JSON, TAP, etc.);
//! every callback has a default empty body so implementations only pick
//! up the events they care about. [`ConsoleReporter`] is the built-in
//! pytest-style console renderer.

use std::time::Instant;

use crate::report::{BatchSummary, Record, RunSummary};

/// Callbacks driven by the harness (per-test) and the suite runner
/// (per-suite and per-batch).
pub trait Reporter {
    /// Called before a suite's context starts running.
    fn on_suite_start(&mut self, _name: &str) {}

    /// Called immediately before a test is invoked.
    fn on_test_start(&mut self, _name: &str) {}

    /// Called with the finished record, before it enters the summary.
    fn on_test_complete(&mut self, _record: &Record) {}

    /// Called once a suite's summary exists.
    fn on_suite_complete(&mut self, _name: &str, _summary: &RunSummary) {}

    /// Called after the whole batch, with the aggregate totals.
    fn on_batch_complete(&mut self, _batch: &BatchSummary) {}
}

/// Discards every event. Used by [`Harness::run`](crate::Harness::run)
/// and by callers who only want the returned summary.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Default console reporter (pytest-style).
#[derive(Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
    started: Option<Instant>,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            started: None,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn on_suite_start(&mut self, name: &str) {
        self.started.get_or_insert_with(Instant::now);
        eprintln!("\x1b[1m=== suite {} ===\x1b[0m", name);
    }

    fn on_test_start(&mut self, name: &str) {
        if self.verbose {
            eprint!("{} ... ", name);
        }
    }

    fn on_test_complete(&mut self, record: &Record) {
        let millis = record.elapsed.map(|d| d.as_millis());
        let status = match (record.passed(), self.verbose) {
            (true, true) => match millis {
                Some(ms) => format!("\x1b[32mPASSED\x1b[0m ({}ms)", ms),
                None => "\x1b[32mPASSED\x1b[0m".to_string(),
            },
            (false, true) => match millis {
                Some(ms) => format!("\x1b[31mFAILED\x1b[0m ({}ms)", ms),
                None => "\x1b[31mFAILED\x1b[0m".to_string(),
            },
            (true, false) => "\x1b[32m.\x1b[0m".to_string(),
            (false, false) => "\x1b[31mF\x1b[0m".to_string(),
        };

        if self.verbose {
            eprintln!("{}", status);
        } else {
            eprint!("{}", status);
        }
    }

    fn on_suite_complete(&mut self, _name: &str, summary: &RunSummary) {
        if !self.verbose {
            eprintln!();
        }

        // Failure details, one block per failed test.
        for record in &summary.records {
            if let Some(failure) = record.failure() {
                eprintln!("\n\x1b[31m{}\x1b[0m", record.name);
                eprintln!("  {}", failure.message);
                if let Some(stack) = &failure.stack {
                    for line in stack.lines() {
                        eprintln!("  {}", line);
                    }
                }
            }
        }

        eprintln!(
            "{} test{}: \x1b[32m{} passed\x1b[0m, {}{} failed\x1b[0m",
            summary.attempted,
            if summary.attempted == 1 { "" } else { "s" },
            summary.passed,
            if summary.failed > 0 { "\x1b[31m" } else { "\x1b[32m" },
            summary.failed,
        );
        eprintln!();
    }

    fn on_batch_complete(&mut self, batch: &BatchSummary) {
        let elapsed = self
            .started
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        let color = if batch.is_success() { "\x1b[1;32m" } else { "\x1b[1;31m" };

        let mut parts = vec![format!("{} passed", batch.total_passed)];
        if batch.total_failed > 0 {
            parts.push(format!("{} failed", batch.total_failed));
        }

        eprintln!(
            "{}====== {} in {:.2}s ======\x1b[0m",
            color,
            parts.join(", "),
            elapsed
        );
    }
}
