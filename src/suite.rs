//! Batch execution over a set of named suites.
//!
//! A [`Suite`] pairs a name with a [`Context`]; the runner executes each
//! suite through one [`Harness`], logs per-suite counts and failure
//! details, optionally writes a JUnit-style XML report per suite, and
//! accumulates totals across the batch. A hook failure in any suite is a
//! hard stop for the whole batch.

use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::context::Context;
use crate::harness::{Harness, HarnessError};
use crate::junit;
use crate::report::{BatchSummary, SuiteResult};
use crate::reporter::Reporter;

/// A named context, conceptually one test file.
pub struct Suite {
    pub name: String,
    pub context: Context,
}

impl Suite {
    pub fn new(name: impl Into<String>, context: Context) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

#[derive(Debug, Error)]
pub enum SuiteError {
    /// A lifecycle hook failed in one of the suites.
    #[error("suite '{suite}': {source}")]
    Harness {
        suite: String,
        #[source]
        source: HarnessError,
    },
    /// Writing a report file failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

/// Run every suite, sorted by name, and return the batch totals.
///
/// When `report_dir` is given, a `TEST-<suite>.xml` file is written per
/// suite as it finishes, so reports for completed suites survive a later
/// hard stop.
pub fn run_suites(
    suites: &mut [Suite],
    harness: &Harness,
    reporter: &mut dyn Reporter,
    report_dir: Option<&Path>,
) -> Result<BatchSummary, SuiteError> {
    suites.sort_by(|a, b| a.name.cmp(&b.name));

    let mut batch = BatchSummary::default();
    for suite in suites.iter_mut() {
        info!(suite = %suite.name, "running suite");
        reporter.on_suite_start(&suite.name);

        let summary = harness
            .run_with(&mut suite.context, reporter)
            .map_err(|source| SuiteError::Harness {
                suite: suite.name.clone(),
                source,
            })?;

        info!(
            "  {} test{}: {} passed, {} failed",
            summary.attempted,
            if summary.attempted == 1 { "" } else { "s" },
            summary.passed,
            summary.failed
        );
        for record in &summary.records {
            if let Some(failure) = record.failure() {
                error!("{}() FAILED: {}", record.name, failure);
                if let Some(stack) = &failure.stack {
                    for line in stack.lines() {
                        error!("{}", line);
                    }
                }
            }
        }

        if let Some(dir) = report_dir {
            junit::write_report(dir, &suite.name, &summary)?;
        }

        reporter.on_suite_complete(&suite.name, &summary);
        batch.total_passed += summary.passed;
        batch.total_failed += summary.failed;
        batch.suites.push(SuiteResult {
            name: suite.name.clone(),
            summary,
        });
    }

    if batch.total_failed > 0 {
        info!(
            "total tests passed: {}, total tests FAILED: {}",
            batch.total_passed, batch.total_failed
        );
    } else {
        info!("total tests passed: {}", batch.total_passed);
    }
    reporter.on_batch_complete(&batch);
    Ok(batch)
}
