//! Result model: normalized failures, per-test records, and run summaries.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::context::Thrown;

/// The canonical error shape stored in a failed [`Record`].
///
/// Every raised value is normalized into this shape before storage so
/// reporting layers see a uniform message / optional stack / origin
/// marker. Normalization never changes pass/fail accounting.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub message: String,
    /// Human-readable host stack trace, when the raised value carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Set when the raised value was a bare string, so renderers know
    /// there is no stack trace to look for.
    pub from_string: bool,
    /// The original structured error value, kept as-is.
    #[serde(skip)]
    pub payload: Option<Box<dyn StdError + Send + Sync>>,
}

impl Failure {
    /// Normalize a raised value into the canonical shape.
    pub fn normalize(thrown: Thrown) -> Self {
        match thrown {
            Thrown::Message(message) => Failure {
                message,
                stack: None,
                from_string: true,
                payload: None,
            },
            Thrown::Native { message, stack } => Failure {
                message,
                stack: Some(stack),
                from_string: false,
                payload: None,
            },
            Thrown::Error(err) => Failure {
                message: err.to_string(),
                stack: None,
                from_string: false,
                payload: Some(err),
            },
        }
    }

    /// Short classifier for report output (the JUnit `type` attribute).
    pub fn kind(&self) -> &'static str {
        if self.from_string {
            "assertion"
        } else if self.stack.is_some() {
            "native"
        } else {
            "error"
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of a single test case.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed(Failure),
}

/// One execution record per discovered test case.
#[derive(Debug, Serialize)]
pub struct Record {
    pub name: String,
    pub outcome: Outcome,
    /// Wall-clock duration of the invocation. `None` when the harness ran
    /// in no-timing mode (a sentinel, never a fabricated zero).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Duration>,
}

impl Record {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Passed => None,
        }
    }
}

/// Aggregate result of one harness run. Immutable once produced.
///
/// Records are ordered by the context's binding order; `attempted ==
/// passed + failed` always holds, and every discovered test case has
/// exactly one record.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub passed: usize,
    pub failed: usize,
    pub records: Vec<Record>,
}

impl RunSummary {
    /// Look up a record by test name.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Sum of the recorded elapsed times (zero in no-timing mode).
    pub fn total_elapsed(&self) -> Duration {
        self.records.iter().filter_map(|r| r.elapsed).sum()
    }
}

/// Per-suite slice of a [`BatchSummary`].
#[derive(Debug, Serialize)]
pub struct SuiteResult {
    pub name: String,
    pub summary: RunSummary,
}

/// Totals across a batch of suites.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub total_passed: usize,
    pub total_failed: usize,
    pub suites: Vec<SuiteResult>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.total_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn normalize_bare_string_sets_origin_marker() {
        let failure = Failure::normalize(Thrown::Message("boom".to_string()));
        assert_eq!(failure.message, "boom");
        assert!(failure.from_string);
        assert!(failure.stack.is_none());
        assert!(failure.payload.is_none());
        assert_eq!(failure.kind(), "assertion");
    }

    #[test]
    fn normalize_native_attaches_stack() {
        let failure = Failure::normalize(Thrown::Native {
            message: "ReferenceError: flarp is not defined".to_string(),
            stack: "  at suite.js:12\n  at suite.js:3".to_string(),
        });
        assert!(!failure.from_string);
        assert_eq!(failure.stack.as_deref(), Some("  at suite.js:12\n  at suite.js:3"));
        assert_eq!(failure.kind(), "native");
    }

    #[test]
    fn normalize_structured_keeps_payload() {
        let failure = Failure::normalize(Thrown::error(io::Error::new(
            io::ErrorKind::NotFound,
            "fixture missing",
        )));
        assert_eq!(failure.message, "fixture missing");
        assert!(!failure.from_string);
        let payload = failure.payload.as_ref().unwrap();
        assert!(payload.downcast_ref::<io::Error>().is_some());
        assert_eq!(failure.kind(), "error");
    }

    #[test]
    fn summary_lookup_and_totals() {
        let summary = RunSummary {
            attempted: 2,
            passed: 1,
            failed: 1,
            records: vec![
                Record {
                    name: "testA".to_string(),
                    outcome: Outcome::Passed,
                    elapsed: Some(Duration::from_millis(5)),
                },
                Record {
                    name: "testB".to_string(),
                    outcome: Outcome::Failed(Failure::normalize("nope".into())),
                    elapsed: Some(Duration::from_millis(7)),
                },
            ],
        };
        assert!(summary.record("testA").unwrap().passed());
        assert!(!summary.is_success());
        assert_eq!(summary.total_elapsed(), Duration::from_millis(12));
        assert!(summary.record("testC").is_none());
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = RunSummary {
            attempted: 1,
            passed: 0,
            failed: 1,
            records: vec![Record {
                name: "testBoom".to_string(),
                outcome: Outcome::Failed(Failure::normalize("boom".into())),
                elapsed: None,
            }],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["records"][0]["name"], "testBoom");
        assert_eq!(json["records"][0]["outcome"]["status"], "failed");
        assert_eq!(json["records"][0]["outcome"]["message"], "boom");
        // No-timing mode leaves the field out entirely.
        assert!(json["records"][0].get("elapsed").is_none());
    }
}
