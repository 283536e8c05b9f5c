//! JUnit-style XML report files, one `TEST-<suite>.xml` per suite.
//!
//! The layout matches what CI report collectors expect: a `testsuite`
//! element with test/failure counts and total time, one `testcase` per
//! record, and a `failure` child (message plus optional stack body) for
//! each failed test. Times are seconds with millisecond precision; a
//! record without an elapsed time (no-timing mode) gets no `time`
//! attribute rather than a fabricated zero.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::report::RunSummary;

/// Write the report file for one suite, creating the directory if needed.
/// Returns the path of the written file.
pub fn write_report(dir: &Path, suite: &str, summary: &RunSummary) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("TEST-{}.xml", suite));
    fs::write(&path, render(suite, summary))?;
    Ok(path)
}

fn render(suite: &str, summary: &RunSummary) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<testsuite tests=\"{}\" failures=\"{}\" name=\"{}\" timestamp=\"{}\" time=\"{:.3}\">\n",
        summary.attempted,
        summary.failed,
        escape(suite),
        Local::now().format("%Y-%m-%dT%H:%M:%S"),
        summary.total_elapsed().as_secs_f64(),
    ));

    for record in &summary.records {
        let time_attr = record
            .elapsed
            .map(|d| format!(" time=\"{:.3}\"", d.as_secs_f64()))
            .unwrap_or_default();
        match record.failure() {
            None => {
                xml.push_str(&format!(
                    "  <testcase classname=\"{}\" name=\"{}\"{}/>\n",
                    escape(suite),
                    escape(&record.name),
                    time_attr,
                ));
            }
            Some(failure) => {
                xml.push_str(&format!(
                    "  <testcase classname=\"{}\" name=\"{}\"{}>\n",
                    escape(suite),
                    escape(&record.name),
                    time_attr,
                ));
                let mut body = failure.message.clone();
                if let Some(stack) = &failure.stack {
                    body.push('\n');
                    body.push_str(stack);
                }
                xml.push_str(&format!(
                    "    <failure type=\"{}\" message=\"{}\">{}</failure>\n",
                    failure.kind(),
                    escape(&failure.message),
                    escape(&body),
                ));
                xml.push_str("  </testcase>\n");
            }
        }
    }

    xml.push_str("</testsuite>\n");
    xml
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Failure, Outcome, Record};
    use std::time::Duration;

    fn summary_with_failure() -> RunSummary {
        RunSummary {
            attempted: 2,
            passed: 1,
            failed: 1,
            records: vec![
                Record {
                    name: "testFine".to_string(),
                    outcome: Outcome::Passed,
                    elapsed: Some(Duration::from_millis(12)),
                },
                Record {
                    name: "testBoom".to_string(),
                    outcome: Outcome::Failed(Failure::normalize("expected <a> but was <b>".into())),
                    elapsed: Some(Duration::from_millis(3)),
                },
            ],
        }
    }

    #[test]
    fn render_counts_and_cases() {
        let xml = render("basic", &summary_with_failure());
        assert!(xml.contains("<testsuite tests=\"2\" failures=\"1\" name=\"basic\""));
        assert!(xml.contains("<testcase classname=\"basic\" name=\"testFine\" time=\"0.012\"/>"));
        assert!(xml.contains("<testcase classname=\"basic\" name=\"testBoom\" time=\"0.003\">"));
        assert!(xml.contains("<failure type=\"assertion\""));
        assert!(xml.ends_with("</testsuite>\n"));
    }

    #[test]
    fn render_escapes_markup() {
        let xml = render("basic", &summary_with_failure());
        assert!(xml.contains("message=\"expected &lt;a&gt; but was &lt;b&gt;\""));
        assert!(!xml.contains("expected <a>"));
    }

    #[test]
    fn escape_covers_all_special_chars() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn native_failure_body_includes_stack() {
        let summary = RunSummary {
            attempted: 1,
            passed: 0,
            failed: 1,
            records: vec![Record {
                name: "testRef".to_string(),
                outcome: Outcome::Failed(Failure::normalize(crate::Thrown::Native {
                    message: "ReferenceError".to_string(),
                    stack: "at suite:4".to_string(),
                })),
                elapsed: None,
            }],
        };
        let xml = render("native", &summary);
        assert!(xml.contains("<failure type=\"native\" message=\"ReferenceError\">ReferenceError\nat suite:4</failure>"));
    }

    #[test]
    fn untimed_record_omits_the_time_attribute() {
        let summary = RunSummary {
            attempted: 1,
            passed: 1,
            failed: 0,
            records: vec![Record {
                name: "testUntimed".to_string(),
                outcome: Outcome::Passed,
                elapsed: None,
            }],
        };
        let xml = render("untimed", &summary);
        // No time attribute on the testcase element at all.
        assert!(xml.contains("<testcase classname=\"untimed\" name=\"testUntimed\"/>"));
        // The suite-level aggregate attribute is still present.
        assert!(xml.contains("<testsuite tests=\"1\" failures=\"0\" name=\"untimed\""));
    }
}
