//! `quipu` binary: run the bundled sample suites.
//!
//! Exits 0 when every test passed, 1 when any test failed, 2 on a
//! harness-level failure (a hook raised) or a reporting error.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quipu::sample::sample_suites;
use quipu::{ConsoleReporter, Harness, NullReporter, Reporter, SuiteError, run_suites};

#[derive(Parser, Debug)]
#[command(name = "quipu")]
#[command(version)]
#[command(about = "Run the bundled sample test suites", long_about = None)]
struct Cli {
    /// Verbose per-test output
    #[arg(short, long)]
    verbose: bool,

    /// Write JUnit-style XML reports to this directory
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Print the batch summary as JSON instead of console output
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, SuiteError> {
    let mut suites = sample_suites();
    let harness = Harness::new();

    let mut reporter: Box<dyn Reporter> = if cli.json {
        Box::new(NullReporter)
    } else {
        Box::new(ConsoleReporter::new(cli.verbose))
    };

    let batch = run_suites(&mut suites, &harness, reporter.as_mut(), cli.report_dir.as_deref())?;

    if cli.json {
        let rendered = serde_json::to_string_pretty(&batch)
            .map_err(|e| SuiteError::Report(std::io::Error::other(e)))?;
        println!("{}", rendered);
    }

    Ok(if batch.is_success() { 0 } else { 1 })
}
