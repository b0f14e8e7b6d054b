//! doctest-report CLI
//!
//! Run a doctest test binary (or replay a captured log) and print
//! structured per-case results plus a summary.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use doctest_report::{DoctestRunner, RunConfig, TestSuite};

#[derive(Parser, Debug)]
#[command(name = "doctest-report")]
#[command(version)]
#[command(about = "Parse doctest binary output into structured test results")]
struct Cli {
    /// Path to the doctest test binary
    #[arg(required_unless_present = "replay")]
    program: Option<PathBuf>,

    /// Arguments passed through to the test binary
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,

    /// Parse a captured output log instead of running a binary
    #[arg(long, conflicts_with = "program")]
    replay: Option<PathBuf>,

    /// Only report cases whose name matches this regex
    #[arg(short = 'f', long)]
    filter: Option<String>,

    /// Echo every raw output line while parsing
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let suite = match run(cli) {
        Ok(suite) => suite,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("{}", suite.summary());

    if suite.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> anyhow::Result<TestSuite> {
    let filter = cli
        .filter
        .as_deref()
        .map(regex::Regex::new)
        .transpose()
        .context("invalid filter pattern")?;

    if let Some(ref log) = cli.replay {
        let file = File::open(log)
            .with_context(|| format!("failed to open log file: {}", log.display()))?;
        let mut config = RunConfig::new(log);
        config.filter = filter;
        config.verbose = cli.verbose;
        let suite = DoctestRunner::new(config)
            .replay(BufReader::new(file))
            .with_context(|| format!("failed to parse log file: {}", log.display()))?;
        return Ok(suite);
    }

    // clap guarantees program is present when --replay is absent
    let program = cli.program.expect("program argument");
    let mut config = RunConfig::new(&program);
    config.args = cli.args;
    config.filter = filter;
    config.verbose = cli.verbose;

    let suite = DoctestRunner::new(config)
        .run()
        .with_context(|| format!("failed to run test binary: {}", program.display()))?;
    Ok(suite)
}
