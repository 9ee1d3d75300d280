//! Set-associative cache simulator CLI.
//!
//! Replays a memory trace against a cache of the given geometry and prints
//! `hits:<n> misses:<n> evictions:<n>`. With `-v` every data record is echoed
//! together with the outcome of each line access it caused.

use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use csim_core::common::SimError;
use csim_core::config::{CacheConfig, ReplacementPolicy};
use csim_core::sim::TraceRecord;
use csim_core::{AccessOutcome, SimStats, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a memory trace against a set-associative cache and report hits, misses and evictions.\n\nGeometry may come from a JSON file (-c); -S, -K, -B and -p override it.\n\nExamples:\n  csim    -S 16  -K 1 -B 16 -p LRU -t traces/yi2.trace\n  csim -v -S 256 -K 2 -B 16 -p LRU -t traces/yi2.trace\n  csim -c l1.json -p FIFO -t traces/dave.trace --json"
)]
struct Cli {
    /// Print the outcome of every access.
    #[arg(short, long)]
    verbose: bool,

    /// Number of sets (must be a power of 2).
    #[arg(short = 'S', long = "sets", value_name = "NUM")]
    sets: Option<usize>,

    /// Number of lines per set.
    #[arg(short = 'K', long = "ways", value_name = "NUM")]
    ways: Option<usize>,

    /// Number of bytes per line (must be a power of 2).
    #[arg(short = 'B', long = "line-bytes", value_name = "NUM")]
    line_bytes: Option<usize>,

    /// Eviction policy (one of 'FIFO', 'LRU').
    #[arg(short = 'p', long, value_name = "POLICY")]
    policy: Option<ReplacementPolicy>,

    /// Trace file.
    #[arg(short = 't', long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// JSON cache configuration; command-line values take precedence.
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final statistics as a JSON object.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_failure_code(&e);
            let _ = e.print();
            process::exit(code);
        }
    };
    init_tracing();

    let Some(trace) = cli.trace.clone() else {
        eprintln!("ERROR: missing required trace file (-t <file>)");
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        process::exit(1);
    };

    match run(&cli, &trace) {
        Ok(stats) => print_summary(&stats, cli.json),
        Err(e) => {
            eprintln!("ERROR: {e}");
            if matches!(e, SimError::Config(_)) {
                eprintln!("Run csim --help for usage.");
            }
            process::exit(1);
        }
    }
}

/// Exit status for a command line clap did not turn into a `Cli`.
///
/// `--help` and `--version` succeed; every rejected option is a
/// configuration error.
fn parse_failure_code(err: &clap::Error) -> i32 {
    i32::from(err.use_stderr())
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merges the optional JSON file with command-line overrides.
fn build_config(cli: &Cli) -> Result<CacheConfig, SimError> {
    let mut config = match &cli.config {
        Some(path) => CacheConfig::from_json_file(path)?,
        None => CacheConfig::default(),
    };
    if let Some(sets) = cli.sets {
        config.sets = sets;
    }
    if let Some(ways) = cli.ways {
        config.ways = ways;
    }
    if let Some(line_bytes) = cli.line_bytes {
        config.line_bytes = line_bytes;
    }
    if cli.policy.is_some() {
        config.policy = cli.policy;
    }
    Ok(config)
}

/// Builds the simulator and replays the trace.
fn run(cli: &Cli, trace: &Path) -> Result<SimStats, SimError> {
    let config = build_config(cli)?;
    let mut sim = Simulator::new(&config)?;
    let verbose = cli.verbose;

    sim.run_file(trace, |record, outcomes| {
        if verbose && !outcomes.is_empty() {
            println!("{}", format_verbose(record, outcomes));
        }
    })
}

/// One verbose line: the record in trace syntax followed by each outcome.
fn format_verbose(record: &TraceRecord, outcomes: &[AccessOutcome]) -> String {
    let mut line = record.to_string();
    for outcome in outcomes {
        line.push(' ');
        line.push_str(&outcome.to_string());
    }
    line
}

fn print_summary(stats: &SimStats, json: bool) {
    if !json {
        println!("{stats}");
        return;
    }
    match serde_json::to_string(stats) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("ERROR: failed to encode statistics: {e}");
            process::exit(1);
        }
    }
}
