//! # tallybench - shared counter contention benchmark
//!
//! Usage:
//!   tallybench <num_threads> <num_iterations>
//!
//! `num_iterations` is the total across all threads. Prints one
//! `variant<TAB>value<TAB>elapsed_us` line per counter variant.
//!
//! Logging goes to stderr; set `RUST_LOG=info` to follow run phases.

use clap::Parser;
use std::process::ExitCode;
use tallybench::{BenchConfig, Driver, Result};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tallybench", version)]
#[command(about = "Compare mutex-guarded and fast-write shared counters under contention")]
struct Args {
    /// Number of worker threads
    num_threads: usize,

    /// Total increments across all worker threads
    num_iterations: u64,
}

fn run(args: &Args) -> Result<()> {
    let config = BenchConfig::new(args.num_threads, args.num_iterations)?;
    Driver::new(config).run(|report| println!("{}", report))?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _ = tallybench::logger::try_init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tallybench: {}", err);
            ExitCode::FAILURE
        }
    }
}
