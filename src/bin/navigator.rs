//! CLI entry point for the trace navigator: loads a trace file written by
//! the tracer and drops into the interactive command loop.

use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;

use timetrace::loader;
use timetrace::navigator::Navigator;

/// Navigate a previously captured execution trace.
#[derive(Parser, Debug)]
#[command(name = "navigator", about = "Step, search, and set breakpoints over a captured execution trace")]
struct Cli {
    /// Path to the trace file produced by a tracer session.
    trace_file: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli.trace_file) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(trace_file: &str) -> anyhow::Result<i32> {
    println!("loading trace file: {trace_file}");
    let events = loader::load(trace_file)
        .map_err(|err| anyhow::anyhow!("cannot read trace file {trace_file}: {err}"))?;

    let mut navigator = match Navigator::new(events) {
        Some(navigator) => navigator,
        None => {
            println!("trace file is empty or invalid");
            return Ok(1);
        }
    };

    println!("loaded {} execution steps", navigator.len());

    let stdin = io::stdin();
    let mut input = BufReader::new(stdin.lock());
    Ok(navigator.run(&mut input))
}
