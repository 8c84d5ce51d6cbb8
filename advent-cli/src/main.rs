//! `advent`: run registered puzzle solvers and report answers with timings

mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logger;
mod output;

// Linking the solutions crate submits its solver plugins
use advent_solutions as _;

use advent_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::Executor;
use output::Printer;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let outcome = run(Args::parse(), std::io::stdout().lock());
    if let Err(e) = &outcome {
        eprintln!("Error: {e}");
    }
    ExitCode::from(exit_status(&outcome))
}

/// Process exit status: 0 only when every selected part was solved
fn exit_status(outcome: &Result<bool, CliError>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

/// Run every selected solver, writing the report to `out`
///
/// Returns `Ok(false)` when any part failed. Configuration problems and
/// unregistered days are errors raised before anything is written.
fn run<W: Write>(args: Args, mut out: W) -> Result<bool, CliError> {
    let config = Config::from_args(args)?;
    logger::init(config.verbose);
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    debug!(solvers = registry.len(), years = ?registry.years(), "built registry");

    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;
    let work_items = executor.collect_work_items()?;
    if work_items.is_empty() {
        writeln!(out, "No solvers match the selected filters.")?;
        return Ok(true);
    }

    let expected: Vec<_> = work_items
        .iter()
        .flat_map(|w| w.parts.iter().map(move |&part| (w.year, w.day, part)))
        .collect();
    let mut printer = Printer::new(out, config.quiet, expected);

    let (tx, rx) = std::sync::mpsc::channel();
    let worker = std::thread::spawn(move || executor.execute(work_items, tx));
    for result in rx {
        printer.accept(result)?;
    }
    worker
        .join()
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))??;

    Ok(printer.finish()?)
}

/// Registry of every linked plugin carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();
    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };
    Ok(builder.build())
}
