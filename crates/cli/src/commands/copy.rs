use std::io::{self, Stderr, Stdout, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};
use shuttle_core::{CopyError, CopyReport, copy};
use shuttle_runtime::{
    DEFAULT_BATCH_SIZE, DEFAULT_SINK_HOST, DEFAULT_SOURCE_HOST, PROGRAM_BATCH, PROGRAM_SEED,
};
use shuttle_sim::sim_system;

use crate::printer::{HumanPrinter, JsonPrinter, OutcomePrinter, OutputFormat, PrinterConfig};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Print the outcome as a single JSON object
    #[arg(long)]
    pub json: bool,

    /// Also print records and batches copied (to stderr)
    #[arg(long, short = 's')]
    pub summary: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn OutcomePrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let cfg = PrinterConfig {
            format,
            show_summary: self.summary,
        };

        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Maximum records pulled before each flush
    #[arg(long, short = 'b', env = PROGRAM_BATCH, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch: usize,

    /// Seed for the simulated source; random when omitted
    #[arg(long, env = PROGRAM_SEED)]
    pub seed: Option<u64>,

    /// Host label of the simulated source
    #[arg(long, value_name = "HOST", default_value = DEFAULT_SOURCE_HOST)]
    pub source_host: String,

    /// Host label of the simulated sink
    #[arg(long, value_name = "HOST", default_value = DEFAULT_SINK_HOST)]
    pub sink_host: String,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: CopyArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e}");
            eprintln!("[copy] {e}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: CopyArgs) -> Result<ExitCode> {
    let outcome = run_copy(&args, io::stdout(), io::stdout());

    // A bad batch size is a usage error, not a copy outcome.
    if let Err(e @ CopyError::InvalidBatch) = outcome {
        return Err(e.into());
    }

    let mut printer = args.output.make_printer();
    printer.print_outcome(&outcome)?;

    // Failures are reported, not signalled through the exit status.
    Ok(ExitCode::SUCCESS)
}

/// Copy between the simulated endpoints, echoing pulls to `echo` and
/// stores to `out`.
fn run_copy<E: Write, O: Write>(args: &CopyArgs, echo: E, out: O) -> Result<CopyReport, CopyError> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "[copy] {} -> {} in batches of {}",
        args.source_host, args.sink_host, args.batch
    );

    let mut system = sim_system(&args.source_host, &args.sink_host, rng, echo, out);
    copy(&mut system, args.batch)
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod tests;
