use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::CopyArgs;
use shuttle_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Copy records from a simulated source to a simulated sink in batches"
)]
pub struct Cli {
    #[command(flatten)]
    pub copy: CopyArgs,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::copy::run(cli.copy)
}
