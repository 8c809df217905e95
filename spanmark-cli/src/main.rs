//! spanmark command-line entry point

use clap::Parser;
use spanmark_cli::commands::Commands;
use std::process::ExitCode;

/// Tag document corpora with span-based quality signals
#[derive(Debug, Parser)]
#[command(name = "spanmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
