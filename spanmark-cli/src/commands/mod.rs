//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod list;
pub mod tag;

pub use list::ListCommands;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tag JSONL documents with quality signals
    Tag(tag::TagArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Tag(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}
