//! List command implementation

use anyhow::{Context, Result};
use clap::Subcommand;
use spanmark_core::{registry, LanguageConfigSource, LanguageConfigs};
use std::path::PathBuf;

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List registered signal names
    Signals,

    /// List configured languages
    Languages {
        /// External language configuration table
        #[arg(short = 'l', long, value_name = "FILE")]
        language_config: Option<PathBuf>,
    },
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Signals => {
                for name in registry().names() {
                    println!("{name}");
                }
            }
            ListCommands::Languages { language_config } => {
                let loaded;
                let languages: &dyn LanguageConfigSource = match language_config {
                    Some(path) => {
                        loaded = LanguageConfigs::try_from_path(path).with_context(|| {
                            format!("Failed to load language config: {}", path.display())
                        })?;
                        &loaded
                    }
                    None => LanguageConfigs::embedded(),
                };
                for code in languages.languages() {
                    let config = languages.config(&code);
                    let spaceless = if languages.is_spaceless(&code) {
                        "\tspaceless"
                    } else {
                        ""
                    };
                    println!("{code}\t{}\t{}{spaceless}", config.iso639_1, config.iso639_3);
                }
            }
        }
        Ok(())
    }
}
