//! Error handling for the CLI application

use std::fmt;
use std::path::PathBuf;

/// CLI-specific errors, wrapped in `anyhow` at the command boundary
#[derive(Debug)]
pub enum CliError {
    /// Invalid file pattern
    InvalidPattern(String),
    /// No input file matched
    NoInputFiles(Vec<String>),
    /// A JSONL line could not be parsed as a document
    InvalidRecord {
        /// Source file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },
    /// Configuration error
    ConfigError(String),
    /// Some documents failed
    DocumentFailures(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::NoInputFiles(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::InvalidRecord { path, line, reason } => {
                write!(f, "Invalid record at {}:{line}: {reason}", path.display())
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::DocumentFailures(count) => {
                write!(f, "{count} document(s) failed")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
