//! Tag command implementation

use crate::{
    config::PipelineConfig,
    error::CliError,
    input::{read_documents, resolve_inputs},
    output::{JsonlFormatter, OutputFormatter, TextFormatter},
    progress::TagProgress,
};
use anyhow::{Context, Result};
use clap::Args;
use spanmark_core::{LanguageConfigs, TaggerContext, WordLists};
use spanmark_engine::{DocumentFailure, Engine, EngineConfig, SignalSpec};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the tag command
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Input JSONL files, directories of them, or glob patterns
    #[arg(short, long, value_name = "PATH/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Signal to run (repeatable, appended to the config file's list)
    #[arg(short, long = "signal", value_name = "NAME")]
    pub signals: Vec<String>,

    /// Pipeline configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// External language configuration table
    #[arg(short = 'l', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Directory of naughty_words_<lang>.txt lists
    #[arg(long, value_name = "DIR")]
    pub word_lists: Option<PathBuf>,

    /// Number of worker threads (default: one per CPU)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "jsonl")]
    pub format: OutputFormat,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One attribute object per document
    Jsonl,
    /// Per-signal summary over the whole run
    Text,
}

impl TagArgs {
    /// Execute the tag command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting tagging");
        log::debug!("Arguments: {:?}", self);

        let pipeline = match &self.config {
            Some(path) => PipelineConfig::from_path(path)?,
            None => PipelineConfig::default(),
        };
        let engine = self.build_engine(pipeline)?;

        let files = resolve_inputs(&self.input)?;
        log::info!("Found {} file(s) to tag", files.len());

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlFormatter::new(writer)),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        };

        let mut progress = TagProgress::new(files.len(), self.quiet);

        let mut failures: Vec<DocumentFailure> = Vec::new();
        for path in &files {
            let documents = read_documents(path)?;
            let output = engine.process(&documents);
            for attributes in &output.documents {
                formatter.write_document(attributes)?;
            }
            progress.file_done(path, documents.len(), output.failures.len());
            failures.extend(output.failures);
        }

        formatter.finish()?;
        let totals = progress.finish();
        log::info!("Tagged {totals}");

        if failures.is_empty() {
            log::info!("Tagging completed successfully");
            return Ok(());
        }

        for failure in &failures {
            eprintln!(
                "failed: {} [{}] {}",
                failure.id, failure.signal, failure.error
            );
        }
        Err(CliError::DocumentFailures(failures.len()).into())
    }

    /// Merge command-line flags over the pipeline file and build the engine
    fn build_engine(&self, pipeline: PipelineConfig) -> Result<Engine> {
        let mut signals = pipeline.signals;
        signals.extend(self.signals.iter().map(SignalSpec::new));
        if signals.is_empty() {
            return Err(CliError::ConfigError(
                "no signals given; use --signal or a config file".to_string(),
            )
            .into());
        }

        let mut builder = EngineConfig::builder().signals(signals);
        if let Some(threads) = self.threads.or(pipeline.threads) {
            builder = builder.threads(threads);
        }
        let config = builder.build()?;

        let mut context = TaggerContext::default();
        if let Some(path) = self.language_config.as_ref().or(pipeline.language_config.as_ref()) {
            let languages = LanguageConfigs::try_from_path(path)
                .with_context(|| format!("Failed to load language config: {}", path.display()))?;
            context = context.with_languages(Arc::new(languages));
        }
        if let Some(dir) = self.word_lists.as_ref().or(pipeline.word_lists.as_ref()) {
            context = context.with_word_lists(Arc::new(WordLists::from_directory(dir)));
        }

        Ok(Engine::with_context(config, &context)?)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
