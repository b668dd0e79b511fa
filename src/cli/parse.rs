//! CLI parse: clap types for casegen. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// casegen - generate structured test cases from a feature specification
#[derive(Parser, Debug)]
#[command(name = "casegen")]
#[command(about = "Generate structured test cases from a feature specification using a generative model")]
pub struct Cli {
    /// Prompt template containing a {spec} placeholder
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Feature specification to generate test cases for
    #[arg(long)]
    pub spec_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model name (overrides provider.model)
    #[arg(long)]
    pub model: Option<String>,

    /// Total generation attempts (overrides retry.max_attempts)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Enable verbose (debug) logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
