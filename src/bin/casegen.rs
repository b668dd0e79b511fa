//! casegen CLI Binary
//!
//! Command-line entry point: load configuration, initialize logging, run one
//! generation, print the report.

use casegen::cli::{Cli, RunContext};
use casegen::config::{CaseGenConfig, ConfigLoader};
use casegen::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::path::Path;
use std::process;
use tracing::{debug, error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Values already present in the environment win over .env entries.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, config.logging.clone());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(
        provider = config.provider.kind.as_str(),
        model = %config.provider.model,
        "casegen starting"
    );
    if let Some(path) = ConfigLoader::global_config_path() {
        debug!(global_config = %path.display(), "Global configuration location");
    }

    let context = match RunContext::new(config, &cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("{}", casegen::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute().await {
        Ok(report) => {
            // Model-side failures are reported on stdout and still exit 0;
            // only fatal errors below change the exit status.
            println!("{}", report.output);
            if report.success {
                info!("Run completed successfully");
            } else {
                warn!("Run finished without test cases");
            }
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", casegen::cli::map_error(&e));
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<CaseGenConfig, config::ConfigError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(Path::new(".")),
    }
}

/// Build logging configuration from CLI args on top of the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
