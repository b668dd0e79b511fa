//! CLI route: turn parsed arguments and configuration into a pipeline run.

use crate::cli::parse::Cli;
use crate::cli::presentation::format_outcome;
use crate::config::CaseGenConfig;
use crate::error::ApiError;
use crate::pipeline::Pipeline;
use crate::provider::{ModelProviderClient, ProviderFactory};
use tracing::info;

/// What the binary prints and whether the run counts as a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: String,
    pub success: bool,
}

/// Fold command-line overrides into a loaded configuration.
pub fn apply_cli_overrides(config: &mut CaseGenConfig, cli: &Cli) {
    if let Some(ref path) = cli.prompt_file {
        config.inputs.prompt_file = path.clone();
    }
    if let Some(ref path) = cli.spec_file {
        config.inputs.spec_file = path.clone();
    }
    if let Some(ref model) = cli.model {
        config.provider.model = model.clone();
    }
    if let Some(attempts) = cli.max_attempts {
        config.retry.max_attempts = attempts;
    }
}

pub struct RunContext {
    config: CaseGenConfig,
}

impl RunContext {
    /// Apply CLI overrides and validate. Invalid configuration is fatal.
    pub fn new(mut config: CaseGenConfig, cli: &Cli) -> Result<Self, ApiError> {
        apply_cli_overrides(&mut config, cli);
        config.ensure_valid()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CaseGenConfig {
        &self.config
    }

    /// Resolve the credential, build the provider client, and run.
    pub async fn execute(&self) -> Result<RunReport, ApiError> {
        // Credential check happens before any file or network access.
        let client = ProviderFactory::from_config(&self.config.provider)?;
        self.execute_with_client(client).await
    }

    pub async fn execute_with_client(
        &self,
        client: Box<dyn ModelProviderClient>,
    ) -> Result<RunReport, ApiError> {
        info!(
            provider = client.provider_name(),
            model = client.model_name(),
            prompt_file = %self.config.inputs.prompt_file.display(),
            spec_file = %self.config.inputs.spec_file.display(),
            "Starting test case generation"
        );

        let pipeline = Pipeline::new(
            client,
            self.config.retry.to_policy(),
            self.config.provider.completion_options(),
        );
        let outcome = pipeline.run(&self.config.inputs.to_paths()).await?;

        Ok(RunReport {
            output: format_outcome(&outcome),
            success: outcome.is_success(),
        })
    }
}
