//! End-to-end run: inputs, prompt, generation, validation.
//!
//! Fatal problems (missing files, bad template) come back as `Err`. A
//! generation or validation failure is a normal [`RunOutcome`]: the run ends,
//! but cleanly.

use crate::error::{ApiError, GenerationError, ValidationError};
use crate::generation::{generate_with_retry, RetryPolicy, Sleeper, TokioSleeper};
use crate::prompt::{InputPaths, PromptContext};
use crate::provider::{CompletionOptions, ModelProviderClient};
use crate::validate::{parse_test_cases, ValidatedBatch};
use std::sync::Arc;
use tracing::{error, info};

/// How a run ended, short of a fatal error.
#[derive(Debug)]
pub enum RunOutcome {
    /// The model output parsed as an array of test cases (possibly empty).
    Generated(ValidatedBatch),
    /// No usable text after the retry budget, or an empty completion.
    GenerationFailed(GenerationError),
    /// Text came back but was not a JSON array of objects.
    ProcessingFailed(ValidationError),
}

impl RunOutcome {
    /// True when at least one test case was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Generated(batch) if !batch.is_empty())
    }
}

pub struct Pipeline {
    client: Box<dyn ModelProviderClient>,
    policy: RetryPolicy,
    options: CompletionOptions,
    sleeper: Arc<dyn Sleeper>,
}

impl Pipeline {
    pub fn new(
        client: Box<dyn ModelProviderClient>,
        policy: RetryPolicy,
        options: CompletionOptions,
    ) -> Self {
        Self {
            client,
            policy,
            options,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the backoff sleeper (tests use one that returns immediately).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Load the inputs from disk and run them.
    pub async fn run(&self, inputs: &InputPaths) -> Result<RunOutcome, ApiError> {
        let context = PromptContext::load(&inputs.prompt_file, &inputs.spec_file)?;
        self.run_with_context(&context).await
    }

    pub async fn run_with_context(&self, context: &PromptContext) -> Result<RunOutcome, ApiError> {
        let prompt = context.compose()?;

        let raw_output = match generate_with_retry(
            self.client.as_ref(),
            &prompt,
            &self.options,
            &self.policy,
            self.sleeper.as_ref(),
        )
        .await
        {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "Generation failed");
                return Ok(RunOutcome::GenerationFailed(err));
            }
        };

        match parse_test_cases(&raw_output) {
            Ok(batch) => {
                info!(
                    cases = batch.len(),
                    warnings = batch.warnings.len(),
                    "Parsed model output"
                );
                Ok(RunOutcome::Generated(batch))
            }
            Err(err) => {
                error!(error = %err, "Model output failed validation");
                Ok(RunOutcome::ProcessingFailed(err))
            }
        }
    }
}
