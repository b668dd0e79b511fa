//! Configuration System
//!
//! Layered configuration: built-in defaults, the user's global config file, a
//! workspace `casegen.toml`, `CASEGEN_*` environment variables, and finally
//! command-line overrides applied by the CLI.

use crate::error::ApiError;
use crate::generation::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::logging::LoggingConfig;
use crate::prompt::InputPaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

pub const DEFAULT_PROMPT_FILE: &str = "prompt_template.txt";
pub const DEFAULT_SPEC_FILE: &str = "spec.txt";
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseGenConfig {
    /// Model provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Retry policy for generation calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Input file locations
    #[serde(default)]
    pub inputs: InputsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubles after each further failure
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    #[serde(default = "default_prompt_file")]
    pub prompt_file: PathBuf,

    #[serde(default = "default_spec_file")]
    pub spec_file: PathBuf,
}

fn default_prompt_file() -> PathBuf {
    PathBuf::from(DEFAULT_PROMPT_FILE)
}

fn default_spec_file() -> PathBuf {
    PathBuf::from(DEFAULT_SPEC_FILE)
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            prompt_file: default_prompt_file(),
            spec_file: default_spec_file(),
        }
    }
}

impl InputsConfig {
    pub fn to_paths(&self) -> InputPaths {
        InputPaths {
            prompt_file: self.prompt_file.clone(),
            spec_file: self.spec_file.clone(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    Provider(String),
    Retry(String),
    Inputs(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ConfigValidationError::Retry(msg) => write!(f, "Retry: {}", msg),
            ConfigValidationError::Inputs(msg) => write!(f, "Inputs: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl CaseGenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ConfigValidationError::Provider(e));
        }

        if self.retry.max_attempts == 0 {
            errors.push(ConfigValidationError::Retry(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.inputs.prompt_file.as_os_str().is_empty() {
            errors.push(ConfigValidationError::Inputs(
                "prompt_file cannot be empty".to_string(),
            ));
        }
        if self.inputs.spec_file.as_os_str().is_empty() {
            errors.push(ConfigValidationError::Inputs(
                "spec_file cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all issues into a single [`ApiError::ConfigError`].
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
