//! Provider configuration as it appears in config files.

use super::{CompletionOptions, ModelProvider};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Supported provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAI => "openai",
        }
    }
}

/// Provider section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_kind")]
    pub kind: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override; the provider's public endpoint is used when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Whole-request timeout for a single attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_kind() -> ProviderType {
    ProviderType::Gemini
}

fn default_model() -> String {
    DEFAULT_PROVIDER_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            model: default_model(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if self.api_key_env.trim().is_empty() {
            return Err("api_key_env cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Endpoint must start with http:// or https:// (got '{}')",
                    endpoint
                ));
            }
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ApiError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ApiError::ConfigError(format!(
                "API key not found. Please set {} in your .env file or as an environment variable.",
                self.api_key_env
            ))),
        }
    }

    pub fn to_model_provider(&self, api_key: String) -> ModelProvider {
        match self.kind {
            ProviderType::Gemini => ModelProvider::Gemini {
                model: self.model.clone(),
                api_key,
                base_url: self.endpoint.clone(),
            },
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model: self.model.clone(),
                api_key,
                base_url: self.endpoint.clone(),
            },
        }
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        }
    }
}
