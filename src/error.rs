//! Error types for casegen.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level errors. Everything here except the provider variants aborts the run.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Required file not found: {}. Please ensure it exists.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid prompt template: {0}")]
    Template(#[from] TemplateError),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Prompt template rendering failures. Positions are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{name}}}' at position {position}")]
    UnknownPlaceholder { name: String, position: usize },

    #[error("empty placeholder '{{}}' at position {position}")]
    EmptyPlaceholder { position: usize },

    #[error("unmatched '{{' at position {position}")]
    UnmatchedOpen { position: usize },

    #[error("single '}}' at position {position} (use '}}}}' for a literal brace)")]
    UnmatchedClose { position: usize },
}

/// Outcome of a generation that did not produce usable text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Max retries reached after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last_error: Box<ApiError>,
    },
}

/// Structural problems with the model output. Missing fields are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Failed to decode JSON. The model's output was not valid JSON: {message}")]
    Decode {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Root element is not a JSON array (found {found})")]
    NotAnArray { found: &'static str },

    #[error("Test case at index {index} is not a JSON object (found {found})")]
    ElementNotObject { index: usize, found: &'static str },
}
