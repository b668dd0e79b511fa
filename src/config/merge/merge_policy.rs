//! Merge rules: defaults, override order, conflict handling.

use crate::config::{DEFAULT_BASE_DELAY_MS, DEFAULT_PROMPT_FILE, DEFAULT_SPEC_FILE};
use crate::generation::DEFAULT_MAX_ATTEMPTS;
use crate::provider::profile::{DEFAULT_API_KEY_ENV, DEFAULT_PROVIDER_MODEL, DEFAULT_TIMEOUT_SECS};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override earlier ones key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.kind", "gemini")?
        .set_default("provider.model", DEFAULT_PROVIDER_MODEL)?
        .set_default("provider.api_key_env", DEFAULT_API_KEY_ENV)?
        .set_default("provider.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
        .set_default("retry.max_attempts", i64::from(DEFAULT_MAX_ATTEMPTS))?
        .set_default("retry.base_delay_ms", DEFAULT_BASE_DELAY_MS as i64)?
        .set_default("inputs.prompt_file", DEFAULT_PROMPT_FILE)?
        .set_default("inputs.spec_file", DEFAULT_SPEC_FILE)
}
