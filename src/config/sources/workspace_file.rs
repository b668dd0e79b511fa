//! Workspace config file source: casegen.toml and casegen.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Add workspace config files to builder.
/// Precedence: casegen.toml (base) then casegen.{CASEGEN_ENV}.toml when CASEGEN_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_root.join("casegen.toml");
    if base_config_path.exists() {
        builder = builder.add_source(File::from(base_config_path.as_path()).required(false));
    }

    if let Ok(env_name) = std::env::var("CASEGEN_ENV") {
        let env_config_path = workspace_root.join(format!("casegen.{}.toml", env_name));
        if env_config_path.exists() {
            builder = builder.add_source(File::from(env_config_path.as_path()).required(false));
        }
    }

    Ok(builder)
}
