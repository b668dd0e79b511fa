//! Global config file source: `<user config dir>/casegen/config.toml`
//! (`$XDG_CONFIG_HOME/casegen/config.toml` on Linux).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "casegen").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            builder = builder.add_source(File::from(global_path.as_path()).required(false));
        } else {
            debug!(
                config_path = %global_path.display(),
                "No global configuration file; using defaults"
            );
        }
    }
    Ok(builder)
}
