//! ConfigLoader: the one entry point for assembling a [`CaseGenConfig`].

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::CaseGenConfig;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run rooted at `workspace_root`.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `casegen.toml`, workspace `casegen.{CASEGEN_ENV}.toml`, `CASEGEN_*` env vars.
    pub fn load(workspace_root: &Path) -> Result<CaseGenConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: CaseGenConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file. Global and workspace files are
    /// skipped; environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<CaseGenConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: CaseGenConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Location of the user-level config file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
