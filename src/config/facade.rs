//! Config loading entry points.

use std::path::{Path, PathBuf};

use config::{Environment, File};
use tracing::debug;

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::ViewGridConfig;
use crate::error::GridError;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Sources, later wins: defaults, global file, `config/config.toml`,
    /// `config/{VIEWGRID_ENV}.toml`, then `VIEWGRID__SECTION__KEY` variables.
    pub fn load(workspace_root: &Path) -> Result<ViewGridConfig, GridError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<ViewGridConfig>()?;

        debug!(
            workspace = %workspace_root.display(),
            rows = config.grid.default_rows,
            cols = config.grid.default_cols,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<ViewGridConfig, GridError> {
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize::<ViewGridConfig>()?;
        Ok(config)
    }

    /// Global config file location, whether or not it exists.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Default configuration without touching the filesystem.
    pub fn default() -> ViewGridConfig {
        ViewGridConfig::default()
    }

    fn environment() -> Environment {
        Environment::with_prefix("VIEWGRID")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("presentation.providers")
    }
}
