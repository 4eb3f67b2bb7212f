//! Merge rules: defaults and override order.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::presentation::BUILTIN_KINDS;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let providers: Vec<String> = BUILTIN_KINDS.iter().map(|kind| kind.to_string()).collect();
    Config::builder()
        .set_default("grid.default_rows", 1)?
        .set_default("grid.default_cols", 1)?
        .set_default("grid.layout_type", crate::grid::DEFAULT_LAYOUT_TYPE)?
        .set_default("presentation.providers", providers)
}
