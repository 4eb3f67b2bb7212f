//! CLI presentation: text and json formatters per command family.

mod grid;
mod providers;

pub use grid::{format_grid_json, format_grid_text};
pub use providers::{format_providers_json, format_providers_text};
