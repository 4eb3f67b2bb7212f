//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; a single route table dispatches to the grid context.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_grid_json, format_grid_text, format_providers_json, format_providers_text,
};
pub use route::{parse_assignment, RunContext};
