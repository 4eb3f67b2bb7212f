//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log spans (e.g. "layout", "providers").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Layout { .. } => "layout",
        Commands::Config => "config",
        Commands::Providers { .. } => "providers",
    }
}
