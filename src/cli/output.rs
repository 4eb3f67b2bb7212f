//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GridError;

/// Map domain/service errors to a string for CLI output.
/// Keeps route handlers thin.
pub fn map_error(e: &GridError) -> String {
    match e {
        GridError::MissingImplementation(_) => format!("{} (no backing installed)", e),
        other => other.to_string(),
    }
}
