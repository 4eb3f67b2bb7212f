//! Error types for the viewport grid coordinator.

use thiserror::Error;

/// Errors surfaced by the grid coordinator and its reference backing store.
#[derive(Debug, Error)]
pub enum GridError {
    /// A coordinator operation needs a backing callback that no host registered.
    #[error("Viewport grid backing implementation missing: {0}")]
    MissingImplementation(&'static str),

    #[error("Backing implementation failed: {0}")]
    Backing(#[source] anyhow::Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Viewport not found: {0}")]
    ViewportNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for GridError {
    fn from(err: config::ConfigError) -> Self {
        GridError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for GridError {
    fn from(err: anyhow::Error) -> Self {
        // Backing stores may hand our own errors back through anyhow.
        match err.downcast::<GridError>() {
            Ok(grid) => grid,
            Err(other) => GridError::Backing(other),
        }
    }
}
