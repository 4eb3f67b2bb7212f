//! Configuration System
//!
//! Layered configuration for the grid context: built-in defaults, the user's global
//! file, workspace files, then `VIEWGRID__*` environment overrides.

use crate::logging::LoggingConfig;
use crate::presentation::BUILTIN_KINDS;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewGridConfig {
    /// Layout applied when a context starts up
    #[serde(default)]
    pub grid: GridConfig,

    /// Presentation identity kinds to register
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_dimension")]
    pub default_rows: usize,

    #[serde(default = "default_dimension")]
    pub default_cols: usize,

    #[serde(default = "default_layout_type")]
    pub layout_type: String,
}

fn default_dimension() -> usize {
    1
}

fn default_layout_type() -> String {
    crate::grid::DEFAULT_LAYOUT_TYPE.to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_rows: default_dimension(),
            default_cols: default_dimension(),
            layout_type: default_layout_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Built-in provider kinds, registered in this order
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
}

fn default_providers() -> Vec<String> {
    BUILTIN_KINDS.iter().map(|kind| kind.to_string()).collect()
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Grid(String),
    Provider(String, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Grid(msg) => write!(f, "Grid: {}", msg),
            ValidationError::Provider(kind, msg) => {
                write!(f, "Provider '{}': {}", kind, msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl GridConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_rows == 0 || self.default_cols == 0 {
            return Err(format!(
                "default layout must have at least one row and column (got {}x{})",
                self.default_rows, self.default_cols
            ));
        }
        if self.layout_type.trim().is_empty() {
            return Err("layout_type cannot be empty".to_string());
        }
        Ok(())
    }
}

impl ViewGridConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.grid.validate() {
            errors.push(ValidationError::Grid(e));
        }

        let mut seen = Vec::new();
        for kind in &self.presentation.providers {
            if !BUILTIN_KINDS.contains(&kind.as_str()) {
                errors.push(ValidationError::Provider(
                    kind.clone(),
                    format!("unknown kind, expected one of {}", BUILTIN_KINDS.join(", ")),
                ));
            } else if seen.contains(kind) {
                errors.push(ValidationError::Provider(
                    kind.clone(),
                    "listed more than once".to_string(),
                ));
            }
            seen.push(kind.clone());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
