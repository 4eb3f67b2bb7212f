//! CLI parse: clap types for gridctl. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gridctl - inspect viewport grid layouts and presentation ids
#[derive(Parser, Debug)]
#[command(name = "gridctl")]
#[command(about = "Apply a viewport grid layout and show the resulting panes and presentation ids")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a layout, assign display sets, print the grid
    Layout {
        /// Grid rows (defaults to grid.default_rows)
        #[arg(long)]
        rows: Option<usize>,
        /// Grid columns (defaults to grid.default_cols)
        #[arg(long)]
        cols: Option<usize>,
        /// Assignment in the form VIEWPORT=UID[,UID...]; repeatable
        #[arg(long = "assign", value_name = "VIEWPORT=UIDS")]
        assignments: Vec<String>,
        /// Orientation for assigned panes (e.g. axial)
        #[arg(long)]
        orientation: Option<String>,
        /// Viewport to activate after assignment
        #[arg(long)]
        active: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
    /// List registered presentation id kinds
    Providers {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
