//! CLI argument parsing for Ajeno

use crate::view::ViewMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for rendered views
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Requested table view
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    /// Resources grouped by owning third party (default)
    Entity,
    /// One row per resource, audit order
    Script,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Entity => ViewMode::Entity,
            ViewArg::Script => ViewMode::Script,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ajeno")]
#[command(version)]
#[command(about = "Third-party resource attribution and aggregation for web performance audits", long_about = None)]
pub struct Cli {
    /// Audit JSON file: envelope object or bare array of resource records
    pub audit: PathBuf,

    /// User origin-to-entity mapping JSON file (array of {key, value})
    #[arg(short = 'm', long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Table view to project
    #[arg(long = "view", value_enum, default_value = "entity")]
    pub view: ViewArg,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the published third-party summary as JSON to a file
    #[arg(long = "emit-summary", value_name = "FILE")]
    pub emit_summary: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
