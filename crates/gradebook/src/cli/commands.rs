//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Interactive menu arguments.
#[derive(Debug, Default, Args)]
pub struct InteractiveCommand {
    /// Start with an empty gradebook even if sample data is enabled
    #[arg(long)]
    pub empty: bool,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Number of top performers to list (defaults to the configured value)
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
