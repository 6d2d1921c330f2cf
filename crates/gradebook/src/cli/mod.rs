//! Command-line interface for gradebook.
//!
//! This module provides the CLI structure for the `gradebook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, InteractiveCommand, ReportCommand};

/// gradebook - Manage student grades from the console
///
/// Records students and their grades per subject, and reports averages,
/// rankings, statistics and grade distributions. Without a command the
/// interactive menu is started.
#[derive(Debug, Parser)]
#[command(name = "gradebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu
    Interactive(InteractiveCommand),

    /// Run a short demonstration on built-in data
    Demo,

    /// Run the built-in self-tests
    Test,

    /// Print a class report for the sample data
    Report(ReportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// The command to run, with the interactive menu as the default.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Interactive(InteractiveCommand::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "gradebook");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::try_parse_from(["gradebook"]).unwrap();
        assert!(matches!(
            cli.into_command(),
            Command::Interactive(InteractiveCommand { empty: false })
        ));
    }

    #[test]
    fn test_parse_interactive_empty() {
        let cli = Cli::try_parse_from(["gradebook", "interactive", "--empty"]).unwrap();
        assert!(matches!(
            cli.into_command(),
            Command::Interactive(InteractiveCommand { empty: true })
        ));
    }

    #[test]
    fn test_parse_demo_and_test() {
        let cli = Cli::try_parse_from(["gradebook", "demo"]).unwrap();
        assert!(matches!(cli.into_command(), Command::Demo));
        let cli = Cli::try_parse_from(["gradebook", "test"]).unwrap();
        assert!(matches!(cli.into_command(), Command::Test));
    }

    #[test]
    fn test_parse_report() {
        let cli = Cli::try_parse_from(["gradebook", "report", "--json", "-n", "3"]).unwrap();
        match cli.into_command() {
            Command::Report(report) => {
                assert!(report.json);
                assert_eq!(report.top, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["gradebook", "config", "validate", "--file", "/tmp/g.toml"])
                .unwrap();
        match cli.into_command() {
            Command::Config(ConfigCommand::Validate { file }) => {
                assert_eq!(file, Some(PathBuf::from("/tmp/g.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_command() {
        let cli = Cli::try_parse_from(["gradebook", "demo", "-c", "/custom/config.toml", "-vv"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["gradebook", "frobnicate"]).is_err());
    }
}
