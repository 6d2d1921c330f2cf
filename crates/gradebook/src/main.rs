//! `gradebook` - CLI for the student grade manager
//!
//! This binary runs the interactive menu by default and provides one-shot
//! commands for the demo, the self-tests, reports and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use gradebook::cli::{Cli, Command, ConfigCommand, InteractiveCommand, ReportCommand};
use gradebook::report::{self, ClassReport};
use gradebook::{init_logging, sample, selftest, Config, Gradebook, Menu, SortOrder};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config_path = cli.config.clone();
    let load_config = {
        let path = config_path.clone();
        move || Config::load_from(path.clone()).context("failed to load configuration")
    };

    match cli.into_command() {
        Command::Interactive(cmd) => handle_interactive(&load_config()?, &cmd),
        Command::Demo => handle_demo(&load_config()?),
        Command::Test => handle_test(),
        Command::Report(cmd) => handle_report(&load_config()?, &cmd),
        Command::Config(cmd) => handle_config(config_path, cmd, load_config),
    }
}

fn handle_interactive(config: &Config, cmd: &InteractiveCommand) -> Result<()> {
    let subjects = &config.gradebook.subjects;
    let book = if config.gradebook.sample_data && !cmd.empty {
        sample::class(subjects)?
    } else {
        Gradebook::new(subjects)?
    };
    info!(students = book.len(), "starting interactive menu");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(book, config.clone(), stdin.lock(), stdout.lock());
    menu.run().context("console I/O failed")?;
    Ok(())
}

fn handle_demo(config: &Config) -> Result<()> {
    let mut book = sample::demo(&config.gradebook.subjects)?;
    let first_subject = book.subjects()[0].clone();

    println!("RUNNING DEMO");
    println!("==================================================");
    println!("Total students: {}", book.len());
    println!("Total grades: {}", book.total_grade_count());
    println!(
        "{first_subject} class average: {:.2}",
        book.subject_average(&first_subject)
    );
    println!("Overall class average: {:.2}", book.class_average());

    println!();
    println!("Students sorted by name (A-Z):");
    book.sort_by_name(SortOrder::Ascending);
    for (i, name) in book.names().enumerate() {
        println!("  {}. {name}", i + 1);
    }

    println!();
    let results = book.search("john");
    report::search_results(&mut io::stdout().lock(), "john", &results)?;

    println!();
    println!("Top performers in {first_subject}:");
    for (i, (name, average)) in book.top_performers_in(&first_subject, 2).iter().enumerate() {
        println!("  {}. {name}: {average:.2}", i + 1);
    }

    println!();
    println!("Demo completed successfully!");
    debug!("demo finished");
    Ok(())
}

fn handle_test() -> Result<()> {
    let summary = selftest::run_and_report(&mut io::stdout().lock())?;
    if !summary.success() {
        bail!("{} self-test(s) failed", summary.failed);
    }
    println!();
    println!("All tests passed! System is functioning correctly.");
    Ok(())
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> Result<()> {
    let book = sample::class(&config.gradebook.subjects)?;
    let top = cmd.top.unwrap_or(config.display.top_performers);
    let class_report = ClassReport::build(&book, top);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&class_report)?);
    } else {
        class_report.render(&mut io::stdout().lock())?;
    }
    Ok(())
}

fn handle_config(
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
    load_config: impl Fn() -> Result<Config>,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Gradebook]");
                println!(
                    "  Subjects:           {}",
                    config.gradebook.subjects.join(", ")
                );
                println!("  Sample data:        {}", config.gradebook.sample_data);
                println!();
                println!("[Display]");
                println!("  Top performers:     {}", config.display.top_performers);
                println!("  Bar step (%):       {}", config.display.bar_step_percent);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
