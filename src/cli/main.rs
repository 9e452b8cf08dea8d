//! Command-line interface entry point for the gradebook

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gradebook::config::Config;
use gradebook::info;
use gradebook::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let credentials = args.credentials();
    match &args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand.as_ref(), &mut config, &defaults);
        }
        Command::Signup {
            username,
            password,
            role,
        } => {
            commands::account::signup(&config, username, password, (*role).into());
        }
        Command::Course { subcommand } => {
            commands::course::run(subcommand, &config, credentials);
        }
        Command::Marks { subcommand } => {
            commands::marks::run(subcommand, &config, credentials);
        }
        Command::Report { subcommand } => {
            commands::report::run(subcommand, &config, credentials);
        }
    }
}
