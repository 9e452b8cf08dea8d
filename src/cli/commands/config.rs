//! Config command handler

use crate::args::ConfigSubcommand;
use gradebook::config::Config;
use gradebook::error;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<&ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, key, value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

fn exit_with(message: &str) -> ! {
    error!("{message}");
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Print one key, or every section when no key is given
pub fn handle_config_get(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => exit_with(&format!("Unknown config key: '{k}'")),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
}

/// Set a key and save the config file
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        exit_with(&e);
    }
    if let Err(e) = config.save() {
        exit_with(&format!("Failed to save config: {e}"));
    }
    println!("✓ Set {key} = {value}");
}

/// Restore one key to its default and save the config file
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        exit_with(&e);
    }
    if let Err(e) = config.save() {
        exit_with(&format!("Failed to save config: {e}"));
    }
    println!("✓ Reset {key} to default");
}

/// Delete the config file after confirmation
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            exit_with(&format!("Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
