//! `prepflow config` command - inspect configuration

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::core::config::{Config, ENV_MATERIALS, ENV_SITE_URL, KEYS, PROJECT_DIR};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration, or a single key
    Show {
        /// Only print this key's value
        key: Option<String>,
    },

    /// Show configuration file locations
    Path,

    /// List available configuration keys
    Keys,
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { key } => run_show(key),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(key: Option<String>) -> Result<()> {
    let config = Config::load();

    if let Some(key) = key {
        if !KEYS.iter().any(|(k, _)| *k == key) {
            return Err(miette::miette!(
                help = "Run `prepflow config keys` to list keys",
                "Unknown configuration key '{}'",
                key
            ));
        }
        return match config.get(&key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in KEYS {
        print_config_value(key, config.get(key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables ({}, {})", ENV_SITE_URL, ENV_MATERIALS);
    println!("  2. Project config ({}/config.yaml)", PROJECT_DIR);
    println!("  3. Global config (~/.config/prepflow/config.yaml)");

    Ok(())
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => {
            println!("  {} {}", style("Global:").cyan(), path.display());
            print_exists(path.exists(), 9);
        }
        None => println!(
            "  {} {}",
            style("Global:").cyan(),
            style("(no home directory)").dim()
        ),
    }

    println!();
    let cwd = std::env::current_dir().map_err(|e| miette::miette!("{}", e))?;
    match Config::project_config_path(&cwd) {
        Some(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(path.exists(), 10);
        }
        None => println!(
            "  {} {}",
            style("Project:").cyan(),
            style(format!("(no {} directory found)", PROJECT_DIR)).dim()
        ),
    }

    Ok(())
}

fn print_exists(exists: bool, indent: usize) {
    let pad = " ".repeat(indent);
    if exists {
        println!("{}{}", pad, style("(exists)").green());
    } else {
        println!("{}{}", pad, style("(not created)").dim());
    }
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style(format!("Set keys in {}/config.yaml or the global config file.", PROJECT_DIR)).dim()
    );

    Ok(())
}
