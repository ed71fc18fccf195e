use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    print_entry("defaults.theme", config.theme(), "light");
    print_entry("defaults.transition", config.transition(), "slide");
    Ok(())
}

fn print_entry(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(value) => println!("  {} = {}", key.cyan(), value.green()),
        None => println!(
            "  {} = {} {}",
            key.cyan(),
            default,
            "(default)".dimmed()
        ),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::debug!(key, value, path = %path.display(), "config saved");
    println!(
        "{} {} = {}",
        "Saved".green().bold(),
        key.cyan(),
        value.green()
    );
    Ok(())
}
