mod app;
mod charts;
mod cli;
mod commands;
mod config;
mod controller;
mod deck;
mod format;
mod input;
mod render;
mod schedule;
mod session;
mod telemetry;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
    telemetry::init_tracing(cli.verbose, cli.quiet, !cli.no_color);
    telemetry::install_panic_hook();

    if let Err(err) = cli.run() {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
