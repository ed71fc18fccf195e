pub mod completion;
pub mod config;
pub mod data;
pub mod export;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        "chartdeck".bold().cyan(),
        env!("CARGO_PKG_VERSION").bold()
    );
    println!("{}", crate::deck::content::DECK_TITLE.dimmed());
}
