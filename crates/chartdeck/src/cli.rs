use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "chartdeck")]
#[command(author, version, about)]
#[command(long_about = "A fourteen-slide business plan deck with live charts.\n\n\
    Examples:\n  \
    chartdeck                     Launch presentation (fullscreen)\n  \
    chartdeck --windowed          Launch in a window\n  \
    chartdeck --slide 5           Start on slide 5\n  \
    chartdeck export -o out       Render every slide to PNG\n  \
    chartdeck data --json         Print the chart datasets")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed, clamped into the deck)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Color theme (overrides the configured default)
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the datasets behind the charts
    Data {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export slides as PNG images
    Export {
        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (defaults.theme or defaults.transition)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Data { json }) => crate::commands::data::run(json),
            Some(Commands::Export {
                output_dir,
                width,
                height,
            }) => {
                let config = Config::load_or_default();
                let theme = resolve_theme(self.theme, &config);
                crate::commands::export::run(output_dir, width, height, theme)
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                let config = Config::load_or_default();
                let theme = resolve_theme(self.theme, &config);
                let transition = config.transition().unwrap_or("slide");
                crate::app::run(self.windowed, self.slide, theme, transition)
            }
        }
    }
}

/// Theme name to launch with: the `--theme` flag, then the configured
/// default, then light.
fn resolve_theme(flag: Option<ThemeName>, config: &Config) -> &str {
    flag.map(ThemeName::as_str)
        .or(config.theme())
        .unwrap_or("light")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_viewer_flags() {
        let cli = Cli::try_parse_from([
            "chartdeck",
            "--windowed",
            "--slide",
            "5",
            "--theme",
            "dark",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(5));
        assert_eq!(cli.theme, Some(ThemeName::Dark));
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["chartdeck", "export"]).unwrap();
        match cli.command {
            Some(Commands::Export {
                output_dir,
                width,
                height,
            }) => {
                assert_eq!(output_dir, PathBuf::from("export"));
                assert_eq!((width, height), (1920, 1080));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_global_verbosity() {
        let cli = Cli::try_parse_from(["chartdeck", "data", "--json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Data { json: true })));
    }

    #[test]
    fn test_theme_flag_beats_config() {
        let mut config = Config::default();
        assert_eq!(resolve_theme(None, &config), "light");
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(resolve_theme(None, &config), "dark");
        assert_eq!(resolve_theme(Some(ThemeName::Light), &config), "light");
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["chartdeck", "--theme", "neon"]).is_err());
    }
}
