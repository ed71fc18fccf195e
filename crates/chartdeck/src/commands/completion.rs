use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};

pub fn run(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = std::io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut out),
        Shell::Powershell => generate(shells::PowerShell, &mut cmd, name, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(shells::Bash, &mut cmd, "chartdeck", &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("export"));
        assert!(script.contains("completion"));
    }
}
