//! Session and shell helper commands.

use clap::CommandFactory;

use crate::cli::args::ShellType;
use crate::config::{config_file, load_config, save_config_to};
use crate::error::Result;

/// Handles the `wsm session <cookie>` command.
///
/// Stores the backend session cookie so later requests are authenticated.
pub fn handle_session(cookie: &str) -> Result<()> {
    let path = config_file()?;
    let mut config = load_config()?;
    config.api.session_cookie = Some(cookie.trim().to_string());
    save_config_to(&config, &path)?;

    println!("Session stored in {}.", path.display());
    Ok(())
}

/// Handles the `wsm completions <shell>` command.
pub fn handle_completions(shell: ShellType) -> Result<()> {
    use clap_complete::{generate, Shell};

    let mut cmd = crate::cli::Cli::command();
    let shell = match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
    };

    generate(shell, &mut cmd, "wsm", &mut std::io::stdout());

    Ok(())
}
