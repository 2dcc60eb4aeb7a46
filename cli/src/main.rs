//! wsm - workspace module client
//!
//! Lists, refreshes, edits and deletes the content staging workspaces of a
//! CMS backend, starting from the module data the backend renders into its
//! workspace page.

mod cli;
mod client;
mod config;
mod context;
mod error;
mod navigate;
mod notify;
mod workspace;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::commands::UpdateArgs;
use crate::cli::{Cli, Commands};
use crate::config::settings::env;
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL)
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    // Run the command
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let snapshot = cli.snapshot;
    match cli.command {
        Commands::List { sort } => cli::commands::handle_list(snapshot, sort.into()).await,
        Commands::Refresh => cli::commands::handle_refresh(snapshot).await,
        Commands::Delete { name, yes } => {
            cli::commands::handle_delete(snapshot, &name, yes).await
        }
        Commands::Update {
            name,
            title,
            description,
            owner,
            base_workspace,
        } => {
            let args = UpdateArgs {
                title,
                description,
                owner,
                base_workspace,
            };
            cli::commands::handle_update(snapshot, &name, args).await
        }
        Commands::Show { name } => cli::commands::handle_show(snapshot, &name).await,
        Commands::Session { cookie } => cli::commands::handle_session(&cookie),
        Commands::Completions { shell } => cli::commands::handle_completions(shell),
    }
}
