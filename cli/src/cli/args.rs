//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::workspace::SortBy;

/// Manage the content staging workspaces of a CMS backend.
///
/// Commands start from a snapshot of the workspace module data, sync it with
/// the backend, and write the result back to the snapshot.
#[derive(Parser, Debug)]
#[command(name = "wsm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Module data snapshot to start from (overrides the configured file).
    #[arg(long, global = true, env = "WSM_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List workspaces with their pending changes.
    List {
        /// Ordering of the listing.
        #[arg(short, long, value_enum, default_value = "last-modified")]
        sort: SortArg,
    },

    /// Reload the pending change counts of all workspaces.
    Refresh,

    /// Delete a workspace.
    ///
    /// Workspaces based on the deleted one are moved onto live.
    Delete {
        /// Name of the workspace to delete.
        name: String,

        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Edit title, description, owner, or base workspace.
    Update {
        /// Name of the workspace to edit.
        name: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New description.
        #[arg(short, long)]
        description: Option<String>,

        /// New owner (user name).
        #[arg(long)]
        owner: Option<String>,

        /// New base workspace (workspace name).
        #[arg(long)]
        base_workspace: Option<String>,
    },

    /// Open the page of a workspace in the browser.
    Show {
        /// Name of the workspace to show.
        name: String,
    },

    /// Store the backend session cookie in the config file.
    Session {
        /// Cookie header value, e.g. `Neos_Session=...`.
        cookie: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Supported shell types for completions.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

/// Sort argument for CLI.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    LastModified,
    Title,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::LastModified => Self::LastModified,
            SortArg::Title => Self::Title,
        }
    }
}
