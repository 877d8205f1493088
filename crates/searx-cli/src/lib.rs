//! searx CLI - search the web through a SearXNG instance
//!
//! The binary in `main.rs` only maps the result of [`run`] to an exit code.
//! Parsing, dispatch and rendering live here so they can be tested.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
pub mod error;
pub mod output;
mod utils;

pub use cli::{Cli, Commands};

use crate::utils::initialize_logging;

/// Execute the searx CLI with the current arguments and environment.
///
/// # Errors
///
/// Returns the first configuration, network or rendering failure. Nothing
/// has been written to stdout when an error is returned.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(&cli).await
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Categories) => commands::list_categories(),
        Some(Commands::Version) => commands::show_version(),
        Some(Commands::Completion { shell }) => commands::generate(*shell),
        None => commands::search(cli).await,
    }
}
