//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber and color control from CLI flags and
//! environment variables. Diagnostics always go to stderr; stdout carries
//! only rendered results.

use anyhow::Result;
use colored::control as color_control;
use searx_core::Format;
use searx_core::config::{ENV_FORMAT, ENV_NO_COLOR};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Pick the log level.
///
/// `--verbose` shows debug output. Otherwise only warnings, and only errors
/// when the output is JSON for a script.
#[must_use]
pub const fn log_level(verbose: bool, machine_output: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Whether the requested output format is machine-readable.
///
/// Logging starts before the config file is read, so only the flag and the
/// environment are consulted here.
fn machine_output(cli: &Cli) -> bool {
    cli.format
        .clone()
        .or_else(|| std::env::var(ENV_FORMAT).ok())
        .and_then(|raw| raw.parse::<Format>().ok())
        .is_some_and(Format::is_machine_readable)
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = machine_output(cli);
    let env_no_color = std::env::var_os(ENV_NO_COLOR).is_some_and(|v| !v.is_empty());
    let level = log_level(cli.verbose, machine_output);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(!cli.no_color && !env_no_color)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
