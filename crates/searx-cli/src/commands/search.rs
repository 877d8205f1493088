//! The default command: resolve, search, render.

use anyhow::Result;
use is_terminal::IsTerminal;
use searx_core::{Config, ConfigLayer, Defaults, load_config_file, resolve};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{RenderOptions, render, write_stdout};

/// Run a search from the parsed command line.
///
/// Configuration errors are reported before any request is made. Output is
/// written only after the whole document has been rendered.
pub async fn search(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    debug!(
        "searching {} for {:?} ({} results, page {})",
        config.instance, config.query, config.results, config.page
    );

    let response = searx_core::execute(&config).await.map_err(CliError::from)?;

    let options = RenderOptions {
        color: !config.no_color && std::io::stdout().is_terminal(),
    };
    let rendered = render(&response, config.format, options).map_err(CliError::from)?;
    write_stdout(rendered.as_bytes())
}

/// Merge the config file, environment and flags into one validated config.
pub fn resolve_config(cli: &Cli) -> Result<Config, CliError> {
    let file = load_config_file(cli.config.as_deref())?;
    let env = ConfigLayer::from_env()?;
    let flags = cli.to_layer();
    let config = resolve(&Defaults::default(), file.as_ref(), Some(&env), Some(&flags))?;
    Ok(config)
}
