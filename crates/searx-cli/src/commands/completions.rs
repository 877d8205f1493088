//! Shell completion scripts

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::output::write_stdout;

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut Vec<u8>) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}

/// Print the completion script for `shell`.
pub fn generate(shell: Shell) -> Result<()> {
    let mut script = Vec::new();
    write_completions(shell, &mut script);
    write_stdout(&script)
}
