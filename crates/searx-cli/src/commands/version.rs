//! `searx version`

use anyhow::Result;

use crate::output::write_stdout;

/// Version line printed by `searx version`.
#[must_use]
pub fn version_line() -> String {
    format!("searx {}\n", env!("CARGO_PKG_VERSION"))
}

/// Print the version.
pub fn show_version() -> Result<()> {
    write_stdout(version_line().as_bytes())
}
