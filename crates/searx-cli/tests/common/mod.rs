#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn home_dir() -> &'static Path {
    static HOME: OnceLock<TempDir> = OnceLock::new();
    HOME.get_or_init(|| tempfile::tempdir().expect("failed to create home dir for tests"))
        .path()
}

/// Create a `searx` command isolated from the caller's config and environment.
///
/// The home and config directories point at an empty temp dir, so no
/// config file is discovered unless a test passes `--config`.
#[allow(dead_code)]
pub fn searx_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("searx"));
    cmd.timeout(CMD_TIMEOUT);
    for var in ["SEARX_INSTANCE", "SEARX_RESULTS", "SEARX_FORMAT", "SEARX_CONFIG"] {
        cmd.env_remove(var);
    }
    let home = home_dir();
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    cmd.env("APPDATA", home);
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `contents` to a config file inside `dir` and return its path.
#[allow(dead_code)]
pub fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("failed to write config file");
    path
}
