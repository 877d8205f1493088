//! `searx` binary entry point.

use std::process::ExitCode;

use searx_cli::error::category_from_error;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match searx_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let category = category_from_error(&err);
            debug!("{category} (exit code {})", category.exit_code());
            eprintln!("Error: {err:#}");
            category.as_exit_code()
        },
    }
}
