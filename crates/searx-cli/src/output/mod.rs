//! # Output Formatting
//!
//! Renders a [`searx_core::SearchResponse`] in one of three formats:
//!
//! - **Text**: numbered list for terminals, optionally coloured
//! - **Markdown**: a document for Markdown viewers and notes
//! - **JSON**: a single object for scripts
//!
//! The layout of each format:
//!
//! ```text
//! Search: golang (1200 results)
//!
//! [1] The Go Programming Language
//!     https://go.dev/
//!     Go is an open source programming language.
//! ```
//!
//! ```markdown
//! # Search results: golang
//!
//! 1. [The Go Programming Language](https://go.dev/)
//!    Go is an open source programming language.
//!
//! ---
//! ```
//!
//! Every format is rendered into a buffer first; callers write it out in
//! one piece, so a failure never leaves half a document on stdout.

mod formatter;
mod json;
mod markdown;
mod text;

pub use formatter::{RenderError, RenderOptions, render};

use std::io::{self, Write};

use anyhow::{Context, Result};

/// Write a finished document to stdout in one call.
///
/// A closed pipe (`searx ... | head`) is not an error.
pub fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(bytes).and_then(|()| stdout.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write to stdout"),
    }
}
