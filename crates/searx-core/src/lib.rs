//! # searx-core
//!
//! Core functionality for searx, a command-line client for SearXNG
//! metasearch instances.
//!
//! This crate resolves and validates search parameters, issues the search
//! request, and maps the reply into a format-independent result model. It
//! does not print anything; rendering lives in the CLI crate.
//!
//! ## Architecture
//!
//! - **Configuration**: layered resolution of flags, environment, config file
//!   and defaults into one validated [`Config`]
//! - **Validation**: one pure rule per field, reporting the first violation
//! - **Client**: a single bounded HTTP request per invocation
//! - **Result model**: [`SearchResponse`] and its parts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use searx_core::{ConfigLayer, Defaults, execute, resolve};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let flags = ConfigLayer {
//!     instance: Some("https://searx.example.org".into()),
//!     query: Some("rust async".into()),
//!     ..ConfigLayer::default()
//! };
//! let config = resolve(&Defaults::default(), None, None, Some(&flags))?;
//! let response = execute(&config).await?;
//!
//! for result in &response.results {
//!     println!("{} <{}>", result.title, result.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Resolution fails with [`ConfigError`] before any network activity. The
//! search itself fails with [`SearchError`]:
//!
//! ```rust
//! use searx_core::{ConfigError, ConfigLayer, Defaults, resolve};
//!
//! let flags = ConfigLayer {
//!     query: Some("golang".into()),
//!     page: Some(0),
//!     ..ConfigLayer::default()
//! };
//! match resolve(&Defaults::default(), None, None, Some(&flags)) {
//!     Err(ConfigError::PageMustBePositive(0)) => {},
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

/// HTTP client for the search endpoint
pub mod client;
/// Layered configuration resolution
pub mod config;
/// Error types
pub mod error;
/// Result model
pub mod response;
/// Typed search parameters
pub mod types;
/// Per-field validation rules
pub mod validation;

pub use client::{SearchClient, execute, search_url};
pub use config::{
    Config, ConfigLayer, Defaults, Source, default_config_path, load_config_file, resolve,
};
pub use error::{ConfigError, SearchError};
pub use response::{Answer, Infobox, InfoboxAttribute, InfoboxLink, SearchResponse, SearchResult};
pub use types::{Category, Format, SafeSearch, TimeRange};
