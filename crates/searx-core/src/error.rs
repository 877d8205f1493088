//! Error types for configuration resolution and search execution.
//!
//! Two families of errors exist, matching the two ways an invocation can fail:
//!
//! - [`ConfigError`]: the user supplied something invalid (a flag, an
//!   environment variable, or a config-file value). Resolution stops at the
//!   first violation, so exactly one of these is ever reported.
//! - [`SearchError`]: the environment failed (timeout, upstream status,
//!   connection problem, or an unparsable reply). No retries are attempted.
//!
//! ```rust
//! use searx_core::ConfigError;
//!
//! let err = ConfigError::PageMustBePositive(0);
//! assert_eq!(err.field(), "page");
//! assert_eq!(err.to_string(), "invalid `page`: must be at least 1 (got 0)");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A configuration value was rejected.
///
/// Every variant identifies the field it concerns via [`ConfigError::field`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The instance is not an absolute http(s) URL.
    #[error("invalid `instance`: '{url}' is not an absolute http(s) URL ({reason})")]
    MalformedInstanceUrl {
        /// The rejected value.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// The query is empty or only whitespace.
    #[error("invalid `query`: a non-empty search query is required")]
    EmptyQuery,

    /// The results count is outside `1..=100`.
    #[error("invalid `results`: must be between 1 and 100 (got {0})")]
    ResultsCountOutOfRange(i64),

    /// The output format is not one of json, markdown, text.
    #[error("invalid `format`: unknown format '{0}' (expected json, markdown or text)")]
    UnknownFormat(String),

    /// The category is not in the known set.
    #[error("invalid `category`: unknown category '{0}' (run `searx categories` for the list)")]
    UnknownCategory(String),

    /// The safe-search level is not 0, 1 or 2.
    #[error("invalid `safe_search`: must be 0, 1 or 2 (got {0})")]
    SafeSearchOutOfRange(i64),

    /// The time range is not one of day, week, month, year (or empty).
    #[error("invalid `time_range`: unknown time range '{0}' (expected day, week, month or year)")]
    UnknownTimeRange(String),

    /// The page number is below 1.
    #[error("invalid `page`: must be at least 1 (got {0})")]
    PageMustBePositive(i64),

    /// The timeout is zero or negative.
    #[error("invalid `timeout`: must be a positive number of seconds (got {0})")]
    TimeoutMustBePositive(i64),

    /// A source supplied a value that could not be parsed at all.
    #[error("invalid `{field}` from {origin}: cannot parse '{value}'")]
    InvalidValue {
        /// Field the value was meant for.
        field: &'static str,
        /// Where the value came from (for example `SEARX_RESULTS`).
        origin: String,
        /// The raw value.
        value: String,
    },

    /// The config file could not be read.
    #[error("cannot read config file {}", path.display())]
    Unreadable {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has wrongly typed values.
    #[error("invalid config file {}: {message}", path.display())]
    Syntax {
        /// Path of the config file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

impl ConfigError {
    /// Name of the configuration field this error concerns.
    ///
    /// File-level errors report `config`.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MalformedInstanceUrl { .. } => "instance",
            Self::EmptyQuery => "query",
            Self::ResultsCountOutOfRange(_) => "results",
            Self::UnknownFormat(_) => "format",
            Self::UnknownCategory(_) => "category",
            Self::SafeSearchOutOfRange(_) => "safe_search",
            Self::UnknownTimeRange(_) => "time_range",
            Self::PageMustBePositive(_) => "page",
            Self::TimeoutMustBePositive(_) => "timeout",
            Self::InvalidValue { field, .. } => *field,
            Self::Unreadable { .. } | Self::Syntax { .. } => "config",
        }
    }
}

/// The search request could not be completed.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request did not finish within the configured timeout.
    #[error("request to {url} timed out after {}s", timeout.as_secs())]
    Timeout {
        /// Request URL.
        url: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// The instance answered with a non-2xx status.
    #[error("instance returned HTTP {code} for {url}")]
    UpstreamStatus {
        /// HTTP status code.
        code: u16,
        /// Request URL.
        url: String,
    },

    /// The reply body does not match the expected JSON schema.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse {
        /// Request URL.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The instance could not be reached.
    #[error("connection to {url} failed")]
    ConnectionFailure {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl SearchError {
    /// Check whether this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
