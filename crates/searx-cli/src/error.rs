//! CLI error handling with semantic exit codes.
//!
//! Every failure is resolved into one [`CliError`] whose category picks the
//! exit code, so scripts can tell a typo from an unreachable instance.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Results were rendered |
//! | 1 | `Internal` | Unexpected error, including render failures |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 5 | `Network` | Instance unreachable or returned an error status |
//! | 6 | `Timeout` | The request exceeded `--timeout` |
//! | 7 | `Response` | The instance replied with something that is not search JSON |
//!
//! # Usage
//!
//! ```bash
//! searx -f json "$q" > results.json
//! case $? in
//!     0) jq '.results | length' results.json ;;
//!     2) echo "fix your flags or config" ;;
//!     5|6) echo "instance down, try another" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

use searx_core::{ConfigError, SearchError};

use crate::output::RenderError;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Every [`ConfigError`] lands here: validation failures, unparsable
    /// environment values, unreadable or malformed config files.
    Usage = 2,

    /// Network failure or non-success HTTP status (exit code 5).
    Network = 5,

    /// Request timed out (exit code 6).
    Timeout = 6,

    /// Reply could not be understood (exit code 7).
    Response = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::Response => "malformed response",
        }
    }

    /// Category for a search failure.
    #[must_use]
    pub const fn of_search_error(err: &SearchError) -> Self {
        match err {
            SearchError::Timeout { .. } => Self::Timeout,
            SearchError::UpstreamStatus { .. } | SearchError::ConnectionFailure { .. } => {
                Self::Network
            },
            SearchError::MalformedResponse { .. } => Self::Response,
            SearchError::Client(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so the full cause chain survives.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    // Display already shows the wrapped error, so the chain starts below it.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.chain().nth(1)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::usage(err)
    }
}

impl From<SearchError> for CliError {
    fn from(err: SearchError) -> Self {
        Self::new(ErrorCategory::of_search_error(&err), err)
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        Self::internal(err)
    }
}

/// Determine the category of an `anyhow::Error`.
///
/// A [`CliError`] anywhere in the chain decides; bare core errors are mapped
/// the same way their `From` conversions would; anything else is internal.
#[must_use]
pub fn category_from_error(err: &anyhow::Error) -> ErrorCategory {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return cli_err.category;
        }
        if cause.is::<ConfigError>() {
            return ErrorCategory::Usage;
        }
        if let Some(search_err) = cause.downcast_ref::<SearchError>() {
            return ErrorCategory::of_search_error(search_err);
        }
    }
    ErrorCategory::Internal
}
