//! Validation rules for individual configuration values.
//!
//! Every rule is a pure function from a raw value to either its typed form
//! or the [`ConfigError`] naming the violated rule. Rules know nothing about
//! where a value came from; the resolver decides which value to check.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::types::{Category, Format, SafeSearch, TimeRange};

/// Smallest accepted results count.
pub const MIN_RESULTS: i64 = 1;
/// Largest accepted results count.
pub const MAX_RESULTS: i64 = 100;

/// The instance must be an absolute http(s) URL with a host.
pub fn validate_instance(raw: &str) -> Result<Url, ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedInstanceUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(malformed("empty URL"));
    }

    let url = Url::parse(trimmed).map_err(|err| malformed(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(&format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(malformed("missing host"));
    }
    Ok(url)
}

/// The query must contain something other than whitespace. Returns it trimmed.
pub fn validate_query(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyQuery);
    }
    Ok(trimmed.to_string())
}

/// The results count must lie in `MIN_RESULTS..=MAX_RESULTS`.
pub fn validate_results_count(n: i64) -> Result<u8, ConfigError> {
    if (MIN_RESULTS..=MAX_RESULTS).contains(&n) {
        u8::try_from(n).map_err(|_| ConfigError::ResultsCountOutOfRange(n))
    } else {
        Err(ConfigError::ResultsCountOutOfRange(n))
    }
}

/// The format must be json, markdown or text.
pub fn validate_format(raw: &str) -> Result<Format, ConfigError> {
    raw.parse()
        .map_err(|()| ConfigError::UnknownFormat(raw.to_string()))
}

/// The category must be one of [`Category::ALL`].
pub fn validate_category(raw: &str) -> Result<Category, ConfigError> {
    raw.parse()
        .map_err(|()| ConfigError::UnknownCategory(raw.to_string()))
}

/// The safe-search level must be 0, 1 or 2.
pub fn validate_safe_search(level: i64) -> Result<SafeSearch, ConfigError> {
    SafeSearch::from_level(level).ok_or(ConfigError::SafeSearchOutOfRange(level))
}

/// The time range must be empty, day, week, month or year.
pub fn validate_time_range(raw: &str) -> Result<TimeRange, ConfigError> {
    raw.parse()
        .map_err(|()| ConfigError::UnknownTimeRange(raw.to_string()))
}

/// Pages are 1-indexed.
pub fn validate_page(page: i64) -> Result<u32, ConfigError> {
    if page < 1 {
        return Err(ConfigError::PageMustBePositive(page));
    }
    u32::try_from(page).map_err(|_| ConfigError::PageMustBePositive(page))
}

/// The timeout must be a positive number of seconds.
pub fn validate_timeout(seconds: i64) -> Result<Duration, ConfigError> {
    u64::try_from(seconds)
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or(ConfigError::TimeoutMustBePositive(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod instance {
        use super::*;

        #[test]
        fn test_accepts_http_and_https() {
            assert!(validate_instance("https://example.test").is_ok());
            assert!(validate_instance("http://localhost:8888/searx/").is_ok());
        }

        #[test]
        fn test_rejects_relative_and_empty() {
            for raw in ["", "   ", "example.test", "/search", "localhost:8888"] {
                assert!(
                    matches!(
                        validate_instance(raw),
                        Err(ConfigError::MalformedInstanceUrl { .. })
                    ),
                    "expected {raw:?} to be rejected"
                );
            }
        }

        #[test]
        fn test_rejects_other_schemes() {
            let err = validate_instance("ftp://example.test").unwrap_err();
            assert!(err.to_string().contains("unsupported scheme"));
        }
    }

    mod query {
        use super::*;

        #[test]
        fn test_trims() {
            assert_eq!(validate_query("  golang  ").unwrap(), "golang");
        }

        #[test]
        fn test_whitespace_only_is_empty() {
            assert!(matches!(validate_query(""), Err(ConfigError::EmptyQuery)));
            assert!(matches!(
                validate_query(" \t\n "),
                Err(ConfigError::EmptyQuery)
            ));
        }
    }

    mod results_count {
        use super::*;

        #[test]
        fn test_boundaries() {
            assert!(matches!(
                validate_results_count(0),
                Err(ConfigError::ResultsCountOutOfRange(0))
            ));
            assert_eq!(validate_results_count(1).unwrap(), 1);
            assert_eq!(validate_results_count(100).unwrap(), 100);
            assert!(matches!(
                validate_results_count(101),
                Err(ConfigError::ResultsCountOutOfRange(101))
            ));
            assert!(validate_results_count(-5).is_err());
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(validate_format("json").unwrap(), Format::Json);
        assert!(matches!(
            validate_format("xml"),
            Err(ConfigError::UnknownFormat(ref f)) if f == "xml"
        ));
    }

    #[test]
    fn test_category() {
        assert_eq!(validate_category("news").unwrap(), Category::News);
        assert!(matches!(
            validate_category("weather"),
            Err(ConfigError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_safe_search() {
        for level in 0..=2 {
            assert_eq!(i64::from(validate_safe_search(level).unwrap().level()), level);
        }
        assert!(matches!(
            validate_safe_search(3),
            Err(ConfigError::SafeSearchOutOfRange(3))
        ));
        assert!(validate_safe_search(-1).is_err());
    }

    #[test]
    fn test_time_range() {
        assert_eq!(validate_time_range("").unwrap(), TimeRange::Any);
        assert_eq!(validate_time_range("month").unwrap(), TimeRange::Month);
        assert!(matches!(
            validate_time_range("hour"),
            Err(ConfigError::UnknownTimeRange(_))
        ));
    }

    #[test]
    fn test_page() {
        assert_eq!(validate_page(1).unwrap(), 1);
        assert!(matches!(
            validate_page(0),
            Err(ConfigError::PageMustBePositive(0))
        ));
        assert!(validate_page(-3).is_err());
    }

    #[test]
    fn test_timeout() {
        assert_eq!(validate_timeout(5).unwrap(), Duration::from_secs(5));
        assert!(matches!(
            validate_timeout(0),
            Err(ConfigError::TimeoutMustBePositive(0))
        ));
        assert!(matches!(
            validate_timeout(-10),
            Err(ConfigError::TimeoutMustBePositive(-10))
        ));
    }
}
