//! Configuration resolution.
//!
//! Search parameters can come from four places. For each field the highest
//! source that actually supplied a value wins:
//!
//! 1. **Command-line flags**
//! 2. **Environment variables**: `SEARX_INSTANCE`, `SEARX_RESULTS`,
//!    `SEARX_FORMAT` (and `NO_COLOR`)
//! 3. **Config file**: TOML at `--config`, or `config.toml` in the platform
//!    config directory
//! 4. **Built-in defaults** ([`Defaults`])
//!
//! Fields are merged independently: a file may set `format` while flags set
//! only `results`. Once every field has a value the validation rules run in
//! declaration order and the first violation aborts resolution.
//!
//! ## Example Configuration File
//!
//! ```toml
//! instance = "https://searx.example.org"
//! results = 20
//! format = "markdown"
//! language = "en"
//! safe_search = 1
//! timeout = 15
//! ```
//!
//! ## Resolving
//!
//! ```rust
//! use searx_core::{ConfigLayer, Defaults, Format, resolve};
//!
//! let file = ConfigLayer::from_toml_str("format = \"text\"\nresults = 5", "config.toml".as_ref())?;
//! let flags = ConfigLayer {
//!     query: Some("golang".into()),
//!     format: Some("json".into()),
//!     ..ConfigLayer::default()
//! };
//!
//! let config = resolve(&Defaults::default(), Some(&file), None, Some(&flags))?;
//! assert_eq!(config.format, Format::Json);
//! assert_eq!(config.results, 5);
//! # Ok::<(), searx_core::ConfigError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::ConfigError;
use crate::types::{Category, Format, SafeSearch, TimeRange};
use crate::validation;

/// Environment variable holding the instance URL.
pub const ENV_INSTANCE: &str = "SEARX_INSTANCE";
/// Environment variable holding the results count.
pub const ENV_RESULTS: &str = "SEARX_RESULTS";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "SEARX_FORMAT";
/// Environment variable holding an explicit config file path.
pub const ENV_CONFIG: &str = "SEARX_CONFIG";
/// <https://no-color.org>
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Where a resolved value came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Built-in default.
    Default,
    /// Config file.
    File,
    /// Environment variable.
    Env,
    /// Command-line flag.
    Flag,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::File => "config file",
            Self::Env => "environment",
            Self::Flag => "flag",
        })
    }
}

/// Built-in default for every field.
///
/// Passed explicitly into [`resolve`]; values are raw and go through the same
/// validation rules as user-supplied ones. Fields mirror [`Config`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub instance: String,
    pub query: String,
    pub results: i64,
    pub format: String,
    pub category: String,
    pub language: String,
    pub safe_search: i64,
    pub time_range: String,
    pub page: i64,
    pub timeout: i64,
    pub verbose: bool,
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            instance: "http://localhost:8888".to_string(),
            query: String::new(),
            results: 10,
            format: Format::Text.to_string(),
            category: Category::General.to_string(),
            language: "all".to_string(),
            safe_search: 0,
            time_range: String::new(),
            page: 1,
            timeout: 10,
            verbose: false,
            no_color: false,
        }
    }
}

/// Raw, optional values supplied by one source.
///
/// `None` means "this source did not say"; it never overrides a lower source.
/// Fields mirror [`Config`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub instance: Option<String>,
    pub query: Option<String>,
    pub results: Option<i64>,
    pub format: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub safe_search: Option<i64>,
    pub time_range: Option<String>,
    pub page: Option<i64>,
    pub timeout: Option<i64>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// Keys a config file may set.
const FILE_KEYS: [&str; 6] = [
    "instance",
    "results",
    "format",
    "language",
    "safe_search",
    "timeout",
];

/// On-disk schema. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    instance: Option<String>,
    results: Option<i64>,
    format: Option<String>,
    language: Option<String>,
    safe_search: Option<i64>,
    timeout: Option<i64>,
}

impl From<FileConfig> for ConfigLayer {
    fn from(file: FileConfig) -> Self {
        Self {
            instance: file.instance,
            results: file.results,
            format: file.format,
            language: file.language,
            safe_search: file.safe_search,
            timeout: file.timeout,
            ..Self::default()
        }
    }
}

impl ConfigLayer {
    /// Parse a config file's contents. `path` is only used in diagnostics.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let syntax = |err: toml::de::Error| ConfigError::Syntax {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        };

        let table: toml::Table = toml::from_str(contents).map_err(syntax)?;
        for key in table.keys().filter(|key| !FILE_KEYS.contains(&key.as_str())) {
            warn!("ignoring unknown key `{key}` in {}", path.display());
        }
        let file: FileConfig = toml::Value::Table(table).try_into().map_err(syntax)?;
        Ok(file.into())
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Build the environment layer from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build the environment layer from an arbitrary lookup.
    ///
    /// Empty values count as unset.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let results = var(ENV_RESULTS)
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "results",
                        origin: ENV_RESULTS.to_string(),
                        value: raw.clone(),
                    })
            })
            .transpose()?;

        Ok(Self {
            instance: var(ENV_INSTANCE),
            results,
            format: var(ENV_FORMAT),
            no_color: var(ENV_NO_COLOR).map(|_| true),
            ..Self::default()
        })
    }

    /// Check whether this layer supplies no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Default location of the config file: `<config dir>/searx/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "searx").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config-file layer.
///
/// An explicit path must exist. Without one, the default location is used
/// when a file is present there, and `None` is returned otherwise.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigLayer>, ConfigError> {
    if let Some(path) = explicit {
        debug!("loading config file {}", path.display());
        return ConfigLayer::from_file(path).map(Some);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!("loading config file {}", path.display());
            ConfigLayer::from_file(&path).map(Some)
        },
        _ => Ok(None),
    }
}

/// The validated parameter set for one invocation.
///
/// Produced only by [`resolve`]; never modified afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the SearXNG instance.
    pub instance: Url,
    /// Trimmed query text.
    pub query: String,
    /// Maximum number of results to keep (1-100).
    pub results: u8,
    /// Output format.
    pub format: Format,
    /// Search category.
    pub category: Category,
    /// Language code, passed through as-is.
    pub language: String,
    /// Safe-search level.
    pub safe_search: SafeSearch,
    /// Time restriction.
    pub time_range: TimeRange,
    /// Result page (1-indexed).
    pub page: u32,
    /// Deadline for the whole request.
    pub timeout: Duration,
    /// Emit debug diagnostics on stderr.
    pub verbose: bool,
    /// Never emit ANSI escapes.
    pub no_color: bool,
    sources: Vec<(&'static str, Source)>,
}

impl Config {
    /// Which source supplied `field`.
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<Source> {
        self.sources()
            .find(|(name, _)| *name == field)
            .map(|(_, source)| source)
    }

    /// Field names with the source that supplied each, in declaration order.
    pub fn sources(&self) -> impl Iterator<Item = (&'static str, Source)> + '_ {
        self.sources.iter().copied()
    }
}

struct Sourced<T> {
    value: T,
    source: Source,
}

/// Candidate sources, highest precedence first.
struct Layers<'a> {
    ordered: Vec<(Source, &'a ConfigLayer)>,
}

impl<'a> Layers<'a> {
    fn new(
        file: Option<&'a ConfigLayer>,
        env: Option<&'a ConfigLayer>,
        flags: Option<&'a ConfigLayer>,
    ) -> Self {
        let ordered = [(Source::Flag, flags), (Source::Env, env), (Source::File, file)]
            .into_iter()
            .filter_map(|(source, layer)| layer.map(|layer| (source, layer)))
            .collect();
        Self { ordered }
    }

    fn pick<T: Clone>(&self, default: &T, get: impl Fn(&ConfigLayer) -> Option<&T>) -> Sourced<T> {
        self.ordered
            .iter()
            .find_map(|(source, layer)| {
                get(layer).map(|value| Sourced {
                    value: value.clone(),
                    source: *source,
                })
            })
            .unwrap_or_else(|| Sourced {
                value: default.clone(),
                source: Source::Default,
            })
    }
}

/// Merge the sources and validate the result.
///
/// Either every field is valid and a [`Config`] is returned, or the first
/// failing field (in declaration order) is reported. Nothing is read or
/// written besides the given values.
pub fn resolve(
    defaults: &Defaults,
    file: Option<&ConfigLayer>,
    env: Option<&ConfigLayer>,
    flags: Option<&ConfigLayer>,
) -> Result<Config, ConfigError> {
    let layers = Layers::new(file, env, flags);

    let instance = layers.pick(&defaults.instance, |l| l.instance.as_ref());
    let query = layers.pick(&defaults.query, |l| l.query.as_ref());
    let results = layers.pick(&defaults.results, |l| l.results.as_ref());
    let format = layers.pick(&defaults.format, |l| l.format.as_ref());
    let category = layers.pick(&defaults.category, |l| l.category.as_ref());
    let language = layers.pick(&defaults.language, |l| l.language.as_ref());
    let safe_search = layers.pick(&defaults.safe_search, |l| l.safe_search.as_ref());
    let time_range = layers.pick(&defaults.time_range, |l| l.time_range.as_ref());
    let page = layers.pick(&defaults.page, |l| l.page.as_ref());
    let timeout = layers.pick(&defaults.timeout, |l| l.timeout.as_ref());
    let verbose = layers.pick(&defaults.verbose, |l| l.verbose.as_ref());
    let no_color = layers.pick(&defaults.no_color, |l| l.no_color.as_ref());

    let sources = vec![
        ("instance", instance.source),
        ("query", query.source),
        ("results", results.source),
        ("format", format.source),
        ("category", category.source),
        ("language", language.source),
        ("safe_search", safe_search.source),
        ("time_range", time_range.source),
        ("page", page.source),
        ("timeout", timeout.source),
        ("verbose", verbose.source),
        ("no_color", no_color.source),
    ];
    for (field, source) in &sources {
        debug!("{field} <- {source}");
    }

    let config = Config {
        instance: validation::validate_instance(&instance.value)?,
        query: validation::validate_query(&query.value)?,
        results: validation::validate_results_count(results.value)?,
        format: validation::validate_format(&format.value)?,
        category: validation::validate_category(&category.value)?,
        language: language.value.trim().to_string(),
        safe_search: validation::validate_safe_search(safe_search.value)?,
        time_range: validation::validate_time_range(&time_range.value)?,
        page: validation::validate_page(page.value)?,
        timeout: validation::validate_timeout(timeout.value)?,
        verbose: verbose.value,
        no_color: no_color.value,
        sources,
    };
    Ok(config)
}
