//! # CLI Structure and Argument Parsing
//!
//! The command line for `searx`, built with `clap` derive macros.
//!
//! - **Default command**: without a subcommand, the positional words form the
//!   query and a search is run
//! - **Subcommands**: `categories`, `version`, `completion <shell>`
//!
//! ```bash
//! searx rust async runtimes
//! searx -f json -n 5 golang | jq '.results[].url'
//! searx -c news -t week "release notes"
//! searx completion zsh > ~/.zfunc/_searx
//! ```
//!
//! Search flags are kept as raw strings and integers. They become a
//! [`ConfigLayer`] and go through the same validation as values from the
//! environment or the config file, so `--page 0` and `--timeout -1` are
//! reported by the resolver rather than by clap.

use clap::{Parser, Subcommand};
use searx_core::ConfigLayer;
use std::path::PathBuf;

/// Main CLI structure for the `searx` command
#[derive(Parser, Clone, Debug)]
#[command(name = "searx")]
#[command(version)]
#[command(about = "searx - search the web through a SearXNG instance", long_about = None)]
#[command(override_usage = "searx [OPTIONS] <QUERY>...\n       searx <COMMAND>")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search terms; multiple words are joined with spaces
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Base URL of the SearXNG instance. Also via `SEARX_INSTANCE`.
    #[arg(short = 'i', long, value_name = "URL")]
    pub instance: Option<String>,

    /// Number of results to show (1-100). Also via `SEARX_RESULTS`.
    #[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
    pub results: Option<i64>,

    /// Output format: json, markdown or text. Also via `SEARX_FORMAT`.
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Search category (see `searx categories`)
    #[arg(short = 'c', long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Language code such as `en` or `de-CH`, or `all`
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<String>,

    /// Result page, starting at 1
    #[arg(short = 'p', long, value_name = "N", allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Only results from the past day, week, month or year
    #[arg(short = 't', long = "time-range", value_name = "RANGE")]
    pub time_range: Option<String>,

    /// Safe-search level: 0 (off), 1 (moderate), 2 (strict)
    #[arg(
        short = 's',
        long = "safe-search",
        value_name = "LEVEL",
        allow_negative_numbers = true
    )]
    pub safe_search: Option<i64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Log resolution and request details to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `SEARX_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "SEARX_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `searx` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List the search categories an instance understands
    Categories,

    /// Print version information
    Version,

    /// Generate shell completions
    #[command(alias = "completions")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// The query words joined with single spaces, or `None` when none were given.
    #[must_use]
    pub fn query_text(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// The values supplied on the command line.
    ///
    /// Boolean switches only count when they were passed, so an absent
    /// `--no-color` never overrides `NO_COLOR`.
    #[must_use]
    pub fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            instance: self.instance.clone(),
            query: self.query_text(),
            results: self.results,
            format: self.format.clone(),
            category: self.category.clone(),
            language: self.language.clone(),
            safe_search: self.safe_search,
            time_range: self.time_range.clone(),
            page: self.page,
            timeout: self.timeout,
            verbose: self.verbose.then_some(true),
            no_color: self.no_color.then_some(true),
        }
    }
}
