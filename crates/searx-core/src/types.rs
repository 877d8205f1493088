//! Typed search parameters.
//!
//! Each enum here is the validated form of one configuration field. Raw
//! values from flags, environment, and config files are strings or integers;
//! [`crate::validation`] turns them into these types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format for rendered results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A single JSON object for scripts.
    Json,
    /// A Markdown document.
    Markdown,
    /// A numbered, human-readable list (default).
    #[default]
    Text,
}

impl Format {
    /// All formats, in declaration order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Markdown, Self::Text];

    /// Lowercase name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }

    /// Check if this format is meant for machines rather than people.
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Search category understood by SearXNG instances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Web results.
    #[default]
    General,
    /// Image search.
    Images,
    /// Video search.
    Videos,
    /// News articles.
    News,
    /// Maps and places.
    Map,
    /// Music and lyrics.
    Music,
    /// Software, repositories, Q&A sites.
    It,
    /// Papers and scientific publications.
    Science,
    /// Torrents and file hosts.
    Files,
    /// Social networks.
    SocialMedia,
}

impl Category {
    /// Every known category, in the order `searx categories` lists them.
    pub const ALL: [Self; 10] = [
        Self::General,
        Self::Images,
        Self::Videos,
        Self::News,
        Self::Map,
        Self::Music,
        Self::It,
        Self::Science,
        Self::Files,
        Self::SocialMedia,
    ];

    /// Name accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Images => "images",
            Self::Videos => "videos",
            Self::News => "news",
            Self::Map => "map",
            Self::Music => "music",
            Self::It => "it",
            Self::Science => "science",
            Self::Files => "files",
            Self::SocialMedia => "social_media",
        }
    }

    /// Value of the `categories` query parameter.
    #[must_use]
    pub const fn upstream_name(self) -> &'static str {
        match self {
            Self::SocialMedia => "social media",
            other => other.as_str(),
        }
    }

    /// One-line description for `searx categories`.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::General => "General web results",
            Self::Images => "Image search",
            Self::Videos => "Video search",
            Self::News => "News articles",
            Self::Map => "Maps and places",
            Self::Music => "Music, tracks and lyrics",
            Self::It => "Software, repositories and Q&A",
            Self::Science => "Scientific publications",
            Self::Files => "Files and torrents",
            Self::SocialMedia => "Social networks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or(())
    }
}

/// Restricts results to a recent period.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// No restriction (the empty string on input).
    #[default]
    Any,
    /// Past day.
    Day,
    /// Past week.
    Week,
    /// Past month.
    Month,
    /// Past year.
    Year,
}

impl TimeRange {
    /// Value of the `time_range` query parameter; `None` when unrestricted.
    #[must_use]
    pub const fn upstream_name(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Day => Some("day"),
            Self::Week => Some("week"),
            Self::Month => Some("month"),
            Self::Year => Some("year"),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.upstream_name().unwrap_or(""))
    }
}

impl FromStr for TimeRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Self::Any),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(()),
        }
    }
}

/// Safe-search filtering level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafeSearch {
    /// No filtering (0).
    #[default]
    Off,
    /// Moderate filtering (1).
    Moderate,
    /// Strict filtering (2).
    Strict,
}

impl SafeSearch {
    /// Numeric level as sent upstream.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Moderate => 1,
            Self::Strict => 2,
        }
    }

    /// Build from a numeric level.
    #[must_use]
    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Moderate),
            2 => Some(Self::Strict),
            _ => None,
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}
