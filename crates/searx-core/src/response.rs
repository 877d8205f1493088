//! The format-independent result model.
//!
//! [`SearchResponse`] is built once from an upstream reply and then only read.
//! Every field has a declared type; anything the instance leaves out becomes
//! an empty sequence, an empty map, or `None`.
//!
//! The serialized form of [`SearchResponse`] is the JSON output schema that
//! scripts consume:
//!
//! ```json
//! {
//!   "query": "golang",
//!   "results": [{ "title": "The Go Programming Language", "url": "https://go.dev/" }],
//!   "answers": [],
//!   "infoboxes": [],
//!   "suggestions": ["golang tutorial"],
//!   "number_of_results": 1200,
//!   "metadata": { "instance": "https://example.test/", "response_time_ms": "84" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title. May be empty when the engine gave none.
    #[serde(default)]
    pub title: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// Snippet text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Engine that produced the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Every engine that returned this result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub engines: Vec<String>,
    /// Upstream relevance score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Upstream category of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Publication date as reported upstream.
    #[serde(
        default,
        rename = "published_date",
        alias = "publishedDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_date: Option<String>,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Full-size image URL (image results).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
}

impl SearchResult {
    /// Snippet text, if present and not blank.
    #[must_use]
    pub fn snippet(&self) -> Option<&str> {
        self.content.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Engines to credit: `engines` when present, else `engine`.
    #[must_use]
    pub fn engine_names(&self) -> Vec<&str> {
        if self.engines.is_empty() {
            self.engine.iter().map(String::as_str).collect()
        } else {
            self.engines.iter().map(String::as_str).collect()
        }
    }
}

/// A direct answer.
///
/// Instances send either a bare string or an object; both deserialize here.
/// Unrecognized keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnswerRepr")]
pub struct Answer {
    /// Answer text.
    pub answer: String,
    /// Source URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Engine that produced the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Remaining upstream keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerRepr {
    Text(String),
    Structured {
        #[serde(default)]
        answer: String,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        engine: Option<String>,
        #[serde(flatten)]
        extra: BTreeMap<String, serde_json::Value>,
    },
}

impl From<AnswerRepr> for Answer {
    fn from(repr: AnswerRepr) -> Self {
        match repr {
            AnswerRepr::Text(answer) => Self {
                answer,
                ..Self::default()
            },
            AnswerRepr::Structured {
                answer,
                url,
                engine,
                extra,
            } => Self {
                answer,
                url,
                engine,
                extra,
            },
        }
    }
}

/// A link listed in an infobox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoboxLink {
    /// Link label.
    #[serde(default)]
    pub title: String,
    /// Link target.
    #[serde(default)]
    pub url: String,
}

/// A label/value row in an infobox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoboxAttribute {
    /// Row label.
    #[serde(default)]
    pub label: String,
    /// Row value. Usually a string, sometimes structured.
    #[serde(default)]
    pub value: serde_json::Value,
}

impl InfoboxAttribute {
    /// The value as display text.
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// A knowledge panel about the query subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infobox {
    /// Panel title.
    #[serde(default)]
    pub infobox: String,
    /// Canonical identifier, usually a URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Summary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Engine that produced the panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    /// Related links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<InfoboxLink>,
    /// Label/value rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<InfoboxAttribute>,
}

/// One complete search reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query that was sent.
    pub query: String,
    /// Results, in upstream order.
    pub results: Vec<SearchResult>,
    /// Direct answers, in upstream order.
    pub answers: Vec<Answer>,
    /// Infoboxes, in upstream order.
    pub infoboxes: Vec<Infobox>,
    /// Alternate queries, in upstream order.
    pub suggestions: Vec<String>,
    /// Total reported upstream; may exceed `results.len()`.
    pub number_of_results: u64,
    /// Diagnostic key/value pairs.
    pub metadata: BTreeMap<String, String>,
}

impl SearchResponse {
    /// Check whether the reply holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Reported total, never less than the results actually present.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.number_of_results.max(self.results.len() as u64)
    }
}
