//! HTTP client for SearXNG instances.
//!
//! One invocation makes exactly one `GET <instance>/search?format=json&...`
//! request, bounded by the configured timeout. The reply is mapped into a
//! [`SearchResponse`]; keys the instance leaves out map to empty values, so
//! partial replies are fine. Failures are final: nothing is retried.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::SearchError;
use crate::response::{Answer, Infobox, SearchResponse, SearchResult};

/// Issues search requests against a single instance.
pub struct SearchClient {
    client: Client,
    timeout: Duration,
}

impl SearchClient {
    /// Create a client whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("searx-cli/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(SearchError::Client)?;
        Ok(Self { client, timeout })
    }

    /// Run the search described by `config`.
    pub async fn search(&self, config: &Config) -> Result<SearchResponse, SearchError> {
        let url = search_url(config);
        let display_url = url.to_string();
        debug!("GET {display_url}");

        let started = Instant::now();
        let body = tokio::time::timeout(self.timeout, self.fetch(url, &display_url))
            .await
            .map_err(|_| SearchError::Timeout {
                url: display_url.clone(),
                timeout: self.timeout,
            })??;
        let elapsed = started.elapsed();

        let reply: RawReply =
            serde_json::from_slice(&body).map_err(|err| SearchError::MalformedResponse {
                url: display_url.clone(),
                reason: err.to_string(),
            })?;

        let response = reply.into_response(config, elapsed);
        info!(
            "{} results ({} reported) in {}ms",
            response.results.len(),
            response.number_of_results,
            elapsed.as_millis()
        );
        Ok(response)
    }

    async fn fetch(&self, url: Url, display_url: &str) -> Result<Vec<u8>, SearchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| self.transport_error(err, display_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamStatus {
                code: status.as_u16(),
                url: display_url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err, display_url))?;
        debug!("received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error, url: &str) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if err.is_decode() {
            SearchError::MalformedResponse {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            SearchError::ConnectionFailure {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// Run one search with a fresh client.
pub async fn execute(config: &Config) -> Result<SearchResponse, SearchError> {
    SearchClient::new(config.timeout)?.search(config).await
}

/// Build the request URL for `config`.
///
/// The instance may carry a path prefix (`https://host/searx`); `search` is
/// appended to it.
#[must_use]
pub fn search_url(config: &Config) -> Url {
    let mut url = config.instance.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("search");
    }

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("q", &config.query)
            .append_pair("format", "json")
            .append_pair("categories", config.category.upstream_name())
            .append_pair("safesearch", &config.safe_search.to_string())
            .append_pair("pageno", &config.page.to_string());
        if !config.language.is_empty() {
            query.append_pair("language", &config.language);
        }
        if let Some(range) = config.time_range.upstream_name() {
            query.append_pair("time_range", range);
        }
    }
    url
}

/// Upstream reply; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReply {
    query: Option<String>,
    number_of_results: Option<serde_json::Number>,
    results: Vec<SearchResult>,
    answers: Vec<Answer>,
    infoboxes: Vec<Infobox>,
    suggestions: Vec<String>,
    corrections: Vec<String>,
    unresponsive_engines: Vec<serde_json::Value>,
}

impl RawReply {
    fn into_response(self, config: &Config, elapsed: Duration) -> SearchResponse {
        // SearXNG has no page-size parameter; the count is applied here.
        let mut results = self.results;
        results.truncate(usize::from(config.results));

        let mut metadata = BTreeMap::new();
        metadata.insert("instance".to_string(), config.instance.to_string());
        metadata.insert("category".to_string(), config.category.to_string());
        metadata.insert("page".to_string(), config.page.to_string());
        metadata.insert(
            "response_time_ms".to_string(),
            elapsed.as_millis().to_string(),
        );
        if !self.corrections.is_empty() {
            metadata.insert("corrections".to_string(), self.corrections.join(", "));
        }
        let unresponsive: Vec<String> = self
            .unresponsive_engines
            .iter()
            .filter_map(engine_name)
            .collect();
        if !unresponsive.is_empty() {
            metadata.insert("unresponsive_engines".to_string(), unresponsive.join(", "));
        }

        SearchResponse {
            query: self
                .query
                .filter(|q| !q.trim().is_empty())
                .unwrap_or_else(|| config.query.clone()),
            results,
            answers: self.answers,
            infoboxes: self.infoboxes,
            suggestions: self.suggestions,
            number_of_results: self
                .number_of_results
                .as_ref()
                .map_or(0, number_to_count),
            metadata,
        }
    }
}

/// Entries are `[name, reason]` pairs or plain names.
fn engine_name(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(name) => Some(name.clone()),
        serde_json::Value::Array(items) => items.first()?.as_str().map(str::to_string),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn number_to_count(number: &serde_json::Number) -> u64 {
    number
        .as_u64()
        .or_else(|| number.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
        .unwrap_or(0)
}
