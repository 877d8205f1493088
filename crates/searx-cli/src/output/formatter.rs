//! Format dispatch and the helpers shared by the renderers.

use searx_core::{Format, SearchResponse, SearchResult};
use thiserror::Error;

use super::{json::JsonFormatter, markdown::MarkdownFormatter, text::TextFormatter};

/// Rendering failed. Only reachable through a serializer or writer bug.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("failed to serialize results as JSON")]
    Json(#[from] serde_json::Error),
    /// Writing into the output buffer failed.
    #[error("failed to format results")]
    Fmt(#[from] std::fmt::Error),
}

/// Presentation switches that are not part of the result data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI styling (text format only).
    pub color: bool,
}

/// Render `response` in `format`.
///
/// The returned string is the complete document, ending with a newline.
pub fn render(
    response: &SearchResponse,
    format: Format,
    options: RenderOptions,
) -> Result<String, RenderError> {
    match format {
        Format::Json => JsonFormatter::render(response),
        Format::Markdown => MarkdownFormatter::render(response),
        Format::Text => TextFormatter::render(response, options),
    }
}

/// Single-line form of an upstream string.
///
/// Line breaks and whitespace controls become one space each (`\r\n` counts
/// as one break) and other control characters are dropped. Runs of spaces
/// are kept as they are.
pub(super) fn inline(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' && chars.peek() == Some(&'\n') {
            continue;
        }
        if matches!(c, '\u{2028}' | '\u{2029}') || (c.is_control() && c.is_whitespace()) {
            out.push(' ');
        } else if !c.is_control() {
            out.push(c);
        }
    }
    out
}

/// [`inline`] with surrounding whitespace removed, for text outside the
/// query and the (title, url) pairs.
pub(super) fn tidy(raw: &str) -> String {
    inline(raw).trim().to_string()
}

/// Label for a result with neither a title nor a URL.
pub(super) const UNTITLED: &str = "(untitled)";

/// Link text for a result.
///
/// Falls back to the URL when the title is blank, and to [`UNTITLED`] when
/// both are.
pub(super) fn display_title(result: &SearchResult) -> String {
    let title = inline(&result.title);
    if !title.trim().is_empty() {
        return title;
    }
    let url = inline(&result.url);
    if url.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(super) mod fixtures {
    use searx_core::{
        Answer, Infobox, InfoboxAttribute, InfoboxLink, SearchResponse, SearchResult,
    };
    use std::collections::BTreeMap;

    pub fn result(title: &str, url: &str, content: Option<&str>) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            content: content.map(str::to_string),
            ..SearchResult::default()
        }
    }

    pub fn golang() -> SearchResponse {
        let mut metadata = BTreeMap::new();
        metadata.insert("instance".to_string(), "https://example.test/".to_string());
        metadata.insert("page".to_string(), "1".to_string());
        metadata.insert("response_time_ms".to_string(), "84".to_string());

        SearchResponse {
            query: "golang".to_string(),
            results: vec![
                SearchResult {
                    engines: vec!["duckduckgo".into(), "brave".into()],
                    published_date: Some("2024-02-06".into()),
                    ..result(
                        "The Go Programming Language",
                        "https://go.dev/",
                        Some("Go is an open source\nprogramming language."),
                    )
                },
                result("golang/go", "https://github.com/golang/go", None),
                result("", "https://go.dev/tour/", Some("A Tour of Go")),
            ],
            answers: vec![Answer {
                answer: "Go is a language from Google".into(),
                url: Some("https://go.dev/doc/".into()),
                ..Answer::default()
            }],
            infoboxes: vec![Infobox {
                infobox: "Go".into(),
                content: Some("Statically typed, compiled.".into()),
                urls: vec![InfoboxLink {
                    title: "Official website".into(),
                    url: "https://go.dev/".into(),
                }],
                attributes: vec![InfoboxAttribute {
                    label: "Designed by".into(),
                    value: serde_json::json!("Robert Griesemer"),
                }],
                ..Infobox::default()
            }],
            suggestions: vec!["golang tutorial".into(), "golang vs rust".into()],
            number_of_results: 1200,
            metadata,
        }
    }

    /// [`golang`] with a spaced query and a URL containing parentheses.
    pub fn wikipedia() -> SearchResponse {
        let mut response = golang();
        response.query = "go  lang".to_string();
        response.results[1] = result(
            "Go (programming language)",
            "https://en.wikipedia.org/wiki/Go_(programming_language)",
            Some("Go is a statically typed, compiled language."),
        );
        response
    }

    pub fn empty() -> SearchResponse {
        SearchResponse {
            query: "zzzqqqxxx".to_string(),
            ..SearchResponse::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures;
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;

    /// Query and ordered (title, url) pairs as a reader sees them.
    type Listing = (String, Vec<(String, String)>);

    /// An upstream string as the readable formats show it.
    fn shown(raw: &str) -> String {
        raw.replace("\r\n", "\n")
            .chars()
            .filter_map(|c| match c {
                '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                    Some(' ')
                },
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect()
    }

    fn shown_pair(title: &str, url: &str) -> (String, String) {
        let (title, url) = (shown(title), shown(url));
        let label = if !title.trim().is_empty() {
            title
        } else if !url.trim().is_empty() {
            url.clone()
        } else {
            UNTITLED.to_string()
        };
        (label, url)
    }

    fn pairs_from_json(out: &str) -> Listing {
        let value: serde_json::Value = serde_json::from_str(out).unwrap();
        let pairs = value["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| shown_pair(r["title"].as_str().unwrap(), r["url"].as_str().unwrap()))
            .collect();
        (shown(value["query"].as_str().unwrap()), pairs)
    }

    fn unescape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                out.extend(chars.next());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Split `[label](destination)`, or a bare label, into its parts.
    fn parse_entry(entry: &str) -> (String, String) {
        let Some(rest) = entry.strip_prefix('[') else {
            return (unescape(entry), String::new());
        };
        let mut label = String::new();
        let mut chars = rest.char_indices();
        let mut close = 0;
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => label.extend(chars.next().map(|(_, c)| c)),
                ']' => {
                    close = i;
                    break;
                },
                c => label.push(c),
            }
        }
        let destination = rest[close + 1..]
            .strip_prefix('(')
            .and_then(|d| d.strip_suffix(')'))
            .unwrap();
        let url = match destination.strip_prefix('<') {
            Some(angled) => unescape(angled.strip_suffix('>').unwrap()),
            None => destination.to_string(),
        };
        (label, url)
    }

    fn pairs_from_markdown(out: &str) -> Listing {
        let mut lines = out.lines();
        let heading = lines.next().unwrap();
        let query = unescape(heading.strip_prefix("# Search results: ").unwrap());
        let number = Regex::new(r"^\d+\. ").unwrap();
        let pairs = lines
            .filter_map(|line| number.find(line).map(|m| parse_entry(&line[m.end()..])))
            .collect();
        (query, pairs)
    }

    fn pairs_from_text(out: &str) -> Listing {
        let heading = Regex::new(r"(?m)^Search: (.*) \(\d+ results(?:, showing \d+)?\)$").unwrap();
        let entry = Regex::new(r"(?m)^\[\d+\] (.*)\n {4}(.*)$").unwrap();
        let query = heading.captures(out).unwrap()[1].to_string();
        let pairs = entry
            .captures_iter(out)
            .map(|c| (c[1].to_string(), c[2].to_string()))
            .collect();
        (query, pairs)
    }

    fn listings(response: &SearchResponse) -> [Listing; 3] {
        let options = RenderOptions::default();
        [
            pairs_from_json(&render(response, Format::Json, options).unwrap()),
            pairs_from_markdown(&render(response, Format::Markdown, options).unwrap()),
            pairs_from_text(&render(response, Format::Text, options).unwrap()),
        ]
    }

    /// Text with Markdown punctuation, repeated spaces and control bytes.
    const MESSY: &str = r"[a-zA-Z0-9 ()\[\]_*#<>&\\\x1b\x07\t\n\r\x{85}\x{2028}]{0,24}";

    fn messy_response() -> impl Strategy<Value = SearchResponse> {
        let result = (MESSY, MESSY, prop::option::of(MESSY)).prop_map(|(title, path, content)| {
            SearchResult {
                title,
                url: format!("https://en.wikipedia.org/wiki/{path}"),
                content,
                ..SearchResult::default()
            }
        });
        (MESSY, prop::collection::vec(result, 0..6)).prop_map(|(query, results)| {
            SearchResponse {
                query,
                results,
                ..SearchResponse::default()
            }
        })
    }

    #[test]
    fn test_formats_agree_on_results() {
        let [json, markdown, text] = listings(&fixtures::wikipedia());

        assert_eq!(json.0, "go  lang");
        assert_eq!(json.1.len(), 3);
        assert_eq!(
            json.1[1].1,
            "https://en.wikipedia.org/wiki/Go_(programming_language)"
        );
        assert_eq!(json, markdown, "json vs markdown");
        assert_eq!(json, text, "json vs text");
    }

    #[test]
    fn test_formats_agree_on_untitled_result() {
        let mut response = fixtures::golang();
        response.results[2] = fixtures::result(" ", "", None);

        let [json, markdown, _] = listings(&response);
        assert_eq!(json.1[2], (UNTITLED.to_string(), String::new()));
        assert_eq!(json, markdown);
    }

    proptest! {
        #[test]
        fn test_formats_agree_on_any_response(response in messy_response()) {
            let [json, markdown, text] = listings(&response);
            prop_assert_eq!(json.1.len(), response.results.len());
            prop_assert_eq!(&json, &markdown);
            prop_assert_eq!(&json, &text);
        }

        #[test]
        fn test_plain_output_never_has_escape_bytes(response in messy_response()) {
            for format in Format::ALL {
                let out = render(&response, format, RenderOptions { color: false }).unwrap();
                prop_assert!(!out.contains('\u{1b}'), "{} output contains ESC", format);
            }
        }
    }

    #[test]
    fn test_zero_results_never_numbered() {
        let numbered = Regex::new(r"(?m)^(\[\d+\]|\d+\. )").unwrap();
        for format in Format::ALL {
            let out = render(&fixtures::empty(), format, RenderOptions { color: true }).unwrap();
            assert!(!numbered.is_match(&out), "{format} output numbered: {out}");
            assert!(out.ends_with('\n'));
        }
    }

    #[test]
    fn test_no_escape_bytes_without_color() {
        let mut response = fixtures::golang();
        response.results[1].title = "\u{1b}[31mred\u{1b}[0m".into();
        response.suggestions.push("\u{1b}]0;title\u{7}".into());

        for format in Format::ALL {
            let out = render(&response, format, RenderOptions { color: false }).unwrap();
            assert!(!out.contains('\u{1b}'), "{format} output contains ESC");
        }
    }

    #[test]
    fn test_inline_replaces_breaks_and_keeps_spaces() {
        assert_eq!(inline("a\n\tb\r\nc"), "a  b c");
        assert_eq!(inline("go  lang"), "go  lang");
        assert_eq!(inline("\u{1b}[1mbold\u{7}"), "[1mbold");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let result = fixtures::result(" ", "https://a.test/", None);
        assert_eq!(display_title(&result), "https://a.test/");

        let result = fixtures::result("", " ", None);
        assert_eq!(display_title(&result), UNTITLED);
    }
}
