//! Markdown output formatting
//!
//! Results become a numbered list of `[title](url)` links. The URL is written
//! unchanged; one containing spaces or parentheses goes in the angle-bracket
//! form `[title](<url>)`. Answer and infobox URLs are written as `<url>`
//! autolinks so the only inline links in the document are the results.

use std::fmt::Write;

use searx_core::{Infobox, SearchResponse, SearchResult};

use super::RenderError;
use super::formatter::{display_title, inline, tidy};

pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render(response: &SearchResponse) -> Result<String, RenderError> {
        let mut out = String::new();

        writeln!(out, "# Search results: {}", escape(&inline(&response.query)))?;
        writeln!(out)?;
        writeln!(out, "_{}_", summary(response))?;
        writeln!(out)?;

        let answers: Vec<_> = response
            .answers
            .iter()
            .filter(|a| !tidy(&a.answer).is_empty())
            .collect();
        if !answers.is_empty() {
            writeln!(out, "## Answers")?;
            writeln!(out)?;
            for answer in answers {
                write!(out, "- {}", escape(&tidy(&answer.answer)))?;
                let url = answer.url.as_deref().map(tidy).unwrap_or_default();
                if !url.trim().is_empty() {
                    write!(out, " ({})", autolink(&url))?;
                }
                writeln!(out)?;
            }
            writeln!(out)?;
        }

        for infobox in &response.infoboxes {
            write_infobox(&mut out, infobox)?;
        }

        writeln!(out, "---")?;
        writeln!(out)?;
        writeln!(out, "## Results")?;
        writeln!(out)?;
        if response.results.is_empty() {
            writeln!(out, "No results found.")?;
            writeln!(out)?;
        }
        for (index, result) in response.results.iter().enumerate() {
            write_result(&mut out, index + 1, result)?;
        }

        if !response.suggestions.is_empty() || !response.metadata.is_empty() {
            writeln!(out, "---")?;
            writeln!(out)?;
        }
        if !response.suggestions.is_empty() {
            let suggestions: Vec<String> = response
                .suggestions
                .iter()
                .map(|s| escape(&tidy(s)))
                .collect();
            writeln!(out, "**Suggestions:** {}", suggestions.join(", "))?;
            writeln!(out)?;
        }
        if let Some(footer) = footer(response) {
            writeln!(out, "_{footer}_")?;
        }

        // Exactly one trailing newline.
        while out.ends_with("\n\n") {
            out.pop();
        }
        Ok(out)
    }
}

fn summary(response: &SearchResponse) -> String {
    let shown = response.results.len();
    let total = response.total();
    if usize::try_from(total).is_ok_and(|t| t == shown) {
        format!("{total} results")
    } else {
        format!("{total} results reported, showing {shown}")
    }
}

fn write_infobox(out: &mut String, infobox: &Infobox) -> Result<(), RenderError> {
    let title = tidy(&infobox.infobox);
    if !title.is_empty() {
        writeln!(out, "## {}", escape(&title))?;
        writeln!(out)?;
    }
    if let Some(content) = infobox.content.as_deref().map(tidy).filter(|c| !c.is_empty()) {
        writeln!(out, "{}", escape(&content))?;
        writeln!(out)?;
    }

    let mut rows = Vec::new();
    for attribute in &infobox.attributes {
        let value = tidy(&attribute.value_text());
        if !value.is_empty() {
            rows.push(format!(
                "- **{}:** {}",
                escape(&tidy(&attribute.label)),
                escape(&value)
            ));
        }
    }
    for link in &infobox.urls {
        let url = tidy(&link.url);
        if url.trim().is_empty() {
            continue;
        }
        let label = tidy(&link.title);
        if label.trim().is_empty() {
            rows.push(format!("- {}", autolink(&url)));
        } else {
            rows.push(format!("- {}: {}", escape(&label), autolink(&url)));
        }
    }
    if !rows.is_empty() {
        writeln!(out, "{}", rows.join("\n"))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_result(out: &mut String, number: usize, result: &SearchResult) -> Result<(), RenderError> {
    let label = escape(&display_title(result));
    let url = inline(&result.url);
    if url.trim().is_empty() {
        writeln!(out, "{number}. {label}")?;
    } else {
        writeln!(out, "{number}. [{label}]({})", link_destination(&url))?;
    }
    if let Some(snippet) = result.snippet().map(tidy) {
        writeln!(out, "   {}", escape(&snippet))?;
    }

    let mut details: Vec<String> = result
        .engine_names()
        .into_iter()
        .map(tidy)
        .filter(|e| !e.is_empty())
        .collect();
    if let Some(date) = result.published_date.as_deref().map(tidy).filter(|d| !d.is_empty()) {
        details.push(date);
    }
    if !details.is_empty() {
        writeln!(out, "   _{}_", escape(&details.join(", ")))?;
    }
    writeln!(out)?;
    Ok(())
}

fn footer(response: &SearchResponse) -> Option<String> {
    let meta = &response.metadata;
    let mut parts = Vec::new();
    if let Some(instance) = meta.get("instance") {
        parts.push(format!("Instance: {}", escape(&tidy(instance))));
    }
    if let Some(page) = meta.get("page") {
        parts.push(format!("page {}", tidy(page)));
    }
    if let Some(ms) = meta.get("response_time_ms") {
        parts.push(format!("{} ms", tidy(ms)));
    }
    if let Some(engines) = meta.get("unresponsive_engines") {
        parts.push(format!("unresponsive: {}", escape(&tidy(engines))));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Backslash-escape characters with Markdown meaning in running text.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`' | '<' | '>' | '#' | '&') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Link destination for an already-inlined URL.
///
/// The URL bytes are kept. Anything a bare destination cannot hold moves it
/// into `<...>`, where only `<`, `>` and `\\` need a backslash.
fn link_destination(url: &str) -> String {
    let bare = !url
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>' | '\\'));
    if bare {
        return url.to_string();
    }
    let mut angled = String::with_capacity(url.len() + 2);
    angled.push('<');
    for c in url.chars() {
        if matches!(c, '<' | '>' | '\\') {
            angled.push('\\');
        }
        angled.push(c);
    }
    angled.push('>');
    angled
}

/// `<url>` when the URL can be an autolink, escaped text otherwise.
fn autolink(url: &str) -> String {
    if url.chars().any(|c| c.is_whitespace() || matches!(c, '<' | '>')) {
        escape(url)
    } else {
        format!("<{url}>")
    }
}
