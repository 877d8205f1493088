//! Text output formatting

use std::fmt::Write;

use colored::Colorize;
use searx_core::{Infobox, SearchResponse, SearchResult};

use super::RenderError;
use super::formatter::{RenderOptions, display_title, inline, tidy};

const INDENT: &str = "    ";

pub struct TextFormatter;

impl TextFormatter {
    /// Format the response as a numbered list.
    ///
    /// Styling is applied only when `options.color` is set. Upstream strings
    /// are passed through [`inline`] first, so no escape sequence reaches the
    /// output unless this formatter wrote it.
    pub fn render(
        response: &SearchResponse,
        options: RenderOptions,
    ) -> Result<String, RenderError> {
        let style = Style {
            color: options.color,
        };
        let mut out = String::new();

        writeln!(
            out,
            "{} {} {}",
            style.label("Search:"),
            inline(&response.query),
            style.dim(&format!("({})", summary(response)))
        )?;
        writeln!(out)?;

        for answer in &response.answers {
            let text = tidy(&answer.answer);
            if text.is_empty() {
                continue;
            }
            writeln!(out, "{} {text}", style.label("Answer:"))?;
            if let Some(url) = answer.url.as_deref().map(tidy).filter(|u| !u.trim().is_empty()) {
                writeln!(out, "{INDENT}{}", style.url(&url))?;
            }
            writeln!(out)?;
        }

        for infobox in &response.infoboxes {
            write_infobox(&mut out, infobox, style)?;
        }

        if response.results.is_empty() {
            writeln!(out, "No results found.")?;
        }
        for (index, result) in response.results.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            write_result(&mut out, index + 1, result, style)?;
        }

        if !response.suggestions.is_empty() {
            let suggestions: Vec<String> = response.suggestions.iter().map(|s| tidy(s)).collect();
            writeln!(out)?;
            writeln!(out, "{} {}", style.label("Suggestions:"), suggestions.join(", "))?;
        }
        if let Some(engines) = response.metadata.get("unresponsive_engines") {
            writeln!(
                out,
                "{}",
                style.dim(&format!("Unresponsive engines: {}", tidy(engines)))
            )?;
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
        format!("{total} results, showing {shown}")
    }
}

fn write_infobox(out: &mut String, infobox: &Infobox, style: Style) -> Result<(), RenderError> {
    let mut lines = Vec::new();
    if let Some(content) = infobox.content.as_deref().map(tidy).filter(|c| !c.is_empty()) {
        lines.push(content);
    }
    for attribute in &infobox.attributes {
        let value = tidy(&attribute.value_text());
        if !value.is_empty() {
            lines.push(format!("{}: {value}", tidy(&attribute.label)));
        }
    }
    for link in &infobox.urls {
        let url = tidy(&link.url);
        if !url.is_empty() {
            lines.push(format!("{}: {}", tidy(&link.title), style.url(&url)));
        }
    }

    let title = tidy(&infobox.infobox);
    if title.is_empty() && lines.is_empty() {
        return Ok(());
    }
    if !title.is_empty() {
        writeln!(out, "{}", style.title(&title))?;
    }
    for line in lines {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_result(
    out: &mut String,
    number: usize,
    result: &SearchResult,
    style: Style,
) -> Result<(), RenderError> {
    writeln!(
        out,
        "{} {}",
        style.dim(&format!("[{number}]")),
        style.title(&display_title(result))
    )?;
    let url = inline(&result.url);
    if !url.trim().is_empty() {
        writeln!(out, "{INDENT}{}", style.url(&url))?;
    }
    if let Some(snippet) = result.snippet().map(tidy) {
        writeln!(out, "{INDENT}{snippet}")?;
    }
    let engines: Vec<String> = result.engine_names().into_iter().map(tidy).collect();
    if !engines.is_empty() {
        writeln!(out, "{INDENT}{}", style.dim(&engines.join(", ")))?;
    }
    Ok(())
}

#[derive(Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn label(self, s: &str) -> String {
        if self.color { s.bold().to_string() } else { s.to_string() }
    }

    fn title(self, s: &str) -> String {
        if self.color { s.bold().green().to_string() } else { s.to_string() }
    }

    fn url(self, s: &str) -> String {
        if self.color { s.cyan().to_string() } else { s.to_string() }
    }

    fn dim(self, s: &str) -> String {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }
}
