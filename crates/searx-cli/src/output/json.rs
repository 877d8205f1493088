//! JSON output formatting

use searx_core::SearchResponse;

use super::RenderError;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Format the whole response as one pretty-printed JSON object
    pub fn render(response: &SearchResponse) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(response)?;
        json.push('\n');
        Ok(json)
    }
}
