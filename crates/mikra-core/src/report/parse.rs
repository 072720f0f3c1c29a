//! Decoding the raw completion into a report, with a raw-text fallback.
//!
//! The model is instructed to return bare JSON but often wraps it in a
//! Markdown code fence anyway. The parser strips one leading fence marker
//! (language-tagged or bare) and one trailing marker, then attempts a
//! schema-checked decode. Failure is not an error: the stripped text is
//! handed back for verbatim display, a recognized degraded mode.

use super::schema::AnalysisReport;

/// Outcome of parsing a completion.
#[derive(Debug)]
pub enum ParsedCompletion {
    Report(Box<AnalysisReport>),
    /// The stripped completion text, shown as-is when it is not decodable.
    Raw(String),
}

/// Parse the completion text. Never fails; never panics.
pub fn parse_completion(text: &str) -> ParsedCompletion {
    let stripped = strip_code_fences(text);
    match serde_json::from_str::<AnalysisReport>(&stripped) {
        Ok(report) => ParsedCompletion::Report(Box::new(report)),
        Err(err) => {
            crate::verbose!("completion is not decodable JSON: {err}");
            ParsedCompletion::Raw(stripped)
        }
    }
}

/// Strip a leading ```json / ``` marker and a trailing ``` marker. The
/// language tag matches case-insensitively (`json`, `JSON`, `Json`, ...).
fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(mut rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    if let Some(tag) = rest.get(..4) {
        if tag.eq_ignore_ascii_case("json") {
            rest = &rest[4..];
        }
    }
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim().to_string()
}
