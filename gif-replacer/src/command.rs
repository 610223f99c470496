//! GIF command extraction.
//!
//! Messages request a GIF with the literal form `/gif "query"`. The token is
//! case-sensitive, any amount of whitespace may separate it from the opening
//! quote, and the query may be empty. There is no escape syntax, so a query
//! cannot itself contain a double quote.

use regex::Regex;

/// The pattern matching a single GIF command and capturing its query.
const COMMAND_PATTERN: &str = r#"/gif\s*"([^"]*)""#;

/// Extracts `/gif "…"` commands from message text.
pub struct Extractor {
    /// The compiled command pattern.
    pattern: Regex,
}

impl Extractor {
    /// Creates a new extractor with the command pattern compiled.
    #[must_use]
    pub fn new() -> Extractor {
        let pattern = Regex::new(COMMAND_PATTERN).unwrap();

        Extractor { pattern }
    }

    /// Returns every query embedded in a GIF command in `text`, in order of
    /// appearance, duplicates included.
    ///
    /// Matching is non-overlapping and left to right. Text without any
    /// command yields an empty list; that is not an error.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .map(|captures| captures[1].to_string())
            .collect()
    }
}

impl Default for Extractor {
    fn default() -> Extractor {
        Extractor::new()
    }
}

/// Returns the canonical command text for `query` as it appears in a
/// message, with no whitespace between the token and the opening quote.
#[must_use]
pub fn command_text(query: &str) -> String {
    format!("/gif \"{query}\"")
}
