//! Plain-text teaser derived from a document's prose.

use crate::options::TranspileOptions;

/// Builds the summary with the default limit (120 chars) and fallback.
///
/// ```
/// use folio_core::summary::summarize;
///
/// assert_eq!(summarize("  short  "), "short");
/// assert_eq!(summarize(""), "No summary available.");
/// ```
pub fn summarize(plain: &str) -> String {
    build_summary(plain, &TranspileOptions::default())
}

/// Trims `plain`, truncates it to `summary_max_chars` characters with `...`
/// appended, or returns `summary_fallback` when nothing is left.
pub fn build_summary(plain: &str, options: &TranspileOptions) -> String {
    let trimmed = plain.trim();
    if trimmed.is_empty() {
        return options.summary_fallback.clone();
    }

    match trimmed.char_indices().nth(options.summary_max_chars) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
