//! String normalization shared by every join in the pipeline.
//!
//! Keys are normalized once, at ingestion, and compared verbatim afterwards.

/// Characters spreadsheet producers wrap identifiers in to force text
/// formatting (`'123`, `"123"`, `` `123` ``).
const WRAPPING_QUOTES: &[char] = &['\'', '"', '`', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Normalizes a join key part: surrounding whitespace removed, case preserved.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// Normalizes an external platform identifier.
///
/// Whitespace and wrapping quote characters are stripped from both ends,
/// repeatedly, so `" '123' "` becomes `123`. An empty result means the
/// entity cannot receive writes.
pub fn normalize_platform_id(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c.is_whitespace() || WRAPPING_QUOTES.contains(&c))
        .to_string()
}

/// Returns `None` for blank cells, the trimmed value otherwise.
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
