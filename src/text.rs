//! Plain-text normalization for scraped markup.
//!
//! Feed titles and descriptions arrive as HTML fragments; release notes are
//! Markdown with embedded tags. [`clean`] reduces all of them to a single
//! line of plain text before translation and rendering.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup from raw fetched text.
///
/// Removes every `<...>` span (non-greedy, no nesting awareness), decodes
/// HTML character entities, collapses all whitespace runs (including
/// newlines) to a single space, and trims the ends. Always returns a string,
/// possibly empty.
///
/// Known limitation: an unclosed `<` with no matching `>` is left in place,
/// but a stray `>` later in the text turns everything between them into a
/// "tag" and strips it.
pub fn clean(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    let decoded = html_escape::decode_html_entities(stripped.as_ref());
    WHITESPACE_RE
        .replace_all(decoded.as_ref(), " ")
        .trim()
        .to_string()
}
