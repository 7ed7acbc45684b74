use std::sync::LazyLock;

use regex::Regex;

/// Create a regex that never matches anything.
///
/// Used as a fallback when a static pattern fails to compile, so a bad pattern
/// degrades a single feature instead of aborting the run.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Both patterns are constant and valid")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    // As an ultimate fallback, use an empty pattern that matches nothing
    Regex::new(r"^\b$").unwrap()
  })
}

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<h[1-3](?:\s[^>]*)?>(.*?)</h[1-3]>").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
    log::error!("Failed to compile TAG_RE regex: {e}");
    never_matching_regex()
  })
});

/// Extract a page title from a converted HTML body.
///
/// Returns the text of the first `<h1>`, `<h2>` or `<h3>` element with any
/// nested tags stripped. Entities are left encoded, so the result can be
/// inserted into markup as is. Returns `None` when there is no such heading
/// or its text is blank.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
  let inner = HEADING_RE.captures(html)?.get(1)?.as_str();
  let text = TAG_RE.replace_all(inner, "");
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_string())
}
