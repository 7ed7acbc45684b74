//! Transformations applied to the HTML body produced by comrak.
//!
//! These work on the markup comrak emits for fenced code blocks
//! (`<pre><code class="language-x">`) and do not parse Markdown.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{syntax::SyntaxResult, utils::never_matching_regex};

/// Copy trigger inserted in front of every code block. The page script copies
/// the text of the button's next sibling.
pub const COPY_BUTTON: &str =
  r#"<button class="copy-btn" onclick="copyCode(this)">Copy</button>"#;

static FENCED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?s)<pre><code class="language-([^"\s]+)">(.*?)</code></pre>"#)
    .unwrap_or_else(|e| {
      log::error!("Failed to compile FENCED_CODE_RE regex: {e}");
      never_matching_regex()
    })
});

static CODE_BLOCK_START_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<pre(?:\s[^>]*)?>\s*<code[\s>]").unwrap_or_else(|e| {
    log::error!("Failed to compile CODE_BLOCK_START_RE regex: {e}");
    never_matching_regex()
  })
});

/// Replace the body of every fenced code block that names a language with the
/// output of `highlight(code, language)`.
///
/// The code handed to `highlight` has its HTML entities decoded. Blocks
/// without a language are left alone.
///
/// # Errors
///
/// Returns the first error produced by `highlight`.
pub fn highlight_code_blocks<F>(
  html: &str,
  mut highlight: F,
) -> SyntaxResult<String>
where
  F: FnMut(&str, &str) -> SyntaxResult<String>,
{
  let mut output = String::with_capacity(html.len() * 2);
  let mut last = 0;

  for caps in FENCED_CODE_RE.captures_iter(html) {
    let (Some(block), Some(language), Some(body)) =
      (caps.get(0), caps.get(1), caps.get(2))
    else {
      continue;
    };

    let code = html_escape::decode_html_entities(body.as_str());
    let highlighted = highlight(&code, language.as_str())?;

    output.push_str(&html[last..block.start()]);
    output.push_str(r#"<pre class="highlight"><code class="language-"#);
    output.push_str(language.as_str());
    output.push_str(r#"">"#);
    output.push_str(&highlighted);
    output.push_str("</code></pre>");
    last = block.end();
  }

  output.push_str(&html[last..]);
  Ok(output)
}

/// Insert [`COPY_BUTTON`] immediately before every `<pre>` element that wraps
/// a `<code>` element.
#[must_use]
pub fn inject_copy_buttons(html: &str) -> String {
  CODE_BLOCK_START_RE
    .replace_all(html, |caps: &Captures| format!("{COPY_BUTTON}{}", &caps[0]))
    .into_owned()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_copy_button_per_code_block() {
    let html = "<pre><code>a</code></pre>\n<p>x</p>\n<pre><code class=\"language-sh\">b</code></pre>";
    let out = inject_copy_buttons(html);
    assert_eq!(out.matches(COPY_BUTTON).count(), 2);
    assert_eq!(out.matches(&format!("{COPY_BUTTON}<pre>")).count(), 1);
    assert_eq!(
      out
        .matches(&format!("{COPY_BUTTON}<pre><code class=\"language-sh\">"))
        .count(),
      1
    );
  }

  #[test]
  fn test_inline_code_and_bare_pre_get_no_button() {
    let html = "<p>use <code>ls</code></p><pre>ascii art</pre><preface>";
    assert_eq!(inject_copy_buttons(html), html);
  }

  #[test]
  fn test_highlighted_block_gets_button() {
    let html = r#"<pre class="highlight"><code class="language-rust">x</code></pre>"#;
    let out = inject_copy_buttons(html);
    assert!(out.starts_with(COPY_BUTTON));
    assert_eq!(out.matches(COPY_BUTTON).count(), 1);
  }

  #[test]
  fn test_highlight_receives_decoded_code() {
    let html = "<pre><code class=\"language-rust\">a &lt; b &amp;&amp; c\n</code></pre>";
    let mut seen = Vec::new();
    let out = highlight_code_blocks(html, |code, lang| {
      seen.push((code.to_string(), lang.to_string()));
      Ok("HL".to_string())
    })
    .expect("highlighting succeeds");

    assert_eq!(seen, vec![("a < b && c\n".to_string(), "rust".to_string())]);
    assert_eq!(
      out,
      r#"<pre class="highlight"><code class="language-rust">HL</code></pre>"#
    );
  }

  #[test]
  fn test_blocks_without_language_are_not_highlighted() {
    let html = "<p>x</p><pre><code>plain\n</code></pre>";
    let out = highlight_code_blocks(html, |_, _| Ok("HL".to_string()))
      .expect("highlighting succeeds");
    assert_eq!(out, html);
  }

  #[test]
  fn test_highlight_error_propagates() {
    let html = "<pre><code class=\"language-rust\">x</code></pre>";
    let result = highlight_code_blocks(html, |_, _| {
      Err(crate::SyntaxError::HighlightingFailed("boom".to_string()))
    });
    assert!(result.is_err());
  }
}
