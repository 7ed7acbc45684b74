//! Source-level rewrites applied before CommonMark conversion.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

static HIGHLIGHT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?s)\{%\s*highlight\s+([\w+#.-]+)\s*%\}(.*?)\{%\s*endhighlight\s*%\}",
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile HIGHLIGHT_TAG_RE regex: {e}");
    never_matching_regex()
  })
});

/// Rewrite Liquid-style `{% highlight LANG %}...{% endhighlight %}` blocks
/// into fenced code blocks so they go through the regular highlighting path.
pub fn convert_highlight_tags(content: &str) -> String {
  HIGHLIGHT_TAG_RE
    .replace_all(content, |caps: &Captures| {
      let language = &caps[1];
      let code = caps[2].trim_matches(|c: char| c == '\n' || c == '\r');
      format!("```{language}\n{code}\n```")
    })
    .into_owned()
}
