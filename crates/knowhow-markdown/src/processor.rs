//! The Markdown processing pipeline.
//!
//! `preprocess -> comrak -> highlight -> copy buttons -> title`

use comrak::{markdown_to_html, options::Options};
use log::trace;

use crate::{
  postprocess,
  preprocess,
  syntax::{SyntaxHighlighter, SyntaxResult, SyntectHighlighter},
  utils,
};

/// Options controlling [`MarkdownProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown extensions (tables, strikethrough, task
  /// lists, autolinks, footnotes).
  pub gfm: bool,

  /// Highlight fenced code blocks that name a language.
  pub highlight_code: bool,

  /// Theme used for highlighting.
  pub highlight_theme: String,

  /// Theme used when the reader prefers a dark color scheme.
  pub dark_highlight_theme: Option<String>,

  /// Insert a copy-to-clipboard trigger before every code block.
  pub copy_buttons: bool,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:                  true,
      highlight_code:       true,
      highlight_theme:      "InspiredGitHub".to_string(),
      dark_highlight_theme: Some("base16-ocean.dark".to_string()),
      copy_buttons:         true,
    }
  }
}

/// Result of Markdown processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Rendered HTML body fragment.
  pub html: String,

  /// Text of the first `<h1>`-`<h3>` heading, if any.
  pub title: Option<String>,
}

/// Converts Markdown documents into HTML body fragments.
///
/// A processor is immutable once built and can be shared between threads.
pub struct MarkdownProcessor {
  options:     MarkdownOptions,
  highlighter: Option<Box<dyn SyntaxHighlighter>>,
}

impl MarkdownProcessor {
  /// Create a processor, setting up the Syntect highlighter when
  /// `options.highlight_code` is enabled.
  ///
  /// # Errors
  ///
  /// Returns an error if a configured highlight theme does not exist.
  pub fn new(options: MarkdownOptions) -> SyntaxResult<Self> {
    let highlighter: Option<Box<dyn SyntaxHighlighter>> =
      if options.highlight_code {
        Some(Box::new(SyntectHighlighter::new(
          &options.highlight_theme,
          options.dark_highlight_theme.as_deref(),
        )?))
      } else {
        None
      };

    Ok(Self {
      options,
      highlighter,
    })
  }

  /// Create a processor backed by a custom highlighter.
  #[must_use]
  pub fn with_highlighter(
    options: MarkdownOptions,
    highlighter: Box<dyn SyntaxHighlighter>,
  ) -> Self {
    Self {
      options,
      highlighter: Some(highlighter),
    }
  }

  /// Render Markdown to an HTML body fragment and extract its title.
  ///
  /// # Errors
  ///
  /// Returns an error if highlighting a code block fails.
  pub fn render(&self, markdown: &str) -> SyntaxResult<MarkdownResult> {
    let preprocessed = preprocess::convert_highlight_tags(markdown);
    let mut html = markdown_to_html(&preprocessed, &self.comrak_options());

    if let Some(highlighter) = &self.highlighter {
      trace!("Highlighting code blocks with {}", highlighter.name());
      html = postprocess::highlight_code_blocks(&html, |code, language| {
        highlighter.highlight(code, language)
      })?;
    }

    if self.options.copy_buttons {
      html = postprocess::inject_copy_buttons(&html);
    }

    let title = utils::extract_title(&html);
    Ok(MarkdownResult { html, title })
  }

  /// CSS for the highlighter's classes, or an empty string when highlighting
  /// is disabled.
  ///
  /// # Errors
  ///
  /// Returns an error if the theme cannot be converted into CSS.
  pub fn stylesheet(&self) -> SyntaxResult<String> {
    self
      .highlighter
      .as_ref()
      .map_or_else(|| Ok(String::new()), |h| h.stylesheet())
  }

  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.r#unsafe = true;
    options
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn plain_processor() -> MarkdownProcessor {
    MarkdownProcessor::new(MarkdownOptions {
      highlight_code: false,
      ..MarkdownOptions::default()
    })
    .expect("no highlighter to configure")
  }

  #[test]
  fn test_default_options() {
    let options = MarkdownOptions::default();
    assert!(options.gfm);
    assert!(options.highlight_code);
    assert!(options.copy_buttons);
    assert_eq!(options.highlight_theme, "InspiredGitHub");
  }

  #[test]
  fn test_title_falls_out_of_render() {
    let result = plain_processor()
      .render("Some text\n\n## Setup\n\n# Later")
      .expect("render");
    assert_eq!(result.title.as_deref(), Some("Setup"));
  }

  #[test]
  fn test_no_heading_no_title() {
    let result = plain_processor().render("just text").expect("render");
    assert_eq!(result.title, None);
  }

  #[test]
  fn test_stylesheet_empty_without_highlighter() {
    assert_eq!(plain_processor().stylesheet().expect("css"), "");
  }

  #[test]
  fn test_copy_buttons_can_be_disabled() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      highlight_code: false,
      copy_buttons: false,
      ..MarkdownOptions::default()
    })
    .expect("processor");
    let result = processor.render("```\nls\n```\n").expect("render");
    assert!(!result.html.contains("copy-btn"));
  }

  #[test]
  fn test_gfm_tables() {
    let result = plain_processor()
      .render("| a | b |\n|---|---|\n| 1 | 2 |\n")
      .expect("render");
    assert!(result.html.contains("<table>"));
  }
}
