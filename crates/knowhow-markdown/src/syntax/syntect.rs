//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Syntaxes come from two-face, which extends Syntect's bundled Sublime Text
//! definitions. Themes come from Syntect's default theme set.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};

use super::{
  SyntaxHighlighter,
  error::{SyntaxError, SyntaxResult},
};

/// Prefix of every class emitted by [`SyntectHighlighter`].
const CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
  prefix: CLASS_PREFIX,
};

/// Syntect-based syntax highlighter
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
  theme_name:      String,
  dark_theme_name: Option<String>,
}

impl SyntectHighlighter {
  /// Create a highlighter using `theme_name` for light mode and, if given,
  /// `dark_theme_name` for `prefers-color-scheme: dark`.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::ThemeNotFound`] if either theme is unknown.
  pub fn new(
    theme_name: &str,
    dark_theme_name: Option<&str>,
  ) -> SyntaxResult<Self> {
    Self::theme(theme_name)?;
    if let Some(dark) = dark_theme_name {
      Self::theme(dark)?;
    }

    Ok(Self {
      theme_name:      theme_name.to_string(),
      dark_theme_name: dark_theme_name.map(str::to_string),
    })
  }

  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  fn theme(name: &str) -> SyntaxResult<&'static Theme> {
    Self::theme_set()
      .themes
      .get(name)
      .ok_or_else(|| SyntaxError::ThemeNotFound(name.to_string()))
  }

  fn theme_css(name: &str) -> SyntaxResult<String> {
    let theme = Self::theme(name)?;
    css_for_theme_with_class_style(theme, CLASS_STYLE).map_err(|e| {
      SyntaxError::StylesheetFailed {
        theme:  name.to_string(),
        reason: e.to_string(),
      }
    })
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self {
      theme_name:      "InspiredGitHub".to_string(),
      dark_theme_name: None,
    }
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      syntax_set,
      CLASS_STYLE,
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
    }

    Ok(generator.finalize())
  }

  fn stylesheet(&self) -> SyntaxResult<String> {
    let mut css = Self::theme_css(&self.theme_name)?;

    if let Some(dark) = &self.dark_theme_name {
      let dark_css = Self::theme_css(dark)?;
      css.push_str("\n@media (prefers-color-scheme: dark) {\n");
      css.push_str(&dark_css);
      css.push_str("}\n");
    }

    Ok(css)
  }
}
