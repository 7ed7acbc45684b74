use std::path::PathBuf;

use knowhow_markdown::MarkdownOptions;

use crate::cli::Cli;

pub const DEFAULT_INPUT_DIR: &str = "content";
pub const DEFAULT_OUTPUT_DIR: &str = "site";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Fixed static content used to build every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
  /// Tera template with `title`, `base_href`, `nav` and `body` slots
  pub page: String,

  /// Tera template with a `target` slot, written as the root `index.html`
  pub redirect: String,

  /// Base stylesheet; the highlight theme CSS is appended to it
  pub stylesheet: String,
}

impl Default for Templates {
  fn default() -> Self {
    Self {
      page:       knowhow_templates::PAGE_TEMPLATE.to_string(),
      redirect:   knowhow_templates::REDIRECT_TEMPLATE.to_string(),
      stylesheet: knowhow_templates::BASE_CSS.to_string(),
    }
  }
}

/// Configuration for a single generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Directory containing the Markdown tree
  pub input_dir: PathBuf,

  /// Directory the site is written to. Recreated on every run.
  pub output_dir: PathBuf,

  /// Global assets (favicon, manifest, ...) copied into the output root.
  /// Skipped if it does not exist.
  pub assets_dir: PathBuf,

  /// Syntax highlighting theme
  pub highlight_theme: String,

  /// Syntax highlighting theme for `prefers-color-scheme: dark`
  pub dark_highlight_theme: Option<String>,

  pub templates: Templates,
}

impl Default for Config {
  fn default() -> Self {
    let markdown = MarkdownOptions::default();
    Self {
      input_dir:            PathBuf::from(DEFAULT_INPUT_DIR),
      output_dir:           PathBuf::from(DEFAULT_OUTPUT_DIR),
      assets_dir:           PathBuf::from(DEFAULT_ASSETS_DIR),
      highlight_theme:      markdown.highlight_theme,
      dark_highlight_theme: markdown.dark_highlight_theme,
      templates:            Templates::default(),
    }
  }
}

impl Config {
  /// Build a configuration from parsed command line arguments.
  #[must_use]
  pub fn from_cli(cli: &Cli) -> Self {
    Self {
      input_dir: cli.input.clone(),
      output_dir: cli.output.clone(),
      ..Self::default()
    }
  }

  /// Options for the Markdown processor used on every page.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      highlight_theme: self.highlight_theme.clone(),
      dark_highlight_theme: self.dark_highlight_theme.clone(),
      ..MarkdownOptions::default()
    }
  }
}
