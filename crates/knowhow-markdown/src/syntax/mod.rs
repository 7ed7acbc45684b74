//! Server-side syntax highlighting for fenced code blocks.
//!
//! Highlighters emit class-based markup; the matching colours come from
//! [`SyntaxHighlighter::stylesheet`], which the site writer appends to the
//! base stylesheet once per run.

mod error;
mod syntect;

pub use error::{SyntaxError, SyntaxResult};
pub use syntect::SyntectHighlighter;

/// Trait for syntax highlighting backends.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Highlight `code` written in `language`.
  ///
  /// Returns the inner markup of a `<code>` element. Unknown languages are
  /// rendered as plain text rather than rejected.
  ///
  /// # Errors
  ///
  /// Returns an error if the backend fails while tokenizing.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;

  /// CSS rules for the classes emitted by [`Self::highlight`].
  ///
  /// # Errors
  ///
  /// Returns an error if the configured theme cannot be turned into CSS.
  fn stylesheet(&self) -> SyntaxResult<String>;
}
