//! # knowhow-markdown
//!
//! Markdown to HTML conversion for knowhow sites. Conversion itself is
//! delegated to `comrak`; this crate wires up the extensions a knowledge base
//! needs and post-processes the resulting body fragment:
//!
//! - legacy `{% highlight LANG %}` blocks are turned into fenced code blocks
//! - fenced code blocks are highlighted server-side with class-based markup
//! - every code block gets exactly one copy-to-clipboard trigger
//! - the page title is taken from the first `<h1>`-`<h3>` heading
//!
//! ```rust
//! use knowhow_markdown::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   highlight_code: false,
//!   ..MarkdownOptions::default()
//! };
//! let processor = MarkdownProcessor::new(options).unwrap();
//! let result = processor.render("# Hello\n\n```\nls -la\n```\n").unwrap();
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains(r#"class="copy-btn""#));
//! ```

pub mod postprocess;
mod preprocess;
pub mod processor;
pub mod syntax;
pub mod utils;

pub use crate::{
  postprocess::{COPY_BUTTON, inject_copy_buttons},
  processor::{MarkdownOptions, MarkdownProcessor, MarkdownResult},
  syntax::{SyntaxError, SyntaxHighlighter, SyntaxResult, SyntectHighlighter},
  utils::extract_title,
};
