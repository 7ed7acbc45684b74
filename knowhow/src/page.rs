//! Page assembly: converted body + sidebar + base path -> full HTML page.

use std::path::Path;

use html_escape::encode_text;
use tera::{Context, Tera};

use crate::{config::Templates, error::Result};

const PAGE: &str = "page";
const REDIRECT: &str = "redirect";

/// `<base href>` value that makes root-relative links work from a page at
/// `rel_document` (relative to the content root).
///
/// A document at the root gets `./`; one nested `n` directories deep gets `n`
/// parent references.
#[must_use]
pub fn base_href(rel_document: &Path) -> String {
  let depth = rel_document.components().count().saturating_sub(1);
  if depth == 0 {
    "./".to_string()
  } else {
    "../".repeat(depth)
  }
}

/// Page title: the heading extracted from the body if there is one, the
/// document's file name without extension otherwise.
#[must_use]
pub fn resolve_title(extracted: Option<String>, document: &Path) -> String {
  extracted.unwrap_or_else(|| {
    let stem = document
      .file_stem()
      .unwrap_or_default()
      .to_string_lossy();
    encode_text(&stem).into_owned()
  })
}

/// Fills the page and redirect templates.
pub struct PageAssembler {
  tera: Tera,
}

impl PageAssembler {
  /// Compile the page and redirect templates.
  ///
  /// # Errors
  ///
  /// Returns an error if either template does not parse.
  pub fn new(templates: &Templates) -> Result<Self> {
    let mut tera = Tera::default();
    // Registered without an .html suffix so tera leaves our markup alone.
    tera.add_raw_template(PAGE, &templates.page)?;
    tera.add_raw_template(REDIRECT, &templates.redirect)?;
    Ok(Self { tera })
  }

  /// Build a full page. `body`, `nav` and `title` are inserted verbatim and
  /// must already be valid markup.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering the template fails.
  pub fn assemble(
    &self,
    body: &str,
    nav: &str,
    base_href: &str,
    title: &str,
  ) -> Result<String> {
    let mut context = Context::new();
    context.insert("body", body);
    context.insert("nav", nav);
    context.insert("base_href", base_href);
    context.insert("title", title);
    Ok(self.tera.render(PAGE, &context)?)
  }

  /// Build the root redirect page pointing at `target`, a root-relative URL.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering the template fails.
  pub fn redirect(&self, target: &str) -> Result<String> {
    let mut context = Context::new();
    context.insert(
      "target",
      &html_escape::encode_double_quoted_attribute(target),
    );
    Ok(self.tera.render(REDIRECT, &context)?)
  }
}
