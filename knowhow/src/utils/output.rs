use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::info;

use crate::page::PageAssembler;

/// Location of the stylesheet, relative to the output root.
pub const STYLESHEET_PATH: &str = "static/style.css";

/// Writes the site stylesheet: the base stylesheet followed by the syntax
/// highlighting theme.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_stylesheet(
  output_dir: &Path,
  base_css: &str,
  highlight_css: &str,
) -> Result<()> {
  let path = output_dir.join(STYLESHEET_PATH);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
  }

  fs::write(&path, format!("{base_css}\n{highlight_css}"))
    .wrap_err_with(|| format!("Failed to write CSS file: {}", path.display()))
}

/// Writes `index.html` at the output root, redirecting to `target`.
///
/// Nothing is written if there is no target or an `index.html` already exists
/// (a page rendered from a root `index.md`, or a copied asset).
///
/// # Returns
///
/// The target the redirect points at, if one was written.
///
/// # Errors
///
/// Returns an error if rendering or writing the page fails.
pub fn write_redirect(
  assembler: &PageAssembler,
  output_dir: &Path,
  target: Option<&str>,
) -> Result<Option<String>> {
  let Some(target) = target else {
    info!("No documents found, skipping index.html redirect");
    return Ok(None);
  };

  let index_path = output_dir.join("index.html");
  if index_path.exists() {
    info!("index.html already exists, not writing a redirect");
    return Ok(None);
  }

  let html = assembler.redirect(target)?;
  fs::write(&index_path, html).wrap_err_with(|| {
    format!("Failed to write index.html: {}", index_path.display())
  })?;
  info!("index.html -> {target}");

  Ok(Some(target.to_string()))
}
