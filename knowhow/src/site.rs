//! Site generation: one pass from a content directory to a finished site.

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use knowhow_markdown::MarkdownProcessor;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
  config::Config,
  error::SiteError,
  nav::{self, NavContext},
  page::{self, PageAssembler},
  tree::{self, Node, OUTPUT_EXTENSION},
  utils,
};

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
  /// Number of HTML pages rendered from documents
  pub pages: usize,

  /// Number of content and global asset files copied
  pub assets: usize,

  /// Root-relative target of the generated `index.html`, if one was written
  pub redirect: Option<String>,

  /// Absolute path of the output directory
  pub output_dir: PathBuf,
}

/// Shared, read-only state for rendering pages.
struct SiteContext<'a> {
  input_dir:  &'a Path,
  output_dir: &'a Path,
  tree:       &'a Node,
  processor:  &'a MarkdownProcessor,
  assembler:  &'a PageAssembler,
}

impl SiteContext<'_> {
  /// Render the page for `document` and write it to the output directory.
  fn render_page(&self, document: &Path) -> Result<PathBuf> {
    let rel_path = document.strip_prefix(self.input_dir).map_err(|_| {
      SiteError::OutsideRoot {
        path: document.to_path_buf(),
        root: self.input_dir.to_path_buf(),
      }
    })?;

    let markdown = fs::read_to_string(document)
      .map_err(|e| SiteError::io(document, e))?;
    let rendered = self
      .processor
      .render(&markdown)
      .map_err(SiteError::from)
      .wrap_err_with(|| format!("Failed to render {}", document.display()))?;

    let title = page::resolve_title(rendered.title, document);
    let ctx = NavContext {
      current: document,
      root:    self.input_dir,
    };
    let sidebar = nav::render_sidebar(self.tree, ctx)?;
    let html = self.assembler.assemble(
      &rendered.html,
      &sidebar,
      &page::base_href(rel_path),
      &title,
    )?;

    let output_path =
      self.output_dir.join(rel_path.with_extension(OUTPUT_EXTENSION));
    if let Some(parent) = output_path.parent() {
      fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(&output_path, html)
      .map_err(|e| SiteError::io(&output_path, e))?;

    info!("{} -> {}", rel_path.display(), output_path.display());
    Ok(output_path)
  }
}

/// Generate the site described by `config`.
///
/// The output directory is deleted and recreated, so running this twice on
/// the same input yields byte-identical output.
///
/// # Errors
///
/// Returns an error if the input directory is missing, the input and output
/// directories overlap, or any document, asset or template fails. The first
/// failing document aborts the run.
pub fn generate(config: &Config) -> Result<GenerationSummary> {
  let input_dir = resolve_input(&config.input_dir)?;
  let output_dir = absolute_output(&config.output_dir)?;
  check_overlap(&input_dir, &output_dir)?;

  let tree = tree::build(&input_dir).wrap_err_with(|| {
    format!("Failed to read content tree: {}", input_dir.display())
  })?;
  let documents = tree.documents();
  debug!("Found {} documents in {}", documents.len(), input_dir.display());

  let processor = MarkdownProcessor::new(config.markdown_options())
    .wrap_err("Failed to set up Markdown processing")?;
  let assembler = PageAssembler::new(&config.templates)
    .wrap_err("Failed to compile page templates")?;

  prepare_output(&output_dir)?;
  utils::write_stylesheet(
    &output_dir,
    &config.templates.stylesheet,
    &processor.stylesheet()?,
  )?;

  let site = SiteContext {
    input_dir:  &input_dir,
    output_dir: &output_dir,
    tree:       &tree,
    processor:  &processor,
    assembler:  &assembler,
  };
  // rayon picks an arbitrary error when several pages fail, so gather every
  // outcome and report the first failure in navigation order.
  let outcomes: Vec<Result<PathBuf>> = documents
    .par_iter()
    .map(|document| site.render_page(document))
    .collect();
  let pages = outcomes.into_iter().collect::<Result<Vec<_>>>()?;

  let mut assets = utils::copy_content_assets(&input_dir, &output_dir)
    .wrap_err("Failed to copy content assets")?;
  assets += utils::copy_global_assets(&config.assets_dir, &output_dir)
    .wrap_err("Failed to copy global assets")?;

  let first_target = documents
    .first()
    .map(|document| nav::output_href(document, &input_dir))
    .transpose()?;
  let redirect = utils::write_redirect(
    &assembler,
    &output_dir,
    first_target.as_deref(),
  )?;

  Ok(GenerationSummary {
    pages: pages.len(),
    assets,
    redirect,
    output_dir,
  })
}

fn resolve_input(input_dir: &Path) -> Result<PathBuf> {
  if !input_dir.is_dir() {
    return Err(SiteError::MissingInput(input_dir.to_path_buf()).into());
  }
  Ok(fs::canonicalize(input_dir).map_err(|e| SiteError::io(input_dir, e))?)
}

fn absolute_output(output_dir: &Path) -> Result<PathBuf> {
  let absolute = if output_dir.exists() {
    fs::canonicalize(output_dir)
  } else {
    std::path::absolute(output_dir)
  };
  Ok(absolute.map_err(|e| SiteError::io(output_dir, e))?)
}

/// Refuse to wipe a directory that contains, or lives inside, the input.
fn check_overlap(input_dir: &Path, output_dir: &Path) -> Result<()> {
  if output_dir.starts_with(input_dir) || input_dir.starts_with(output_dir) {
    return Err(
      SiteError::OverlappingDirs {
        input:  input_dir.to_path_buf(),
        output: output_dir.to_path_buf(),
      }
      .into(),
    );
  }
  Ok(())
}

fn prepare_output(output_dir: &Path) -> Result<()> {
  if output_dir.exists() {
    debug!("Removing previous output at {}", output_dir.display());
    fs::remove_dir_all(output_dir)
      .map_err(|e| SiteError::io(output_dir, e))?;
  }
  fs::create_dir_all(output_dir).map_err(|e| SiteError::io(output_dir, e))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_overlap_detection() {
    let root = Path::new("/srv/site");
    assert!(check_overlap(root, Path::new("/srv/site/out")).is_err());
    assert!(check_overlap(root, Path::new("/srv")).is_err());
    assert!(check_overlap(root, root).is_err());
    assert!(check_overlap(root, Path::new("/srv/site-out")).is_ok());
  }

  #[test]
  fn test_missing_input_is_reported() {
    let dir = tempdir().expect("tempdir");
    let err = resolve_input(&dir.path().join("nope")).expect_err("missing");
    assert!(matches!(
      err.downcast_ref::<SiteError>(),
      Some(SiteError::MissingInput(_))
    ));
  }

  #[test]
  fn test_prepare_output_clears_stale_files() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("old")).expect("mkdir");
    fs::write(out.join("old/stale.html"), "x").expect("write");

    prepare_output(&out).expect("prepare");

    assert!(out.is_dir());
    assert_eq!(fs::read_dir(&out).expect("read").count(), 0);
  }
}
