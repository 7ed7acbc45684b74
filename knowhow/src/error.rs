use std::{
  io,
  path::{Path, PathBuf},
};

use knowhow_markdown::SyntaxError;
use thiserror::Error;

/// Convenience alias for results carrying a [`SiteError`].
pub type Result<T> = std::result::Result<T, SiteError>;

/// Errors raised while turning a content tree into a site.
#[derive(Debug, Error)]
pub enum SiteError {
  #[error("Input directory does not exist: {}", .0.display())]
  MissingInput(PathBuf),

  #[error(
    "Output directory {} overlaps input directory {}",
    output.display(),
    input.display()
  )]
  OverlappingDirs { input: PathBuf, output: PathBuf },

  #[error("I/O error at {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Directory {} links back to one of its ancestors", .0.display())]
  SymlinkLoop(PathBuf),

  #[error("Failed to walk directory: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("{} is not inside {}", path.display(), root.display())]
  OutsideRoot { path: PathBuf, root: PathBuf },

  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error("Markdown error: {0}")]
  Markdown(#[from] SyntaxError),
}

impl SiteError {
  /// Attach the path an I/O operation was working on.
  pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
    Self::Io {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }
}
