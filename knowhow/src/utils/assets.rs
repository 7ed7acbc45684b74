use std::{
  fs::{self, File},
  path::Path,
};

use color_eyre::eyre::{Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::{
  error::SiteError,
  tree::is_document,
  utils::output::STYLESHEET_PATH,
};

/// Copies every non-document file below `input_dir` to the same relative
/// location below `output_dir`.
///
/// # Returns
///
/// The number of files copied.
///
/// # Errors
///
/// Returns an error if the walk fails or any file cannot be copied.
pub fn copy_content_assets(input_dir: &Path, output_dir: &Path) -> Result<usize> {
  copy_tree(input_dir, output_dir, |path| !is_document(path))
}

/// Copies the global assets directory (favicon, manifest, ...) into the root
/// of `output_dir`. A missing directory is not an error.
///
/// # Returns
///
/// The number of files copied.
///
/// # Errors
///
/// Returns an error if the walk fails or any file cannot be copied.
pub fn copy_global_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize> {
  if !assets_dir.is_dir() {
    debug!(
      "No global assets directory at {}, skipping",
      assets_dir.display()
    );
    return Ok(0);
  }

  debug!("Copying global assets from {}", assets_dir.display());
  copy_tree(assets_dir, output_dir, |_| true)
}

fn copy_tree<F>(source_dir: &Path, dest_dir: &Path, include: F) -> Result<usize>
where
  F: Fn(&Path) -> bool,
{
  let mut copied = 0;

  for entry in WalkDir::new(source_dir)
    .follow_links(true)
    .sort_by_file_name()
  {
    let entry = entry.map_err(SiteError::from)?;
    let path = entry.path();
    if entry.file_type().is_dir() || !include(path) {
      continue;
    }

    let rel_path = path.strip_prefix(source_dir).wrap_err_with(|| {
      format!("Failed to determine relative path for {}", path.display())
    })?;
    if replaces_stylesheet(rel_path) {
      warn!(
        "{} replaces the generated {STYLESHEET_PATH}",
        path.display()
      );
    }
    let dest = dest_dir.join(rel_path);
    copy_preserving_metadata(path, &dest)?;
    debug!("Copied {} -> {}", path.display(), dest.display());
    copied += 1;
  }

  Ok(copied)
}

fn replaces_stylesheet(rel_path: &Path) -> bool {
  rel_path == Path::new(STYLESHEET_PATH)
}

/// Copies a single file, keeping its permissions and, where the platform
/// allows it, its modification time.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created or the
/// copy itself fails.
pub fn copy_preserving_metadata(source: &Path, dest: &Path) -> Result<()> {
  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }

  // fs::copy carries the permission bits over
  fs::copy(source, dest).wrap_err_with(|| {
    format!("Failed to copy {} to {}", source.display(), dest.display())
  })?;

  let modified = fs::metadata(source).and_then(|meta| meta.modified());
  let result = modified.and_then(|time| {
    File::options().write(true).open(dest)?.set_modified(time)
  });
  if let Err(e) = result {
    debug!(
      "Could not preserve modification time of {}: {e}",
      dest.display()
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_content_assets_skip_documents() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("in");
    let output = dir.path().join("out");
    fs::create_dir_all(input.join("img")).expect("mkdir");
    fs::write(input.join("page.md"), "# p").expect("write");
    fs::write(input.join("UPPER.MD"), "# p").expect("write");
    fs::write(input.join("img/logo.png"), [0_u8, 1, 2]).expect("write");
    fs::write(input.join("notes.txt"), "n").expect("write");

    let copied = copy_content_assets(&input, &output).expect("copy");

    assert_eq!(copied, 2);
    assert_eq!(
      fs::read(output.join("img/logo.png")).expect("read"),
      [0_u8, 1, 2]
    );
    assert!(output.join("notes.txt").is_file());
    assert!(!output.join("page.md").exists());
    assert!(!output.join("UPPER.MD").exists());
  }

  #[test]
  fn test_stylesheet_collision_is_detected() {
    assert!(replaces_stylesheet(Path::new("static/style.css")));
    assert!(!replaces_stylesheet(Path::new("static/other.css")));
    assert!(!replaces_stylesheet(Path::new("guide/static/style.css")));
  }

  #[test]
  fn test_missing_global_assets_is_fine() {
    let dir = tempdir().expect("tempdir");
    let copied =
      copy_global_assets(&dir.path().join("assets"), &dir.path().join("out"))
        .expect("copy");
    assert_eq!(copied, 0);
  }

  #[test]
  fn test_global_assets_land_in_output_root() {
    let dir = tempdir().expect("tempdir");
    let assets = dir.path().join("assets");
    let output = dir.path().join("out");
    fs::create_dir_all(assets.join("icons")).expect("mkdir");
    fs::write(assets.join("favicon.ico"), "ico").expect("write");
    fs::write(assets.join("icons/192.png"), "png").expect("write");

    let copied = copy_global_assets(&assets, &output).expect("copy");

    assert_eq!(copied, 2);
    assert!(output.join("favicon.ico").is_file());
    assert!(output.join("icons/192.png").is_file());
  }

  #[test]
  fn test_modification_time_is_preserved() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("a.txt");
    let dest = dir.path().join("nested/b.txt");
    fs::write(&source, "a").expect("write");
    let old = std::time::SystemTime::UNIX_EPOCH
      + std::time::Duration::from_secs(1_000_000_000);
    File::options()
      .write(true)
      .open(&source)
      .expect("open")
      .set_modified(old)
      .expect("set mtime");

    copy_preserving_metadata(&source, &dest).expect("copy");

    let copied = fs::metadata(&dest).expect("meta").modified().expect("mtime");
    assert_eq!(copied, old);
  }
}
