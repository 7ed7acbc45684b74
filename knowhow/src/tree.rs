//! In-memory mirror of the content directory.
//!
//! The tree is built in one pass and never mutated afterwards. Inside every
//! directory, sub-directories come before documents and each group is sorted
//! case-insensitively by display name.

use std::{
  cmp::Ordering,
  fs,
  path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::error::{Result, SiteError};

/// Extension of source documents, compared case-insensitively.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Extension of generated pages.
pub const OUTPUT_EXTENSION: &str = "html";

/// Whether `path` names a source document (by extension only).
#[must_use]
pub fn is_document(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// A directory or a document in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Directory {
    /// Directory name
    name:     String,
    /// Absolute path of the directory
    path:     PathBuf,
    /// Sub-directories first, then documents
    children: Vec<Node>,
  },
  Document {
    /// File name without extension
    name: String,
    /// Absolute path of the source file
    path: PathBuf,
  },
}

impl Node {
  /// Display label of the node.
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Directory { name, .. } | Self::Document { name, .. } => name,
    }
  }

  /// Source location of the node.
  #[must_use]
  pub fn path(&self) -> &Path {
    match self {
      Self::Directory { path, .. } | Self::Document { path, .. } => path,
    }
  }

  /// Children of a directory; always empty for documents.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    match self {
      Self::Directory { children, .. } => children,
      Self::Document { .. } => &[],
    }
  }

  #[must_use]
  pub const fn is_document(&self) -> bool {
    matches!(self, Self::Document { .. })
  }

  /// Every document below this node, in navigation order.
  #[must_use]
  pub fn documents(&self) -> Vec<&Path> {
    let mut documents = Vec::new();
    self.collect_documents(&mut documents);
    documents
  }

  fn collect_documents<'a>(&'a self, documents: &mut Vec<&'a Path>) {
    match self {
      Self::Directory { children, .. } => {
        for child in children {
          child.collect_documents(documents);
        }
      },
      Self::Document { path, .. } => documents.push(path),
    }
  }
}

/// Navigation order: directories before documents, then case-insensitive
/// name, then path so that names differing only in case stay stable.
fn compare_nodes(a: &Node, b: &Node) -> Ordering {
  a.is_document()
    .cmp(&b.is_document())
    .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
    .then_with(|| a.path().cmp(b.path()))
}

/// Build the tree rooted at `root`.
///
/// `root` must be an existing directory; pass a canonical path to get
/// absolute `path` values throughout. Every sub-directory becomes a
/// [`Node::Directory`], even if it holds no documents. Files that are not
/// documents are skipped.
///
/// # Errors
///
/// Returns an error if any entry cannot be read (permissions, broken
/// symlinks) or a directory symlink points back at one of its ancestors.
pub fn build(root: &Path) -> Result<Node> {
  let canonical_root =
    fs::canonicalize(root).map_err(|e| SiteError::io(root, e))?;
  let mut ancestors = vec![canonical_root];
  let children = build_children(root, &mut ancestors)?;

  let tree = Node::Directory {
    name: display_name(root),
    path: root.to_path_buf(),
    children,
  };
  trace!("Built tree with {} documents", tree.documents().len());
  Ok(tree)
}

fn build_children(
  dir: &Path,
  ancestors: &mut Vec<PathBuf>,
) -> Result<Vec<Node>> {
  let entries = fs::read_dir(dir).map_err(|e| SiteError::io(dir, e))?;
  let mut children = Vec::new();

  for entry in entries {
    let path = entry.map_err(|e| SiteError::io(dir, e))?.path();
    // Follows symlinks, so a dangling link is reported here.
    let metadata = fs::metadata(&path).map_err(|e| SiteError::io(&path, e))?;

    if metadata.is_dir() {
      let canonical =
        fs::canonicalize(&path).map_err(|e| SiteError::io(&path, e))?;
      if ancestors.contains(&canonical) {
        return Err(SiteError::SymlinkLoop(path));
      }

      ancestors.push(canonical);
      let grandchildren = build_children(&path, ancestors)?;
      ancestors.pop();

      children.push(Node::Directory {
        name: display_name(&path),
        path,
        children: grandchildren,
      });
    } else if metadata.is_file() && is_document(&path) {
      children.push(Node::Document {
        name: document_name(&path),
        path,
      });
    } else {
      debug!("Not a document, leaving it to asset copying: {}", path.display());
    }
  }

  children.sort_by(compare_nodes);
  Ok(children)
}

fn display_name(path: &Path) -> String {
  path.file_name().map_or_else(
    || path.display().to_string(),
    |name| name.to_string_lossy().into_owned(),
  )
}

fn document_name(path: &Path) -> String {
  path.file_stem().map_or_else(
    || display_name(path),
    |stem| stem.to_string_lossy().into_owned(),
  )
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use tempfile::tempdir;

  use super::*;

  fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, "# x\n").expect("write file");
  }

  fn names(node: &Node) -> Vec<&str> {
    node.children().iter().map(Node::name).collect()
  }

  #[test]
  fn test_is_document() {
    assert!(is_document(Path::new("a/b.md")));
    assert!(is_document(Path::new("B.MD")));
    assert!(!is_document(Path::new("b.markdown")));
    assert!(!is_document(Path::new("md")));
    assert!(!is_document(Path::new("image.png")));
  }

  #[test]
  fn test_directories_first_then_case_insensitive() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    touch(&root.join("beta.md"));
    touch(&root.join("Alpha.md"));
    touch(&root.join("zeta/doc.md"));
    touch(&root.join("Gamma/doc.md"));
    touch(&root.join("notes.txt"));

    let tree = build(root).expect("build");
    assert_eq!(names(&tree), ["Gamma", "zeta", "Alpha", "beta"]);
  }

  #[test]
  fn test_empty_directory_is_kept() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("empty")).expect("mkdir");

    let tree = build(dir.path()).expect("build");
    assert_eq!(tree.children().len(), 1);
    let empty = &tree.children()[0];
    assert!(!empty.is_document());
    assert_eq!(empty.name(), "empty");
    assert!(empty.children().is_empty());
  }

  #[test]
  fn test_documents_in_navigation_order() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    touch(&root.join("z.md"));
    touch(&root.join("a/b/deep.md"));
    touch(&root.join("a/top.md"));

    let tree = build(root).expect("build");
    let docs: Vec<PathBuf> = tree
      .documents()
      .into_iter()
      .map(|p| p.strip_prefix(root).expect("under root").to_path_buf())
      .collect();
    assert_eq!(docs, [
      PathBuf::from("a/b/deep.md"),
      PathBuf::from("a/top.md"),
      PathBuf::from("z.md"),
    ]);
  }

  #[test]
  fn test_document_name_drops_extension() {
    let dir = tempdir().expect("tempdir");
    touch(&dir.path().join("getting.started.md"));

    let tree = build(dir.path()).expect("build");
    assert_eq!(names(&tree), ["getting.started"]);
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = build(&dir.path().join("nope"));
    assert!(matches!(result, Err(SiteError::Io { .. })));
  }

  #[cfg(unix)]
  #[test]
  fn test_dangling_symlink_aborts() {
    let dir = tempdir().expect("tempdir");
    std::os::unix::fs::symlink(
      dir.path().join("missing.md"),
      dir.path().join("link.md"),
    )
    .expect("symlink");

    assert!(matches!(build(dir.path()), Err(SiteError::Io { .. })));
  }

  #[cfg(unix)]
  #[test]
  fn test_symlink_loop_aborts() {
    let dir = tempdir().expect("tempdir");
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).expect("mkdir");
    std::os::unix::fs::symlink(dir.path(), sub.join("back"))
      .expect("symlink");

    assert!(matches!(build(dir.path()), Err(SiteError::SymlinkLoop(_))));
  }
}
