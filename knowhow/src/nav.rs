//! Sidebar navigation rendering.
//!
//! The sidebar mirrors the content tree as nested `<details>` elements. A
//! directory is open exactly when the current document lives somewhere below
//! it, so the whole ancestor chain of the current page is expanded and every
//! other branch is collapsed. Links are relative to the site root and rely on
//! the page's `<base href>` to resolve at any depth.

use std::path::{Component, Path};

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{
  error::{Result, SiteError},
  tree::{Node, OUTPUT_EXTENSION},
};

/// Bytes that cannot appear verbatim in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}')
  .add(b'/')
  .add(b'\\');

/// Indentation per nesting level, in pixels.
pub const INDENT_PX: usize = 16;

/// Per-page state threaded through rendering.
#[derive(Debug, Clone, Copy)]
pub struct NavContext<'a> {
  /// Source path of the document whose page is being rendered
  pub current: &'a Path,
  /// Source path of the content root
  pub root:    &'a Path,
}

/// Render the sidebar for `ctx.current`.
///
/// The root node itself is not shown; its children are rendered at depth 0.
///
/// # Errors
///
/// Returns an error if a document in `tree` does not live under `ctx.root`.
pub fn render_sidebar(tree: &Node, ctx: NavContext<'_>) -> Result<String> {
  let parts = tree
    .children()
    .iter()
    .map(|child| render(child, ctx, 0))
    .collect::<Result<Vec<_>>>()?;
  Ok(parts.join("\n"))
}

/// Render `node` and everything below it.
///
/// `depth` only affects the indentation style.
///
/// # Errors
///
/// Returns an error if a document does not live under `ctx.root`.
pub fn render(node: &Node, ctx: NavContext<'_>, depth: usize) -> Result<String> {
  let style = indent_style(depth);

  match node {
    Node::Directory {
      name,
      path,
      children,
    } => {
      let open = if ctx.current.starts_with(path) {
        " open"
      } else {
        ""
      };

      let mut parts = Vec::with_capacity(children.len() + 2);
      parts.push(format!(
        r#"<details{open}{style}><summary title="{}">{}</summary>"#,
        encode_double_quoted_attribute(name),
        encode_text(name),
      ));
      for child in children {
        parts.push(render(child, ctx, depth + 1)?);
      }
      parts.push("</details>".to_string());
      Ok(parts.join("\n"))
    },

    Node::Document { name, path } => {
      let href = output_href(path, ctx.root)?;
      let class = if path == ctx.current {
        r#" class="active""#
      } else {
        ""
      };
      Ok(format!(
        r#"<a href="{}"{class}{style} title="{}">{}</a>"#,
        encode_double_quoted_attribute(&href),
        encode_double_quoted_attribute(name),
        encode_text(name),
      ))
    },
  }
}

/// Link to the page generated for `document`, relative to the site root.
///
/// Always uses `/` as separator, whatever the platform.
///
/// # Errors
///
/// Returns [`SiteError::OutsideRoot`] if `document` is not below `root`.
pub fn output_href(document: &Path, root: &Path) -> Result<String> {
  let relative = document.strip_prefix(root).map_err(|_| {
    SiteError::OutsideRoot {
      path: document.to_path_buf(),
      root: root.to_path_buf(),
    }
  })?;
  Ok(url_path(&relative.with_extension(OUTPUT_EXTENSION)))
}

/// Percent-encode the normal components of `path` and join them with `/`.
#[must_use]
pub fn url_path(path: &Path) -> String {
  path
    .components()
    .filter_map(|component| {
      match component {
        Component::Normal(part) => {
          Some(
            utf8_percent_encode(&part.to_string_lossy(), PATH_SEGMENT)
              .to_string(),
          )
        },
        _ => None,
      }
    })
    .collect::<Vec<_>>()
    .join("/")
}

fn indent_style(depth: usize) -> String {
  if depth == 0 {
    String::new()
  } else {
    format!(r#" style="margin-left:{}px""#, depth * INDENT_PX)
  }
}
