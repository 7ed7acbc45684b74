//! Static content shipped inside the `knowhow` binary.
//!
//! The page template exposes four slots (`title`, `base_href`, `nav` and
//! `body`), the redirect template exposes `target`. Both are tera templates.

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const REDIRECT_TEMPLATE: &str = include_str!("../templates/redirect.html");

pub const BASE_CSS: &str = include_str!("../templates/style.css");

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_template_has_every_slot() {
    for slot in ["{{ title }}", "{{ base_href }}", "{{ nav }}", "{{ body }}"] {
      assert!(PAGE_TEMPLATE.contains(slot), "missing slot {slot}");
    }
  }

  #[test]
  fn page_template_references_root_relative_stylesheet() {
    assert!(PAGE_TEMPLATE.contains(r#"href="static/style.css""#));
  }

  #[test]
  fn redirect_template_has_target_slot() {
    assert!(REDIRECT_TEMPLATE.contains("{{ target }}"));
  }

  #[test]
  fn base_css_styles_copy_button_and_sidebar() {
    assert!(BASE_CSS.contains(".copy-btn"));
    assert!(BASE_CSS.contains(".sidebar.open"));
  }
}
