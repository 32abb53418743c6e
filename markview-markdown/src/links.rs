//! Link classification and anchor markup.
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters kept as-is when encoding a document path into a query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'~');

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
  /// Another document served by the viewer.
  Internal,
  /// Anything else; opened in a new browsing context.
  External,
}

/// How internal links are expressed in the generated markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
  /// `?file=guide.md`, resolved by the server at request time.
  #[default]
  Query,
  /// `guide.html`, for pages written to disk by `export`.
  Static,
}

/// Turns `[text](target)` links into anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewriter {
  extension: String,
  param:     String,
  style:     NavigationStyle,
}

impl Default for LinkRewriter {
  fn default() -> Self {
    Self::new("md", "file", NavigationStyle::Query)
  }
}

impl LinkRewriter {
  /// `extension` is the document extension without the leading dot, `param`
  /// the query parameter used for navigation.
  #[must_use]
  pub fn new(extension: &str, param: &str, style: NavigationStyle) -> Self {
    Self {
      extension: extension.trim_start_matches('.').to_ascii_lowercase(),
      param: param.to_string(),
      style,
    }
  }

  /// A target is internal when it ends with `.<extension>`, ignoring case.
  #[must_use]
  pub fn classify(&self, target: &str) -> LinkKind {
    let target = target.to_ascii_lowercase();
    let internal = target
      .strip_suffix(self.extension.as_str())
      .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1);

    if internal {
      LinkKind::Internal
    } else {
      LinkKind::External
    }
  }

  /// Build the `href` value for an internal target.
  ///
  /// `target` is escaped text, so entities are decoded first and the raw path
  /// is then percent-encoded.
  #[must_use]
  pub fn internal_href(&self, target: &str) -> String {
    let raw = html_escape::decode_html_entities(target);
    match self.style {
      NavigationStyle::Query => {
        format!(
          "?{}={}",
          self.param,
          utf8_percent_encode(&raw, QUERY_VALUE)
        )
      },
      NavigationStyle::Static => {
        let stem = raw
          .len()
          .checked_sub(self.extension.len() + 1)
          .and_then(|end| raw.get(..end))
          .unwrap_or(raw.as_ref());
        let encoded: Vec<String> = stem
          .split('/')
          .map(|part| utf8_percent_encode(part, QUERY_VALUE).to_string())
          .collect();
        format!("{}.html", encoded.join("/"))
      },
    }
  }

  /// Render a link. `text` must already be formatted inline HTML and
  /// `target` escaped text.
  #[must_use]
  pub fn render(&self, text: &str, target: &str) -> String {
    match self.classify(target) {
      LinkKind::Internal => {
        format!("<a href=\"{}\">{text}</a>", self.internal_href(target))
      },
      LinkKind::External => {
        format!(
          "<a href=\"{target}\" target=\"_blank\" rel=\"noopener\">{text}</a>"
        )
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_classify_by_extension() {
    let links = LinkRewriter::default();
    assert_eq!(links.classify("guide.md"), LinkKind::Internal);
    assert_eq!(links.classify("docs/GUIDE.MD"), LinkKind::Internal);
    assert_eq!(links.classify("https://example.com"), LinkKind::External);
    assert_eq!(links.classify("notes.mdx"), LinkKind::External);
    assert_eq!(links.classify(".md"), LinkKind::External);
    assert_eq!(links.classify("md"), LinkKind::External);
  }

  #[test]
  fn test_internal_link_is_percent_encoded() {
    let links = LinkRewriter::default();
    assert_eq!(
      links.render("Guide", "docs/my guide.md"),
      "<a href=\"?file=docs%2Fmy%20guide.md\">Guide</a>"
    );
  }

  #[test]
  fn test_internal_target_is_entity_decoded_first() {
    let links = LinkRewriter::default();
    assert_eq!(links.internal_href("a&amp;b.md"), "?file=a%26b.md");
  }

  #[test]
  fn test_external_link_opens_new_tab() {
    let links = LinkRewriter::default();
    assert_eq!(
      links.render("Site", "https://example.com/?a=1&amp;b=2"),
      "<a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\" \
       rel=\"noopener\">Site</a>"
    );
  }

  #[test]
  fn test_custom_extension_and_param() {
    let links = LinkRewriter::new(".markdown", "doc", NavigationStyle::Query);
    assert_eq!(links.classify("a.md"), LinkKind::External);
    assert_eq!(links.internal_href("a.markdown"), "?doc=a.markdown");
  }

  #[test]
  fn test_static_style_rewrites_extension() {
    let links = LinkRewriter::new("md", "file", NavigationStyle::Static);
    assert_eq!(
      links.internal_href("docs/Setup Guide.MD"),
      "docs/Setup%20Guide.html"
    );
  }
}
