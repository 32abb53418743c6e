//! Types for the markview-markdown public API.
use serde::{Deserialize, Serialize};

/// Represents a heading in a rendered document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text with formatting and entities removed.
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID derived from the text, unique within the document.
  pub id:    String,
}

/// Result of rendering one Markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Rendered HTML fragment.
  pub html: String,

  /// Headings in document order (for `ToC`, navigation, etc).
  pub headers: Vec<Header>,

  /// Text of the first level-1 heading, if any.
  pub title: Option<String>,
}
