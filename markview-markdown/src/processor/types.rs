//! Type definitions for the renderer.
//!
//! # Examples
//!
//! ```
//! use markview_markdown::{MarkdownOptions, MarkdownRenderer};
//!
//! let options = MarkdownOptions {
//!   diagram_language: "graphviz".to_string(),
//!   ..Default::default()
//! };
//!
//! let renderer = MarkdownRenderer::new(options);
//! ```
use crate::links::{LinkRewriter, NavigationStyle};

/// Options for configuring the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Extension of linkable documents, without the leading dot.
  pub document_extension: String,

  /// Query parameter carrying the document path in internal links.
  pub navigation_param: String,

  /// Info string marking a fenced block as a diagram. Also used as the CSS
  /// class of the diagram container.
  pub diagram_language: String,

  /// Whether internal links use the query form or point at exported pages.
  pub navigation_style: NavigationStyle,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      document_extension: "md".to_string(),
      navigation_param:   "file".to_string(),
      diagram_language:   "mermaid".to_string(),
      navigation_style:   NavigationStyle::Query,
    }
  }
}

/// Main Markdown renderer.
///
/// Holds only immutable configuration, so one renderer can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
  pub(crate) options: MarkdownOptions,
  pub(crate) links:   LinkRewriter,
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: MarkdownOptions::default(),
    }
  }

  /// Set the extension of linkable documents.
  #[must_use]
  pub fn document_extension<S: Into<String>>(mut self, extension: S) -> Self {
    self.options.document_extension = extension.into();
    self
  }

  /// Set the query parameter used by internal links.
  #[must_use]
  pub fn navigation_param<S: Into<String>>(mut self, param: S) -> Self {
    self.options.navigation_param = param.into();
    self
  }

  /// Set the info string that marks diagram blocks.
  #[must_use]
  pub fn diagram_language<S: Into<String>>(mut self, language: S) -> Self {
    self.options.diagram_language = language.into();
    self
  }

  /// Set how internal links are written.
  #[must_use]
  pub const fn navigation_style(mut self, style: NavigationStyle) -> Self {
    self.options.navigation_style = style;
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

impl Default for MarkdownOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}
