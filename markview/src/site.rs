//! A document root together with everything needed to serve it.
use std::path::Path;

use log::debug;
use markview_config::Config;
use markview_markdown::{
  MarkdownRenderer,
  NavigationStyle,
  RenderResult,
  render_with_recovery,
};
use markview_utils::{
  FileMatches,
  ResolutionError,
  ResolvedDocument,
  SearchError,
  resolve_document,
  scan_markdown_files,
  search_documents,
};

/// A rendered document and the path it was requested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
  /// Sanitized path, relative to the root.
  pub file:   String,
  pub result: RenderResult,
}

/// The documents under one root directory.
///
/// Documents are discovered and read on every call, so edits on disk show up
/// without a restart.
#[derive(Debug)]
pub struct Site {
  config:   Config,
  renderer: MarkdownRenderer,
}

impl Site {
  /// A site whose links use the `?file=` query style, for the server.
  #[must_use]
  pub fn new(config: Config) -> Self {
    Self::with_style(config, NavigationStyle::Query)
  }

  /// A site whose links use the given navigation style.
  #[must_use]
  pub fn with_style(config: Config, style: NavigationStyle) -> Self {
    let mut options = config.markdown_options();
    options.navigation_style = style;
    Self {
      renderer: MarkdownRenderer::new(options),
      config,
    }
  }

  #[must_use]
  pub const fn config(&self) -> &Config {
    &self.config
  }

  #[must_use]
  pub const fn renderer(&self) -> &MarkdownRenderer {
    &self.renderer
  }

  #[must_use]
  pub fn root(&self) -> &Path {
    &self.config.root_dir
  }

  /// Every document below the root, sorted.
  #[must_use]
  pub fn documents(&self) -> Vec<String> {
    scan_markdown_files(self.root(), &self.config.document_extension)
  }

  /// Map a requested path onto a document below the root.
  ///
  /// # Errors
  ///
  /// Returns an error if the path does not name a document inside the root.
  pub fn resolve(&self, file: &str) -> Result<ResolvedDocument, ResolutionError> {
    resolve_document(self.root(), file, &self.config.document_extension)
  }

  /// Resolve, read and render a document.
  ///
  /// # Errors
  ///
  /// Returns an error if the document cannot be resolved or read.
  pub fn render_document(
    &self,
    file: &str,
  ) -> Result<RenderedDocument, ResolutionError> {
    let document = self.resolve(file)?;
    let content = document.read()?;
    debug!("Rendering {}", document.path.display());

    Ok(RenderedDocument {
      result: render_with_recovery(&self.renderer, &content),
      file:   document.requested,
    })
  }

  /// Render Markdown that does not come from a file, such as error pages.
  #[must_use]
  pub fn render_markdown(&self, markdown: &str) -> RenderResult {
    render_with_recovery(&self.renderer, markdown)
  }

  /// Search every document for `query`.
  ///
  /// # Errors
  ///
  /// Returns an error if search is disabled or the query is too short.
  pub fn search(&self, query: &str) -> Result<Vec<FileMatches>, SearchError> {
    search_documents(
      self.root(),
      &self.documents(),
      query,
      &self.config.search,
    )
  }

  /// Link to a document from a page of this site.
  #[must_use]
  pub fn document_href(&self, path: &str) -> String {
    self
      .renderer
      .links()
      .internal_href(&html_escape::encode_text(path))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn site_in(dir: &TempDir, style: NavigationStyle) -> Site {
    let config = Config {
      root_dir: dir.path().to_path_buf(),
      ..Default::default()
    };
    Site::with_style(config, style)
  }

  #[test]
  fn test_document_href_query_style() {
    let dir = TempDir::new().unwrap();
    let site = site_in(&dir, NavigationStyle::Query);
    assert_eq!(
      site.document_href("docs/a b&c.md"),
      "?file=docs%2Fa%20b%26c.md"
    );
  }

  #[test]
  fn test_document_href_static_style() {
    let dir = TempDir::new().unwrap();
    let site = site_in(&dir, NavigationStyle::Static);
    assert_eq!(site.document_href("docs/a b.md"), "docs/a%20b.html");
  }

  #[test]
  fn test_render_document_uses_sanitized_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("guide.md"), "# Guide\n\n[Home](README.md)")
      .unwrap();
    let site = site_in(&dir, NavigationStyle::Query);

    let rendered = site.render_document("../guide.md").unwrap();
    assert_eq!(rendered.file, "guide.md");
    assert_eq!(rendered.result.title.as_deref(), Some("Guide"));
    assert!(
      rendered
        .result
        .html
        .contains("<a href=\"?file=README.md\">Home</a>")
    );
  }
}
