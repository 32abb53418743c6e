//! Full HTML pages around rendered documents.
use log::{debug, warn};
use markview_markdown::{Header, RenderResult};
use markview_templates::{DEFAULT_CSS, MAIN_JS, PAGE_TEMPLATE};
use markview_utils::{ResolutionError, sanitize_path};
use serde::Serialize;
use tera::Tera;

use crate::{error::MarkviewError, site::Site};

/// One entry of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
  pub path:   String,
  pub href:   String,
  pub active: bool,
}

/// How a page is going to be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
  /// Served over HTTP; the search endpoint is available.
  Served,
  /// Written to disk; links resolve against a `<base href>`.
  Exported,
}

/// Markdown shown in place of a document that cannot be served.
#[must_use]
pub fn error_document(
  file: &str,
  error: &ResolutionError,
  extension: &str,
) -> String {
  match error {
    ResolutionError::NotFound(_) => {
      format!("# File Not Found\n\nThe file `{file}` could not be found.")
    },
    ResolutionError::OutsideRoot(_) => {
      "# Error\n\nThe requested file path is invalid or not allowed."
        .to_string()
    },
    ResolutionError::InvalidExtension { .. } => {
      format!("# Error\n\nOnly markdown (.{extension}) files are allowed.")
    },
    ResolutionError::InvalidSymlink(_) => {
      "# Error\n\nThe symlink could not be resolved.".to_string()
    },
    ResolutionError::Io(_) => {
      "# Error\n\nThe file could not be read.".to_string()
    },
  }
}

/// `<base href>` that makes root-relative links work from a page at `file`.
#[must_use]
pub fn base_href(file: &str) -> String {
  let depth = file.matches('/').count();
  if depth == 0 {
    "./".to_string()
  } else {
    "../".repeat(depth)
  }
}

/// Render the page for `file`, or for the default document if `file` is
/// `None`.
///
/// Documents that cannot be resolved produce an error page through the same
/// renderer instead of failing.
///
/// # Errors
///
/// Returns an error only if the page template fails to render.
pub fn render_page(
  site: &Site,
  documents: &[String],
  file: Option<&str>,
  mode: PageMode,
) -> Result<String, MarkviewError> {
  let file = file.map_or_else(
    || site.config().default_file.clone(),
    sanitize_path,
  );

  let result = match site.render_document(&file) {
    Ok(document) => document.result,
    Err(e) => {
      warn!("Cannot serve {file}: {e}");
      let markdown =
        error_document(&file, &e, &site.config().document_extension);
      site.render_markdown(&markdown)
    },
  };

  render_shell(site, documents, &file, &result, mode)
}

/// Wrap a rendered document in the page template.
///
/// # Errors
///
/// Returns an error if the page template fails to render.
pub fn render_shell(
  site: &Site,
  documents: &[String],
  file: &str,
  result: &RenderResult,
  mode: PageMode,
) -> Result<String, MarkviewError> {
  let config = site.config();

  // The `.html` name turns on autoescaping
  let mut tera = Tera::default();
  tera.add_raw_template("page.html", PAGE_TEMPLATE)?;

  let links: Vec<DocumentLink> = documents
    .iter()
    .map(|path| {
      DocumentLink {
        path:   path.clone(),
        href:   site.document_href(path),
        active: path == file,
      }
    })
    .collect();

  let page_title = result.title.as_deref().unwrap_or(file);
  let headers: &[Header] = &result.headers;
  let (base, search_enabled) = match mode {
    PageMode::Served => (String::new(), config.search.enable),
    PageMode::Exported => (base_href(file), false),
  };

  let mut tera_context = tera::Context::new();
  tera_context.insert("base_href", &base);
  tera_context.insert("page_title", page_title);
  tera_context.insert("site_title", &config.title);
  tera_context.insert("current_file", file);
  tera_context.insert("css", DEFAULT_CSS);
  tera_context.insert("js", MAIN_JS);
  tera_context.insert("content", &result.html);
  tera_context.insert("headers", headers);
  tera_context.insert("documents", &links);
  tera_context.insert("search_enabled", &search_enabled);
  tera_context.insert("search_min_length", &config.search.min_query_length);
  tera_context.insert("diagram_class", &config.markdown.diagram_language);
  tera_context.insert("navigation_param", &config.markdown.navigation_param);

  let html = tera.render("page.html", &tera_context)?;
  debug!("Rendered page for {file} ({} bytes)", html.len());
  Ok(html)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_href_depth() {
    assert_eq!(base_href("README.md"), "./");
    assert_eq!(base_href("docs/guide.md"), "../");
    assert_eq!(base_href("a/b/c.md"), "../../");
  }

  #[test]
  fn test_error_documents() {
    assert_eq!(
      error_document(
        "missing.md",
        &ResolutionError::NotFound("missing.md".into()),
        "md"
      ),
      "# File Not Found\n\nThe file `missing.md` could not be found."
    );
    assert_eq!(
      error_document(
        "notes.txt",
        &ResolutionError::InvalidExtension {
          path:     "notes.txt".into(),
          expected: "md".into(),
        },
        "md"
      ),
      "# Error\n\nOnly markdown (.md) files are allowed."
    );
  }
}
