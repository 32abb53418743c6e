//! JSON responses of the content and search endpoints.
use log::debug;
use markview_utils::FileMatches;
use serde::Serialize;

use crate::site::Site;

/// Error reported for every document that cannot be served, whatever the
/// reason, so clients cannot probe the filesystem.
pub const CONTENT_ERROR: &str = "File not found or invalid";

/// Response of `?api=content&file=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
  Found {
    success: bool,
    file:    String,
    html:    String,
  },
  Failed {
    success: bool,
    error:   String,
  },
}

/// Response of `?search&q=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
  #[serde(rename_all = "camelCase")]
  Found {
    success:       bool,
    query:         String,
    total_results: usize,
    results:       Vec<FileMatches>,
  },
  Failed {
    success: bool,
    error:   String,
    results: Vec<FileMatches>,
  },
}

/// Render one document as an HTML fragment.
#[must_use]
pub fn content(site: &Site, file: &str) -> ContentResponse {
  match site.render_document(file) {
    Ok(document) => {
      ContentResponse::Found {
        success: true,
        file:    document.file,
        html:    document.result.html,
      }
    },
    Err(e) => {
      debug!("Content request for {file:?} failed: {e}");
      ContentResponse::Failed {
        success: false,
        error:   CONTENT_ERROR.to_string(),
      }
    },
  }
}

/// Search every document under the site root.
#[must_use]
pub fn search(site: &Site, query: &str) -> SearchResponse {
  match site.search(query) {
    Ok(results) => {
      SearchResponse::Found {
        success: true,
        query: query.trim().to_string(),
        total_results: results.len(),
        results,
      }
    },
    Err(e) => {
      SearchResponse::Failed {
        success: false,
        error:   e.to_string(),
        results: Vec::new(),
      }
    },
  }
}
