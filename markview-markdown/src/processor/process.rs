//! Entry points with error recovery.
use std::{fs, path::Path};

use log::error;

use super::types::{MarkdownOptions, MarkdownRenderer};
use crate::types::RenderResult;

/// Render markdown content with panic recovery.
///
/// The pipeline is not expected to panic, but a document must never take the
/// caller down with it. A panic is logged and replaced by an error block.
///
/// # Arguments
///
/// * `renderer` - The configured renderer
/// * `content` - The raw markdown content to render
#[must_use]
pub fn render_with_recovery(
  renderer: &MarkdownRenderer,
  content: &str,
) -> RenderResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    renderer.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      if let Some(message) = panic_err.downcast_ref::<String>() {
        error!("Panic during markdown rendering: {message}");
      } else if let Some(message) = panic_err.downcast_ref::<&str>() {
        error!("Panic during markdown rendering: {message}");
      } else {
        error!("Unknown panic during markdown rendering");
      }
      RenderResult {
        html:    "<div class=\"error\">Critical error rendering markdown \
                  content</div>"
          .to_string(),
        headers: Vec::new(),
        title:   None,
      }
    },
  }
}

/// Render a markdown string with default options.
#[must_use]
pub fn render_markdown_string(content: &str) -> RenderResult {
  let renderer = MarkdownRenderer::new(MarkdownOptions::default());
  render_with_recovery(&renderer, content)
}

/// Read and render a markdown file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn render_markdown_file(
  file_path: &Path,
  renderer: &MarkdownRenderer,
) -> Result<RenderResult, String> {
  let content = fs::read_to_string(file_path).map_err(|e| {
    format!("Failed to read file {}: {}", file_path.display(), e)
  })?;

  Ok(render_with_recovery(renderer, &content))
}
