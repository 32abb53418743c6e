//! Static export of a whole document root.
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, error, info};
use markview_config::Config;
use markview_markdown::NavigationStyle;
use rayon::prelude::*;

use crate::{
  error::MarkviewError,
  html::{PageMode, render_page, render_shell},
  site::Site,
};

/// Where the page for `file` is written below `output_dir`.
#[must_use]
pub fn output_path(output_dir: &Path, file: &str, extension: &str) -> PathBuf {
  let stem = file
    .strip_suffix(extension)
    .and_then(|rest| rest.strip_suffix('.'))
    .unwrap_or(file);
  output_dir.join(format!("{stem}.html"))
}

fn export_document(
  site: &Site,
  documents: &[String],
  file: &str,
  output_dir: &Path,
) -> Result<(), MarkviewError> {
  let html = render_page(site, documents, Some(file), PageMode::Exported)?;
  let path = output_path(output_dir, file, &site.config().document_extension);

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, html)?;
  debug!("Wrote {}", path.display());
  Ok(())
}

/// Make sure the export has an `index.html`.
///
/// A root-level default document is reused as the index. Otherwise a page
/// listing every document is generated.
fn ensure_index(
  site: &Site,
  documents: &[String],
  output_dir: &Path,
) -> Result<(), MarkviewError> {
  let index_path = output_dir.join("index.html");
  if index_path.exists() {
    return Ok(());
  }

  let config = site.config();
  let default_file = &config.default_file;
  if !default_file.contains('/') && documents.contains(default_file) {
    let default_path =
      output_path(output_dir, default_file, &config.document_extension);
    info!("Using {} as index.html", default_path.display());
    fs::copy(&default_path, &index_path)?;
    return Ok(());
  }

  info!("No default document found, creating fallback index.html");
  let mut markdown = format!("# {}\n\n", config.title);
  for file in documents {
    markdown.push_str(&format!("- [{file}]({file})\n"));
  }
  let result = site.render_markdown(&markdown);
  let html =
    render_shell(site, documents, "index.html", &result, PageMode::Exported)?;
  fs::write(&index_path, html)?;
  Ok(())
}

/// Render every document below the root into `output_dir`.
///
/// Pages are rendered in parallel on `jobs` threads (all cores when `None`).
/// A document that fails to export does not stop the others; the failures
/// are logged and reported together at the end.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created, the thread
/// pool cannot be built, or any document fails to export.
pub fn export_site(
  config: &Config,
  output_dir: &Path,
  jobs: Option<usize>,
) -> Result<usize, MarkviewError> {
  let site = Site::with_style(config.clone(), NavigationStyle::Static);
  let documents = site.documents();

  fs::create_dir_all(output_dir)?;
  info!("Output directory: {}", output_dir.display());

  let thread_count = jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()?;

  let failed = pool.install(|| {
    documents
      .par_iter()
      .filter(|file| {
        export_document(&site, &documents, file, output_dir)
          .map_err(|e| error!("Failed to export {file}: {e}"))
          .is_err()
      })
      .count()
  });

  if failed > 0 {
    return Err(MarkviewError::Export {
      failed,
      total: documents.len(),
    });
  }

  ensure_index(&site, &documents, output_dir)?;
  info!(
    "Exported {} documents to {}",
    documents.len(),
    output_dir.display()
  );
  Ok(documents.len())
}
