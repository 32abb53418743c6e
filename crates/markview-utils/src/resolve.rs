//! Mapping requested paths onto documents under the root directory.
use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::debug;

use crate::error::ResolutionError;

/// A document that may be read and served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
  /// The sanitized path as requested, relative to the root.
  pub requested: String,
  /// Canonical location of the document on disk.
  pub path:      PathBuf,
}

impl ResolvedDocument {
  /// Read the document.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read as UTF-8 text.
  pub fn read(&self) -> Result<String, ResolutionError> {
    Ok(fs::read_to_string(&self.path)?)
  }
}

/// Strip traversal sequences and leading separators from a requested path.
///
/// `../` and `..\` are removed until none are left, so sequences such as
/// `....//` cannot reassemble into a traversal.
#[must_use]
pub fn sanitize_path(raw: &str) -> String {
  let mut path = raw.to_string();
  loop {
    let stripped = path.replace("../", "").replace("..\\", "");
    if stripped == path {
      break;
    }
    path = stripped;
  }
  path.trim_start_matches(['/', '\\']).to_string()
}

fn not_found(path: &str, e: &io::Error) -> ResolutionError {
  debug!("Cannot resolve {path}: {e}");
  ResolutionError::NotFound(path.to_string())
}

/// Resolve a requested path to a document under `root`.
///
/// The path is sanitized and joined onto `root`; symlinks are then resolved
/// and the result must be an existing file inside the canonical root whose
/// extension is exactly `extension`.
///
/// # Errors
///
/// Returns the matching [`ResolutionError`] when any of those checks fails.
pub fn resolve_document(
  root: &Path,
  raw: &str,
  extension: &str,
) -> Result<ResolvedDocument, ResolutionError> {
  let requested = sanitize_path(raw);
  let canonical_root = root.canonicalize()?;
  let candidate = root.join(&requested);

  let metadata = fs::symlink_metadata(&candidate)
    .map_err(|e| not_found(&requested, &e))?;
  if metadata.file_type().is_symlink() {
    fs::read_link(&candidate).map_err(|e| {
      debug!("Cannot read symlink {}: {e}", candidate.display());
      ResolutionError::InvalidSymlink(requested.clone())
    })?;
  }

  let path = candidate
    .canonicalize()
    .map_err(|e| not_found(&requested, &e))?;

  if !path.starts_with(&canonical_root) {
    return Err(ResolutionError::OutsideRoot(requested));
  }
  if !path.is_file() {
    return Err(ResolutionError::NotFound(requested));
  }
  if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
    return Err(ResolutionError::InvalidExtension {
      path:     requested,
      expected: extension.to_string(),
    });
  }

  Ok(ResolvedDocument { requested, path })
}
