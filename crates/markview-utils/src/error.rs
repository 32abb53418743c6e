use std::io;

use thiserror::Error;

/// Why a requested document could not be served.
#[derive(Debug, Error)]
pub enum ResolutionError {
  #[error("File not found: {0}")]
  NotFound(String),

  #[error("Path resolves outside the document root: {0}")]
  OutsideRoot(String),

  #[error("Only .{expected} files are allowed: {path}")]
  InvalidExtension { path: String, expected: String },

  #[error("Invalid symlink: {0}")]
  InvalidSymlink(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

/// Error type for search requests
#[derive(Debug, Error)]
pub enum SearchError {
  #[error("Search query must be at least {min} characters")]
  QueryTooShort { min: usize },

  #[error("Search is disabled")]
  Disabled,

  #[error("Invalid search query: {0}")]
  Pattern(#[from] regex::Error),
}
