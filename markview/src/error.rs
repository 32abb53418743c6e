use std::io;

use markview_config::ConfigError;
use markview_utils::{ResolutionError, SearchError};
use thiserror::Error;

/// Top-level error type for the markview crate.
#[derive(Debug, Error)]
pub enum MarkviewError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error(transparent)]
  Resolution(#[from] ResolutionError),

  #[error(transparent)]
  Search(#[from] SearchError),

  #[error("Thread pool error: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),

  #[error("Export failed for {failed} of {total} documents")]
  Export { failed: usize, total: usize },
}

impl From<tera::Error> for MarkviewError {
  fn from(e: tera::Error) -> Self {
    // tera keeps the useful part of the message in the source chain
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(inner) = source {
      message.push_str(": ");
      message.push_str(&inner.to_string());
      source = inner.source();
    }
    Self::Template(message)
  }
}
