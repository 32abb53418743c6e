use serde::{Deserialize, Serialize};

/// Configuration for the search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Whether the search endpoint answers queries at all
  pub enable: bool,

  /// Queries shorter than this (after trimming) are rejected
  pub min_query_length: usize,

  /// Matches reported per file; later matches in the same file are dropped
  pub max_matches_per_file: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      enable:               true,
      min_query_length:     2,
      max_matches_per_file: 5,
    }
  }
}
