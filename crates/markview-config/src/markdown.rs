use serde::{Deserialize, Serialize};

/// Renderer settings exposed through the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
  /// Query parameter carrying the document path in internal links
  pub navigation_param: String,

  /// Fence info string that marks a diagram block
  pub diagram_language: String,
}

impl Default for MarkdownConfig {
  fn default() -> Self {
    Self {
      navigation_param: "file".to_string(),
      diagram_language: "mermaid".to_string(),
    }
  }
}
