use std::fmt;

/// Error type for config template lookups.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration in TOML, written by `markview init`. Every field is
/// listed with its default value.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# MarkView Configuration File

# Directory whose Markdown files are served
root_dir = "."

# Document shown when no file is requested
default_file = "README.md"

# Extension of documents that are listed, served and linked internally
document_extension = "md"

# Title shown in the page header
title = "MarkView"

# Output directory for `markview export`
output_dir = "build"

# Number of threads used by `markview export` (defaults to number of CPU cores)
# jobs = 4

[markdown]
# Query parameter used in internal links, as in `?file=guide.md`
navigation_param = "file"

# Fenced blocks with this info string are rendered as diagrams
diagram_language = "mermaid"

[search]
# Whether the search API answers queries
enable = true

# Shortest accepted query, in characters
min_query_length = 2

# Matches reported per file
max_matches_per_file = 5

[server]
host = "127.0.0.1"
port = 8080
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "root_dir": ".",
  "default_file": "README.md",
  "document_extension": "md",
  "title": "MarkView",
  "output_dir": "build",
  "markdown": {
    "navigation_param": "file",
    "diagram_language": "mermaid"
  },
  "search": {
    "enable": true,
    "min_query_length": 2,
    "max_matches_per_file": 5
  },
  "server": {
    "host": "127.0.0.1",
    "port": 8080
  }
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
