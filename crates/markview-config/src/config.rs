use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use markview_markdown::{MarkdownOptions, NavigationStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  error::ConfigError,
  markdown::MarkdownConfig,
  search::SearchConfig,
  server::ServerConfig,
};

/// File names looked up in the working directory when no config file is
/// given explicitly.
const CONFIG_FILENAMES: [&str; 4] = [
  "markview.toml",
  "markview.json",
  ".markview.toml",
  ".markview.json",
];

/// Configuration for the `MarkView` document viewer.
///
/// [`Config`] controls which directory is served, how documents are linked
/// and rendered, the search API and the HTTP server. Fields are typically
/// loaded from a TOML or JSON config file and can be overridden with
/// `--config KEY=VALUE` or dedicated CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory whose documents are listed and served.
  pub root_dir: PathBuf,

  /// Document shown when a request names no file.
  pub default_file: String,

  /// Extension of documents, without the leading dot.
  pub document_extension: String,

  /// Title shown in the page header.
  pub title: String,

  /// Output directory for static export.
  pub output_dir: PathBuf,

  /// Number of threads to use for export.
  pub jobs: Option<usize>,

  /// Renderer settings.
  pub markdown: MarkdownConfig,

  /// Search API settings.
  pub search: SearchConfig,

  /// HTTP server settings.
  pub server: ServerConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      root_dir:           PathBuf::from("."),
      default_file:       "README.md".to_string(),
      document_extension: "md".to_string(),
      title:              "MarkView".to_string(),
      output_dir:         PathBuf::from("build"),
      jobs:               None,
      markdown:           MarkdownConfig::default(),
      search:             SearchConfig::default(),
      server:             ServerConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    Self::from_value(read_config_value(path)?).map_err(|e| {
      ConfigError::Config(format!(
        "Invalid configuration in {}: {}",
        path.display(),
        e
      ))
    })
  }

  fn from_value(value: Value) -> Result<Self, serde_json::Error> {
    serde_json::from_value(value)
  }

  /// Load configuration from config files and `KEY=VALUE` overrides.
  ///
  /// Explicit config files are merged in order, later files winning key by
  /// key. Without explicit files a config file in the working directory is
  /// used if there is one. Overrides are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or an override is
  /// invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if config_files.is_empty() {
      if let Some(discovered_config) = Self::find_config_file() {
        log::info!(
          "Using discovered config file: {}",
          discovered_config.display()
        );
        Self::from_file(&discovered_config).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load discovered config from {}: {}",
            discovered_config.display(),
            e
          ))
        })?
      } else {
        Self::default()
      }
    } else {
      let mut merged = Value::Object(serde_json::Map::new());
      for config_path in config_files {
        let value = read_config_value(config_path).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
          ))
        })?;
        merge_values(&mut merged, value);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      Self::from_value(merged).map_err(|e| {
        ConfigError::Config(format!("Invalid configuration: {e}"))
      })?
    };

    // Apply config overrides from --config KEY=VALUE flags
    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Nested keys use dots, as in `search.enable=false`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Set a single, possibly dotted, configuration key from its string form.
  ///
  /// The value is interpreted according to the current type of the field.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown, names a whole section, or the
  /// value does not fit the field.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let mut tree = serde_json::to_value(&*self)?;

    let slot = key
      .split('.')
      .try_fold(&mut tree, |node, part| node.get_mut(part))
      .ok_or_else(|| {
        ConfigError::Config(format!("Unknown configuration key: '{key}'"))
      })?;

    if slot.is_object() {
      return Err(ConfigError::Config(format!(
        "'{key}' is a section; set one of its keys instead"
      )));
    }

    *slot = parse_override_value(key, slot, value)?;

    *self = Self::from_value(tree).map_err(|e| {
      ConfigError::Config(format!("Invalid value for '{key}': {e}"))
    })?;
    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Search for a config file in the working directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let current_dir = std::env::current_dir().ok()?;
        Self::find_config_file_in(&current_dir)
      })
      .clone()
  }

  /// Search for a config file in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Check that the configuration can be used to serve documents.
  ///
  /// # Errors
  ///
  /// Returns an error listing every problem found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if !self.root_dir.exists() {
      errors.push(format!(
        "Root directory does not exist: {}",
        self.root_dir.display()
      ));
    } else if !self.root_dir.is_dir() {
      errors.push(format!(
        "Root path is not a directory: {}",
        self.root_dir.display()
      ));
    }

    let extension = &self.document_extension;
    if extension.is_empty()
      || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
      errors.push(format!(
        "Document extension must be alphanumeric and non-empty: '{extension}'"
      ));
    }

    let param = &self.markdown.navigation_param;
    if param.is_empty()
      || !param
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
      errors.push(format!("Invalid navigation parameter: '{param}'"));
    }

    if self.markdown.diagram_language.trim().is_empty() {
      errors.push("Diagram language must not be empty".to_string());
    }

    if self.search.min_query_length == 0 {
      errors.push("search.min_query_length must be at least 1".to_string());
    }

    if self.search.max_matches_per_file == 0 {
      errors.push("search.max_matches_per_file must be at least 1".to_string());
    }

    if !errors.is_empty() {
      return Err(ConfigError::Config(errors.join("\n")));
    }

    if !self
      .default_file
      .to_ascii_lowercase()
      .ends_with(&format!(".{}", extension.to_ascii_lowercase()))
    {
      log::warn!(
        "Default file '{}' does not have the document extension '.{}'",
        self.default_file,
        extension
      );
    }

    Ok(())
  }

  /// Renderer options derived from this configuration.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      document_extension: self.document_extension.clone(),
      navigation_param:   self.markdown.navigation_param.clone(),
      diagram_language:   self.markdown.diagram_language.clone(),
      navigation_style:   NavigationStyle::Query,
    }
  }

  /// Generate a default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

/// Read a config file into an untyped tree, choosing the parser by extension.
fn read_config_value(path: &Path) -> Result<Value, ConfigError> {
  let content = fs::read_to_string(path).map_err(|e| {
    ConfigError::Config(format!(
      "Failed to read config file: {}: {}",
      path.display(),
      e
    ))
  })?;

  let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
    return Err(ConfigError::Config(format!(
      "Config file has no extension: {}",
      path.display()
    )));
  };

  match ext.to_lowercase().as_str() {
    "json" => {
      serde_json::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse JSON config from {}: {}",
          path.display(),
          e
        ))
      })
    },
    "toml" => {
      toml::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse TOML config from {}: {}",
          path.display(),
          e
        ))
      })
    },
    _ => {
      Err(ConfigError::Config(format!(
        "Unsupported config file format: {}",
        path.display()
      )))
    },
  }
}

/// Merge `other` into `base`. Objects merge key by key; any other value in
/// `other` replaces the one in `base`.
fn merge_values(base: &mut Value, other: Value) {
  match (base, other) {
    (Value::Object(base), Value::Object(other)) => {
      for (key, value) in other {
        match base.get_mut(&key) {
          Some(existing) => merge_values(existing, value),
          None => {
            base.insert(key, value);
          },
        }
      }
    },
    (base, other) => *base = other,
  }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
  match raw.to_ascii_lowercase().as_str() {
    "true" | "yes" | "on" | "1" => Ok(true),
    "false" | "no" | "off" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{raw}'. Expected true/false, \
         yes/no, on/off or 1/0"
      )))
    },
  }
}

fn parse_number(raw: &str) -> Option<Value> {
  raw
    .parse::<u64>()
    .map(Value::from)
    .or_else(|_| raw.parse::<i64>().map(Value::from))
    .ok()
    .or_else(|| {
      raw
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
    })
}

/// Interpret `raw` according to the type of the value currently in the slot.
fn parse_override_value(
  key: &str,
  current: &Value,
  raw: &str,
) -> Result<Value, ConfigError> {
  match current {
    Value::Bool(_) => parse_bool(key, raw).map(Value::Bool),
    Value::Number(_) => {
      parse_number(raw).ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid value for '{key}': expected a number, got '{raw}'"
        ))
      })
    },
    // Unset optional field: empty clears it, anything else is taken as a
    // number if it looks like one
    Value::Null if raw.is_empty() => Ok(Value::Null),
    Value::Null => {
      Ok(parse_number(raw).unwrap_or_else(|| Value::String(raw.to_string())))
    },
    _ => Ok(Value::String(raw.to_string())),
  }
}
