use serde::{Deserialize, Serialize};

/// Configuration for `markview serve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Address to bind to
  pub host: String,

  /// Port to listen on
  pub port: u16,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: "127.0.0.1".to_string(),
      port: 8080,
    }
  }
}

impl ServerConfig {
  /// `host:port`, suitable for binding a listener.
  #[must_use]
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}
