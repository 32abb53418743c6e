pub mod config;
pub mod error;
pub mod markdown;
pub mod search;
pub mod server;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
