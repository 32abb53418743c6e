use std::path::PathBuf;

use clap::{Parser, Subcommand};
use markview_config::Config;

/// Command line interface for markview
#[derive(Parser, Debug)]
#[command(author, version, about = "MarkView: browse Markdown documents")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Directory containing the documents.
  #[arg(short, long, global = true)]
  pub root: Option<PathBuf>,
}

/// All supported subcommands for the markview CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new MarkView configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "markview.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render one document to standard output.
  Render {
    /// Path of the document, relative to the root.
    file: String,

    /// Print the fragment, headers and title as JSON.
    #[arg(long)]
    json: bool,
  },

  /// List every document below the root.
  List,

  /// Search every document below the root.
  Search {
    /// Text to look for, ignoring case.
    query: String,

    /// Print the raw JSON response.
    #[arg(long)]
    json: bool,
  },

  /// Render every document into a directory of static pages.
  Export {
    /// Output directory for the generated pages.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Serve the documents over HTTP.
  #[cfg(feature = "serve")]
  Serve {
    /// Address to bind to.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Apply flags that override configuration values.
  pub fn merge_into(&self, config: &mut Config) {
    if let Some(root) = &self.root {
      config.root_dir.clone_from(root);
    }

    match &self.command {
      Commands::Export { output_dir, jobs } => {
        if let Some(output_dir) = output_dir {
          config.output_dir.clone_from(output_dir);
        }
        if jobs.is_some() {
          config.jobs = *jobs;
        }
      },
      #[cfg(feature = "serve")]
      Commands::Serve { host, port } => {
        if let Some(host) = host {
          config.server.host.clone_from(host);
        }
        if let Some(port) = port {
          config.server.port = *port;
        }
      },
      _ => {},
    }
  }
}
