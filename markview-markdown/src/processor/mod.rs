//! The rendering pipeline.
//!
//! - [`core`]: the [`MarkdownRenderer`] pipeline itself
//! - [`process`]: convenience entry points with panic recovery
//! - [`types`]: options, the options builder and the renderer type
pub mod core;
pub mod process;
pub mod types;

pub use process::{
  render_markdown_file,
  render_markdown_string,
  render_with_recovery,
};
pub use types::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownRenderer};
