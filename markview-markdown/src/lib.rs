//! # markview-markdown
//!
//! A small, line-oriented Markdown renderer for the `MarkView` document viewer.
//! It turns one Markdown document into an HTML fragment that can be inserted
//! into a page as-is.
//!
//! ## Quick Start
//!
//! ```rust
//! use markview_markdown::{MarkdownOptions, MarkdownRenderer};
//!
//! let renderer = MarkdownRenderer::new(MarkdownOptions::default());
//! let result = renderer.render("# Hello World\n\nThis is **bold** text.");
//!
//! assert!(result.html.starts_with("<h1>Hello World</h1>"));
//! assert_eq!(result.title.as_deref(), Some("Hello World"));
//! ```
//!
//! ## Pipeline
//!
//! Every render runs the same stages in order:
//!
//! 1. [`blocks`]: fenced code and diagram blocks are split out of the document
//!    into [`ProtectedBlock`]s before anything else looks at the text.
//! 2. [`escape`]: the remaining text is HTML-escaped exactly once.
//! 3. [`structure`]: tables, headings, rules, blockquotes and lists.
//! 4. [`inline`] and [`links`]: emphasis, code spans, images and links.
//! 5. [`paragraph`]: loose lines are grouped into paragraphs.
//! 6. [`blocks::restore_blocks`]: protected blocks are spliced back in.
//!
//! The renderer never fails. Malformed input degrades to literal text.
//!
//! ## Configuration
//!
//! ```rust
//! use markview_markdown::{MarkdownOptionsBuilder, MarkdownRenderer};
//!
//! let options = MarkdownOptionsBuilder::new()
//!   .document_extension("markdown")
//!   .navigation_param("doc")
//!   .build();
//!
//! let renderer = MarkdownRenderer::new(options);
//! let html = renderer.render("[Guide](guide.markdown)").html;
//! assert!(html.contains(r#"href="?doc=guide.markdown""#));
//! ```

pub mod blocks;
pub mod escape;
pub mod inline;
pub mod links;
pub mod paragraph;
pub mod processor;
pub mod structure;
mod types;
pub mod utils;

pub use crate::{
  blocks::{BlockKind, ProtectedBlock, Segment},
  links::{LinkKind, LinkRewriter, NavigationStyle},
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownRenderer,
    render_markdown_file,
    render_markdown_string,
    render_with_recovery,
  },
  types::{Header, RenderResult},
};
