//! Core implementation of the renderer.
//!
//! A render splits the document into segments, converts every text segment
//! through escaping, structure, paragraphs and inline formatting, and joins
//! the segments back together with the protected blocks in place.
use log::{debug, trace};

use super::types::{MarkdownOptions, MarkdownRenderer};
use crate::{
  blocks::{Segment, extract_blocks, restore_blocks},
  escape::Escaped,
  inline::format_inline,
  links::LinkRewriter,
  paragraph::{Block, wrap_paragraphs},
  structure::{Element, convert_structure},
  types::{Header, RenderResult},
  utils::{SlugRegistry, plain_text},
};

/// Per-render state. Lives for exactly one call to
/// [`MarkdownRenderer::render`].
struct RenderState {
  slugs:   SlugRegistry,
  headers: Vec<Header>,
}

impl MarkdownRenderer {
  /// Create a new `MarkdownRenderer` with the given options.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let links = LinkRewriter::new(
      &options.document_extension,
      &options.navigation_param,
      options.navigation_style,
    );
    Self { options, links }
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// The link rewriter built from the options.
  #[must_use]
  pub const fn links(&self) -> &LinkRewriter {
    &self.links
  }

  /// Render Markdown into an HTML fragment with its headings and title.
  ///
  /// Rendering never fails; input that does not form a recognised construct
  /// comes out as escaped literal text.
  #[must_use]
  pub fn render(&self, markdown: &str) -> RenderResult {
    let segments = extract_blocks(markdown, &self.options.diagram_language);
    debug!("Rendering document with {} segments", segments.len());

    let mut state = RenderState {
      slugs:   SlugRegistry::new(),
      headers: Vec::new(),
    };

    let converted: Vec<Segment<String>> = segments
      .into_iter()
      .map(|segment| {
        segment.map_text(|text| self.render_text(&text, &mut state))
      })
      .collect();

    let title = state
      .headers
      .iter()
      .find(|header| header.level == 1)
      .map(|header| header.text.clone());

    RenderResult {
      html: restore_blocks(converted),
      headers: state.headers,
      title,
    }
  }

  /// Apply inline formatting with this renderer's link settings.
  #[must_use]
  pub fn format_inline(&self, text: &str) -> String {
    format_inline(text, &self.links)
  }

  fn render_text(&self, text: &str, state: &mut RenderState) -> String {
    let escaped = Escaped::new(text);
    let blocks = wrap_paragraphs(convert_structure(&escaped));
    trace!("Converted text segment into {} blocks", blocks.len());

    let mut html = String::with_capacity(escaped.as_str().len());
    for block in &blocks {
      if let Block::Element(element @ Element::Heading { level, text }) = block {
        let inner = self.format_inline(text);
        let plain = plain_text(&inner);
        state.headers.push(Header {
          id:    state.slugs.unique(&plain),
          text:  plain,
          level: *level,
        });
        html.push_str(&element.to_html(|_| inner.clone()));
      } else {
        html.push_str(&block.to_html(|text| self.format_inline(text)));
      }
    }
    html
  }
}
