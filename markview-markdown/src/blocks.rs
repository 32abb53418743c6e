//! Extraction and restoration of fenced code and diagram blocks.
//!
//! Fenced blocks are pulled out of the document before escaping and kept as
//! [`Segment::Protected`] values. Later text passes only ever see
//! [`Segment::Text`], so nothing they do can reach the inside of a fence.
use log::{debug, trace};

use crate::escape::escape_html;

/// Characters allowed in a code block language tag.
fn is_language_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '#' | '.')
}

/// What a protected block renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
  /// Fenced code, escaped and wrapped in `<pre><code>`.
  Code,
  /// Fenced diagram source, emitted verbatim for a client-side renderer.
  Diagram,
}

/// A fenced block lifted out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBlock {
  /// Position of the block among the protected blocks of one render,
  /// starting at 0.
  pub id:       usize,
  /// Whether the block is code or a diagram.
  pub kind:     BlockKind,
  /// Language tag of a code block, if one was given and is well formed.
  pub language: Option<String>,
  /// Finished HTML for the block.
  pub html:     String,
}

impl ProtectedBlock {
  /// Build a code block. The body is escaped here.
  #[must_use]
  pub fn code(id: usize, language: Option<&str>, body: &str) -> Self {
    let language = language
      .filter(|lang| !lang.is_empty() && lang.chars().all(is_language_char))
      .map(str::to_string);

    let html = match &language {
      Some(lang) => {
        format!(
          "<pre><code class=\"language-{lang}\">{}</code></pre>",
          escape_html(body)
        )
      },
      None => format!("<pre><code>{}</code></pre>", escape_html(body)),
    };

    Self {
      id,
      kind: BlockKind::Code,
      language,
      html,
    }
  }

  /// Build a diagram block. The body is trimmed and kept verbatim, since the
  /// diagram renderer consumes the raw source as text content.
  #[must_use]
  pub fn diagram(id: usize, diagram_language: &str, body: &str) -> Self {
    Self {
      id,
      kind: BlockKind::Diagram,
      language: None,
      html: format!(
        "<div class=\"{}\">{}</div>",
        escape_html(diagram_language),
        body.trim()
      ),
    }
  }
}

/// One piece of a document: text still to be converted, or a finished block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<T = String> {
  Text(T),
  Protected(ProtectedBlock),
}

impl<T> Segment<T> {
  /// Convert the text of this segment, leaving protected blocks untouched.
  pub fn map_text<U, F>(self, f: F) -> Segment<U>
  where
    F: FnOnce(T) -> U,
  {
    match self {
      Self::Text(text) => Segment::Text(f(text)),
      Self::Protected(block) => Segment::Protected(block),
    }
  }
}

/// Returns the info string of an opening fence line.
fn opening_fence(line: &str) -> Option<&str> {
  let info = line.trim_start().strip_prefix("```")?;
  // Backticks in the info string mean this is inline code, not a fence
  if info.contains('`') {
    return None;
  }
  Some(info.trim())
}

fn is_closing_fence(line: &str) -> bool {
  let line = line.trim();
  line.len() >= 3 && line.chars().all(|c| c == '`')
}

/// Split a document into text and protected segments.
///
/// A fence opens on a line starting with three backticks and closes on the
/// next line made only of backticks (three or more). When the first word of
/// the info string equals `diagram_language` the block is a diagram,
/// otherwise it is code tagged with that word. An unterminated fence runs to
/// the end of the document.
#[must_use]
pub fn extract_blocks(document: &str, diagram_language: &str) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut text = String::new();
  let mut next_id = 0;
  let mut lines = document.lines().enumerate();

  while let Some((index, line)) = lines.next() {
    let Some(info) = opening_fence(line) else {
      text.push_str(line);
      text.push('\n');
      continue;
    };

    let mut body = Vec::new();
    let mut closed = false;
    for (_, inner) in lines.by_ref() {
      if is_closing_fence(inner) {
        closed = true;
        break;
      }
      body.push(inner);
    }
    if !closed {
      debug!(
        "Fence opened on line {} is never closed, treating the rest of the \
         document as its body",
        index + 1
      );
    }

    if !text.is_empty() {
      segments.push(Segment::Text(std::mem::take(&mut text)));
    }

    let body = body.join("\n");
    let language = info.split_whitespace().next();
    let block = if language == Some(diagram_language) {
      ProtectedBlock::diagram(next_id, diagram_language, &body)
    } else {
      ProtectedBlock::code(next_id, language, &body)
    };
    trace!("Extracted {:?} block #{}", block.kind, block.id);
    segments.push(Segment::Protected(block));
    next_id += 1;
  }

  if !text.is_empty() {
    segments.push(Segment::Text(text));
  }

  segments
}

/// Flatten converted segments into the final fragment.
///
/// Text segments must already hold HTML. Protected blocks contribute their
/// stored HTML; everything is concatenated in document order.
#[must_use]
pub fn restore_blocks(segments: Vec<Segment<String>>) -> String {
  let capacity = segments
    .iter()
    .map(|segment| {
      match segment {
        Segment::Text(html) => html.len(),
        Segment::Protected(block) => block.html.len(),
      }
    })
    .sum();

  segments
    .into_iter()
    .fold(String::with_capacity(capacity), |mut out, segment| {
      match segment {
        Segment::Text(html) => out.push_str(&html),
        Segment::Protected(block) => out.push_str(&block.html),
      }
      out
    })
}
