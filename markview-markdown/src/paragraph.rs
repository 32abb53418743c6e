//! Grouping of loose lines into paragraphs.
use crate::structure::{Element, Item};

/// A top-level block of one text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
  Element(Element<'a>),
  /// Consecutive plain lines; never empty.
  Paragraph(Vec<&'a str>),
}

/// Group consecutive [`Item::Text`] lines into paragraphs.
///
/// Blank lines and elements end the current paragraph. Elements pass through
/// unchanged, so they are never wrapped.
#[must_use]
pub fn wrap_paragraphs(items: Vec<Item<'_>>) -> Vec<Block<'_>> {
  let mut blocks = Vec::new();
  let mut lines = Vec::new();

  for item in items {
    match item {
      Item::Text(line) => lines.push(line),
      Item::Blank => flush(&mut lines, &mut blocks),
      Item::Element(element) => {
        flush(&mut lines, &mut blocks);
        blocks.push(Block::Element(element));
      },
    }
  }
  flush(&mut lines, &mut blocks);

  blocks
}

fn flush<'a>(lines: &mut Vec<&'a str>, blocks: &mut Vec<Block<'a>>) {
  if !lines.is_empty() {
    blocks.push(Block::Paragraph(std::mem::take(lines)));
  }
}

impl Block<'_> {
  /// Render the block, passing text content through `inline`.
  pub fn to_html<F>(&self, mut inline: F) -> String
  where
    F: FnMut(&str) -> String,
  {
    match self {
      Self::Element(element) => element.to_html(inline),
      Self::Paragraph(lines) => format!("<p>{}</p>", inline(&lines.join("\n"))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lines_are_grouped_until_blank() {
    let blocks = wrap_paragraphs(vec![
      Item::Text("one"),
      Item::Text("two"),
      Item::Blank,
      Item::Blank,
      Item::Text("three"),
    ]);
    assert_eq!(blocks, vec![
      Block::Paragraph(vec!["one", "two"]),
      Block::Paragraph(vec!["three"]),
    ]);
  }

  #[test]
  fn test_elements_break_paragraphs() {
    let blocks = wrap_paragraphs(vec![
      Item::Text("before"),
      Item::Element(Element::Rule),
      Item::Text("after"),
    ]);
    assert_eq!(blocks, vec![
      Block::Paragraph(vec!["before"]),
      Block::Element(Element::Rule),
      Block::Paragraph(vec!["after"]),
    ]);
  }

  #[test]
  fn test_no_empty_paragraphs() {
    let blocks = wrap_paragraphs(vec![Item::Blank, Item::Blank]);
    assert!(blocks.is_empty());
  }

  #[test]
  fn test_paragraph_html_joins_lines() {
    let block = Block::Paragraph(vec!["a", "b"]);
    assert_eq!(block.to_html(str::to_string), "<p>a\nb</p>");
  }
}
