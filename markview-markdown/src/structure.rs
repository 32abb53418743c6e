//! Line-oriented detection of block-level structure.
//!
//! Works on escaped text and borrows from it. Each line is classified as a
//! structural [`Element`], a plain text line, or a blank line; the paragraph
//! stage decides what to do with the plain lines.
use std::fmt::Write;

use crate::escape::Escaped;

/// Column alignment taken from a table separator cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
  #[default]
  Left,
  Center,
  Right,
}

impl Alignment {
  /// `:-+:` is center, `-+:` is right, everything else is left.
  #[must_use]
  pub fn from_marker(cell: &str) -> Self {
    let cell = cell.trim();
    let dashes = |s: &str| !s.is_empty() && s.chars().all(|c| c == '-');

    if let Some(inner) = cell.strip_prefix(':').and_then(|c| c.strip_suffix(':'))
      && dashes(inner)
    {
      Self::Center
    } else if let Some(inner) = cell.strip_suffix(':')
      && dashes(inner)
    {
      Self::Right
    } else {
      Self::Left
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Left => "left",
      Self::Center => "center",
      Self::Right => "right",
    }
  }
}

/// A table found in the document.
///
/// Rows are kept exactly as written: no padding, no truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel<'a> {
  pub headers:    Vec<&'a str>,
  pub alignments: Vec<Alignment>,
  pub rows:       Vec<Vec<&'a str>>,
}

impl TableModel<'_> {
  /// Alignment of a column; columns without a separator cell are left
  /// aligned.
  #[must_use]
  pub fn alignment(&self, column: usize) -> Alignment {
    self.alignments.get(column).copied().unwrap_or_default()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  Unordered,
  Ordered,
}

impl ListKind {
  const fn tag(self) -> &'static str {
    match self {
      Self::Unordered => "ul",
      Self::Ordered => "ol",
    }
  }
}

/// A block-level element. None of these is ever wrapped in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<'a> {
  Heading { level: u8, text: &'a str },
  Rule,
  Blockquote(&'a str),
  List { kind: ListKind, items: Vec<&'a str> },
  Table(TableModel<'a>),
}

impl Element<'_> {
  /// Render the element, passing every piece of text content through
  /// `inline`.
  pub fn to_html<F>(&self, mut inline: F) -> String
  where
    F: FnMut(&str) -> String,
  {
    match self {
      Self::Heading { level, text } => {
        format!("<h{level}>{}</h{level}>", inline(text))
      },
      Self::Rule => "<hr>".to_string(),
      Self::Blockquote(text) => {
        format!("<blockquote>{}</blockquote>", inline(text))
      },
      Self::List { kind, items } => {
        let tag = kind.tag();
        let mut html = format!("<{tag}>");
        for item in items {
          let _ = write!(html, "<li>{}</li>", inline(item));
        }
        let _ = write!(html, "</{tag}>");
        html
      },
      Self::Table(table) => render_table(table, inline),
    }
  }
}

fn render_table<F>(table: &TableModel<'_>, mut inline: F) -> String
where
  F: FnMut(&str) -> String,
{
  let mut html = String::from("<table><thead><tr>");
  for (i, header) in table.headers.iter().enumerate() {
    let _ = write!(
      html,
      "<th style=\"text-align:{}\">{}</th>",
      table.alignment(i).as_str(),
      inline(header)
    );
  }
  html.push_str("</tr></thead><tbody>");

  for row in &table.rows {
    html.push_str("<tr>");
    for (i, cell) in row.iter().enumerate() {
      let _ = write!(
        html,
        "<td style=\"text-align:{}\">{}</td>",
        table.alignment(i).as_str(),
        inline(cell)
      );
    }
    html.push_str("</tr>");
  }

  html.push_str("</tbody></table>");
  html
}

/// Classification of one or more source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item<'a> {
  Element(Element<'a>),
  /// A line with no structural meaning, trimmed.
  Text(&'a str),
  Blank,
}

/// Classify the lines of `text` into structural items.
///
/// Per line, the first match wins: table, heading, horizontal rule,
/// blockquote, list item, blank, plain text. Tables and lists consume as many
/// lines as belong to them.
#[must_use]
pub fn convert_structure(text: &Escaped) -> Vec<Item<'_>> {
  let lines: Vec<&str> = text.lines().collect();
  let mut items = Vec::new();
  let mut i = 0;

  while i < lines.len() {
    let rest = &lines[i..];
    let line = rest[0];

    if let Some((table, consumed)) = parse_table(rest) {
      items.push(Item::Element(Element::Table(table)));
      i += consumed;
      continue;
    }

    if let Some((kind, _)) = parse_list_item(line) {
      let list: Vec<&str> = rest
        .iter()
        .map_while(|line| {
          parse_list_item(line)
            .filter(|(k, _)| *k == kind)
            .map(|(_, item)| item)
        })
        .collect();
      i += list.len();
      items.push(Item::Element(Element::List { kind, items: list }));
      continue;
    }

    let item = if let Some((level, text)) = parse_heading(line) {
      Item::Element(Element::Heading { level, text })
    } else if is_rule(line) {
      Item::Element(Element::Rule)
    } else if let Some(quote) = parse_blockquote(line) {
      Item::Element(Element::Blockquote(quote))
    } else if line.trim().is_empty() {
      Item::Blank
    } else {
      Item::Text(line.trim())
    };
    items.push(item);
    i += 1;
  }

  items
}

/// `#` to `######`, whitespace, then non-blank text.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
  let level = line.bytes().take_while(|&b| b == b'#').count();
  if !(1..=6).contains(&level) {
    return None;
  }

  let rest = &line[level..];
  if !rest.starts_with(char::is_whitespace) {
    return None;
  }

  let text = rest.trim();
  if text.is_empty() {
    return None;
  }
  u8::try_from(level).ok().map(|level| (level, text))
}

/// Three or more of the same `*`, `-` or `_` and nothing else.
fn is_rule(line: &str) -> bool {
  let line = line.trim_end();
  let mut chars = line.chars();
  match chars.next() {
    Some(marker @ ('*' | '-' | '_')) => {
      line.len() >= 3 && chars.all(|c| c == marker)
    },
    _ => false,
  }
}

/// `>` (already escaped to `&gt;`), whitespace, then text.
fn parse_blockquote(line: &str) -> Option<&str> {
  let rest = line.strip_prefix("&gt;")?;
  if !rest.starts_with(char::is_whitespace) {
    return None;
  }
  let text = rest.trim();
  (!text.is_empty()).then_some(text)
}

/// `*`, `-` or `+` for unordered items, digits and `.` for ordered ones,
/// followed by whitespace and text.
fn parse_list_item(line: &str) -> Option<(ListKind, &str)> {
  let (kind, rest) = if let Some(rest) = line.strip_prefix(['*', '-', '+']) {
    (ListKind::Unordered, rest)
  } else {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
      return None;
    }
    (ListKind::Ordered, line[digits..].strip_prefix('.')?)
  };

  if !rest.starts_with(char::is_whitespace) {
    return None;
  }
  let text = rest.trim();
  (!text.is_empty()).then_some((kind, text))
}

fn is_table_row(line: &str) -> bool {
  let line = line.trim();
  line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

fn split_cells(line: &str) -> Vec<&str> {
  line.trim().trim_matches('|').split('|').map(str::trim).collect()
}

fn is_separator_row(line: &str) -> bool {
  is_table_row(line)
    && split_cells(line).iter().all(|cell| {
      cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
    })
}

/// Header row, separator row, then at least one body row.
fn parse_table<'a>(lines: &[&'a str]) -> Option<(TableModel<'a>, usize)> {
  let [header, separator, ..] = lines else {
    return None;
  };
  if !is_table_row(header) || !is_separator_row(separator) {
    return None;
  }

  let rows: Vec<Vec<&str>> = lines[2..]
    .iter()
    .take_while(|line| is_table_row(line))
    .map(|line| split_cells(line))
    .collect();
  if rows.is_empty() {
    return None;
  }

  let consumed = rows.len() + 2;
  Some((
    TableModel {
      headers: split_cells(header),
      alignments: split_cells(separator)
        .into_iter()
        .map(Alignment::from_marker)
        .collect(),
      rows,
    },
    consumed,
  ))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::panic, reason = "Fine in tests")]
  use super::*;

  fn items(text: &str) -> Vec<Item<'static>> {
    let escaped: &'static Escaped = Box::leak(Box::new(Escaped::new(text)));
    convert_structure(escaped)
  }

  fn identity(text: &str) -> String {
    text.to_string()
  }

  #[test]
  fn test_alignment_markers() {
    assert_eq!(Alignment::from_marker(":---:"), Alignment::Center);
    assert_eq!(Alignment::from_marker("---:"), Alignment::Right);
    assert_eq!(Alignment::from_marker(":---"), Alignment::Left);
    assert_eq!(Alignment::from_marker("---"), Alignment::Left);
    assert_eq!(Alignment::from_marker(" :-: "), Alignment::Center);
    assert_eq!(Alignment::from_marker("::"), Alignment::Left);
  }

  #[test]
  fn test_headings_use_longest_marker() {
    assert_eq!(items("### Three"), vec![Item::Element(Element::Heading {
      level: 3,
      text:  "Three",
    })]);
    assert_eq!(items("###### Six"), vec![Item::Element(Element::Heading {
      level: 6,
      text:  "Six",
    })]);
    assert_eq!(items("####### Seven"), vec![Item::Text("####### Seven")]);
    assert_eq!(items("#hashtag"), vec![Item::Text("#hashtag")]);
    assert_eq!(items("#   "), vec![Item::Text("#")]);
  }

  #[test]
  fn test_rules() {
    for rule in ["***", "---", "___", "-----", "*****"] {
      assert_eq!(items(rule), vec![Item::Element(Element::Rule)], "{rule}");
    }
    assert_eq!(items("-*-"), vec![Item::Text("-*-")]);
    assert_eq!(items("--"), vec![Item::Text("--")]);
  }

  #[test]
  fn test_blockquotes_are_per_line() {
    assert_eq!(items("> one\n> two"), vec![
      Item::Element(Element::Blockquote("one")),
      Item::Element(Element::Blockquote("two")),
    ]);
    assert_eq!(items(">no space"), vec![Item::Text("&gt;no space")]);
  }

  #[test]
  fn test_list_runs_do_not_merge_families() {
    assert_eq!(items("- a\n* b\n1. c\n2. d"), vec![
      Item::Element(Element::List {
        kind:  ListKind::Unordered,
        items: vec!["a", "b"],
      }),
      Item::Element(Element::List {
        kind:  ListKind::Ordered,
        items: vec!["c", "d"],
      }),
    ]);
  }

  #[test]
  fn test_list_needs_whitespace_after_marker() {
    assert_eq!(items("**bold** start"), vec![Item::Text("**bold** start")]);
    assert_eq!(items("1.5 apples"), vec![Item::Text("1.5 apples")]);
  }

  #[test]
  fn test_table_model() {
    let parsed = items("| A | B |\n|---|:---:|\n| 1 | 2 |\n| 3 |");
    let [Item::Element(Element::Table(table))] = parsed.as_slice() else {
      panic!("expected a single table, got {parsed:?}");
    };
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Center]);
    assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3"]]);
    assert_eq!(table.alignment(5), Alignment::Left);
  }

  #[test]
  fn test_table_requires_separator_and_body() {
    assert_eq!(items("| A | B |\n| 1 | 2 |"), vec![
      Item::Text("| A | B |"),
      Item::Text("| 1 | 2 |"),
    ]);
    assert_eq!(items("| A |\n|---|"), vec![
      Item::Text("| A |"),
      Item::Text("|---|"),
    ]);
  }

  #[test]
  fn test_render_table_html() {
    let table = TableModel {
      headers:    vec!["A", "B"],
      alignments: vec![Alignment::Right],
      rows:       vec![vec!["1", "2", "3"]],
    };
    assert_eq!(
      Element::Table(table).to_html(identity),
      "<table><thead><tr><th style=\"text-align:right\">A</th><th \
       style=\"text-align:left\">B</th></tr></thead><tbody><tr><td \
       style=\"text-align:right\">1</td><td \
       style=\"text-align:left\">2</td><td \
       style=\"text-align:left\">3</td></tr></tbody></table>"
    );
  }

  #[test]
  fn test_render_list_html() {
    let list = Element::List {
      kind:  ListKind::Ordered,
      items: vec!["x", "y"],
    };
    assert_eq!(list.to_html(identity), "<ol><li>x</li><li>y</li></ol>");
  }

  #[test]
  fn test_blank_and_text_lines() {
    assert_eq!(items("  indented  \n\n   \nnext"), vec![
      Item::Text("indented"),
      Item::Blank,
      Item::Blank,
      Item::Text("next"),
    ]);
  }
}
