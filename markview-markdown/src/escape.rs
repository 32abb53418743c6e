//! HTML escaping for document text outside protected blocks.
use std::fmt;

/// Text that has been HTML-escaped exactly once.
///
/// The only way to build one is [`Escaped::new`], so every later stage that
/// takes `&Escaped` is guaranteed to see no raw author markup. Escaped text
/// never contains a raw `<`; any `<` in a string derived from it was
/// produced by the renderer itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Escaped(String);

impl Escaped {
  /// Escape `raw` for inclusion in HTML text or a quoted attribute.
  #[must_use]
  pub fn new(raw: &str) -> Self {
    Self(escape_html(raw))
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Lines of the escaped text. `\r\n` endings are handled like `\n`.
  pub fn lines(&self) -> std::str::Lines<'_> {
    self.0.lines()
  }
}

impl fmt::Display for Escaped {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Escape `&`, `<`, `>`, `"` and `'`.
#[must_use]
pub fn escape_html(raw: &str) -> String {
  html_escape::encode_quoted_attribute(raw).into_owned()
}
