use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

/// Slugify a string for use as an anchor ID.
///
/// Lowercases the text, turns every run of characters that are neither
/// alphanumeric nor `_` into a single dash, and drops dashes at both ends.
#[must_use]
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_dash = false;

  for c in text.chars().flat_map(char::to_lowercase) {
    if c.is_alphanumeric() || c == '_' {
      if pending_dash && !slug.is_empty() {
        slug.push('-');
      }
      pending_dash = false;
      slug.push(c);
    } else {
      pending_dash = true;
    }
  }

  slug
}

/// Hands out anchor IDs that are unique within one document.
///
/// The first occurrence of a slug is returned unchanged; repeats get `-1`,
/// `-2`, ... appended. Empty slugs fall back to `section`.
#[derive(Debug, Default)]
pub struct SlugRegistry {
  seen: HashMap<String, usize>,
}

impl SlugRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Return a unique anchor ID for `text`.
  pub fn unique(&mut self, text: &str) -> String {
    let mut base = slugify(text);
    if base.is_empty() {
      base = "section".to_string();
    }

    let count = self.seen.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
      base
    } else {
      format!("{base}-{count}")
    };
    *count += 1;
    id
  }
}

/// Reduce an inline HTML fragment to its plain text.
///
/// Tags are dropped and entities decoded, so `<em>A &amp; B</em>` becomes
/// `A & B`.
#[must_use]
pub fn plain_text(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile TAG_RE regex: {e}");
      never_matching_regex()
    })
  });

  let stripped = TAG_RE.replace_all(html, "");
  html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when a pattern fails to compile, so a broken pattern
/// turns a pass into a no-op instead of aborting the render.
#[must_use]
#[allow(
  clippy::expect_used,
  reason = "Both patterns are guaranteed to be valid"
)]
pub fn never_matching_regex() -> Regex {
  // The pattern asserts a character that is neither whitespace nor
  // non-whitespace, and is guaranteed to be valid.
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    Regex::new(r"^\b$").expect("regex pattern ^\\b$ should always compile")
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify() {
    assert_eq!(slugify("Hello World"), "hello-world");
    assert_eq!(slugify("A & B"), "a-b");
    assert_eq!(slugify("  --Trim me--  "), "trim-me");
    assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    assert_eq!(slugify("Ünïcode Heading"), "ünïcode-heading");
  }

  #[test]
  fn test_slug_registry_deduplicates() {
    let mut slugs = SlugRegistry::new();
    assert_eq!(slugs.unique("Intro"), "intro");
    assert_eq!(slugs.unique("Intro"), "intro-1");
    assert_eq!(slugs.unique("intro"), "intro-2");
    assert_eq!(slugs.unique("!!!"), "section");
    assert_eq!(slugs.unique("???"), "section-1");
  }

  #[test]
  fn test_plain_text() {
    assert_eq!(
      plain_text("<strong>Bold</strong> &amp; <code>code</code>"),
      "Bold & code"
    );
    assert_eq!(plain_text("plain"), "plain");
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything at all"));
  }
}
