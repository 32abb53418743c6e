//! Inline formatting: code spans, images, links and emphasis.
//!
//! Input is always escaped text, which never contains a raw `<`. Code spans,
//! images and links are rendered first and parked behind `<@N>` placeholders,
//! so the emphasis rules that run afterwards cannot reach into them. Each
//! emphasis element is parked the same way once built. Author text can never
//! produce a placeholder because it has no `<` of its own.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::{links::LinkRewriter, utils::never_matching_regex};

static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"`(?P<code>[^`]+)`|(?P<image>!\[(?P<alt>[^\]]*)\]\((?P<src>[^)]+)\))|\[(?P<text>[^\]]+)\]\((?P<target>[^)]+)\)",
  )
  .unwrap_or_else(|e| {
    error!("Failed to compile SPAN_RE regex: {e}");
    never_matching_regex()
  })
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<@(\d+)>").unwrap_or_else(|e| {
    error!("Failed to compile PLACEHOLDER_RE regex: {e}");
    never_matching_regex()
  })
});

/// Emphasis rules in the order they are applied, with the tags each one
/// wraps its body in. Longer markers go first so `***x***` is not eaten by
/// the `*x*` rule.
static EMPHASIS_RULES: LazyLock<Vec<(Regex, &'static str, &'static str)>> =
  LazyLock::new(|| {
    [
      (r"(?s)\*\*\*(.+?)\*\*\*", "<strong><em>", "</em></strong>"),
      (r"(?s)\*\*(.+?)\*\*", "<strong>", "</strong>"),
      (r"(?s)\*(.+?)\*", "<em>", "</em>"),
      (r"(?s)___(.+?)___", "<strong><em>", "</em></strong>"),
      (r"(?s)__(.+?)__", "<strong>", "</strong>"),
      (r"(?s)_(.+?)_", "<em>", "</em>"),
    ]
    .into_iter()
    .map(|(pattern, open, close)| {
      let re = Regex::new(pattern).unwrap_or_else(|e| {
        error!("Failed to compile emphasis regex {pattern}: {e}");
        never_matching_regex()
      });
      (re, open, close)
    })
    .collect()
  });

/// Store finished HTML and return the placeholder standing in for it.
fn park(spans: &mut Vec<String>, html: String) -> String {
  spans.push(html);
  format!("<@{}>", spans.len() - 1)
}

/// Apply the emphasis rules from `first` on.
///
/// Every replacement is parked, so a later rule cannot pair a marker inside
/// one element with a marker outside it. The body of a match only sees the
/// rules after the one that matched; the earlier ones already ran over it.
fn emphasize(text: &str, first: usize, spans: &mut Vec<String>) -> String {
  let mut html = text.to_string();
  let rules = EMPHASIS_RULES.iter().enumerate().skip(first);
  for (index, (re, open, close)) in rules {
    if !re.is_match(&html) {
      continue;
    }
    html = re
      .replace_all(&html, |caps: &Captures| {
        let body = emphasize(&caps[1], index + 1, spans);
        park(spans, format!("{open}{body}{close}"))
      })
      .into_owned();
  }
  html
}

/// Replace placeholders with their HTML. A parked span only refers to spans
/// parked before it, so the recursion ends.
fn restore(html: &str, spans: &[String]) -> String {
  PLACEHOLDER_RE
    .replace_all(html, |caps: &Captures| {
      caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|index| spans.get(index))
        .map_or_else(|| caps[0].to_string(), |span| restore(span, spans))
    })
    .into_owned()
}

/// Apply inline formatting to one piece of escaped text.
///
/// Unmatched markers are left as literal text.
#[must_use]
pub fn format_inline(text: &str, links: &LinkRewriter) -> String {
  let mut spans: Vec<String> = Vec::new();

  let parked = SPAN_RE.replace_all(text, |caps: &Captures| {
    let html = if let Some(code) = caps.name("code") {
      format!("<code>{}</code>", code.as_str())
    } else if caps.name("image").is_some() {
      format!(
        "<img src=\"{}\" alt=\"{}\" />",
        &caps["src"],
        caps.name("alt").map_or("", |m| m.as_str())
      )
    } else {
      let label = format_inline(&caps["text"], links);
      links.render(&label, &caps["target"])
    };
    park(&mut spans, html)
  });

  let html = emphasize(&parked, 0, &mut spans);
  if spans.is_empty() {
    return html;
  }
  restore(&html, &spans)
}
