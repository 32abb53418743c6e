use std::{fs, path::Path};

use log::{debug, trace};
use markview_config::search::SearchConfig;
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::SearchError;

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
  /// Line number, starting at 1.
  pub line:    usize,
  /// The line with surrounding whitespace removed.
  pub text:    String,
  /// The escaped line with every occurrence of the query in `<mark>`.
  pub preview: String,
}

/// Matches found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMatches {
  pub file:        String,
  pub file_name:   String,
  pub match_count: usize,
  pub matches:     Vec<SearchMatch>,
}

/// Escape `line` and wrap every match of `pattern` in `<mark>`.
fn highlight(line: &str, pattern: &Regex) -> String {
  let mut preview = String::with_capacity(line.len() + 16);
  let mut last = 0;
  for found in pattern.find_iter(line) {
    preview.push_str(&html_escape::encode_quoted_attribute(
      &line[last..found.start()],
    ));
    preview.push_str("<mark>");
    preview.push_str(&html_escape::encode_quoted_attribute(found.as_str()));
    preview.push_str("</mark>");
    last = found.end();
  }
  preview.push_str(&html_escape::encode_quoted_attribute(&line[last..]));
  preview
}

fn search_file(
  root: &Path,
  file: &str,
  pattern: &Regex,
  max_matches: usize,
) -> Option<FileMatches> {
  let path = root
    .join(file)
    .canonicalize()
    .map_err(|e| debug!("Skipping {file} in search: {e}"))
    .ok()?;
  if !path.starts_with(root) {
    debug!("Skipping {file} in search: resolves outside the root");
    return None;
  }

  let content = fs::read_to_string(&path)
    .map_err(|e| debug!("Skipping {file} in search: {e}"))
    .ok()?;

  if !pattern.is_match(&content) {
    return None;
  }

  let matches: Vec<SearchMatch> = content
    .split('\n')
    .enumerate()
    .map(|(index, line)| (index, line.trim_end_matches('\r')))
    .filter(|(_, line)| pattern.is_match(line))
    .take(max_matches)
    .map(|(index, line)| {
      SearchMatch {
        line:    index + 1,
        text:    line.trim().to_string(),
        preview: highlight(line, pattern),
      }
    })
    .collect();

  if matches.is_empty() {
    return None;
  }

  let file_name = file.rsplit('/').next().unwrap_or(file).to_string();
  Some(FileMatches {
    file: file.to_string(),
    file_name,
    match_count: matches.len(),
    matches,
  })
}

/// Search `files` (relative to `root`) for `query`, ignoring case.
///
/// The query is trimmed first. Files are searched in parallel; results come
/// back ordered by match count, most first, with ties kept in the order of
/// `files`. Files that cannot be read, or that resolve outside `root`
/// through a symlink, are skipped.
///
/// # Errors
///
/// Returns an error if search is disabled, the query is too short, or the
/// query is too large to compile.
pub fn search_documents(
  root: &Path,
  files: &[String],
  query: &str,
  config: &SearchConfig,
) -> Result<Vec<FileMatches>, SearchError> {
  if !config.enable {
    return Err(SearchError::Disabled);
  }

  let query = query.trim();
  if query.chars().count() < config.min_query_length {
    return Err(SearchError::QueryTooShort {
      min: config.min_query_length,
    });
  }

  let pattern = RegexBuilder::new(&regex::escape(query))
    .case_insensitive(true)
    .build()?;

  let Ok(root) = root.canonicalize() else {
    debug!("Cannot search {}: root does not resolve", root.display());
    return Ok(Vec::new());
  };

  let mut results: Vec<FileMatches> = files
    .par_iter()
    .filter_map(|file| {
      search_file(&root, file, &pattern, config.max_matches_per_file)
    })
    .collect();

  // Stable, so equal counts keep discovery order
  results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
  trace!("Search for {query:?} matched {} files", results.len());
  Ok(results)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  fn pattern(query: &str) -> Regex {
    RegexBuilder::new(&regex::escape(query))
      .case_insensitive(true)
      .build()
      .unwrap()
  }

  #[test]
  fn test_highlight_escapes_and_marks() {
    assert_eq!(
      highlight("Use <b>Rust</b> & rust", &pattern("rust")),
      "Use &lt;b&gt;<mark>Rust</mark>&lt;/b&gt; &amp; <mark>rust</mark>"
    );
  }

  #[test]
  fn test_highlight_query_with_special_characters() {
    assert_eq!(
      highlight("a <tag> b", &pattern("<tag>")),
      "a <mark>&lt;tag&gt;</mark> b"
    );
    assert_eq!(highlight("1+1=2", &pattern("1+1")), "<mark>1+1</mark>=2");
  }

  #[test]
  fn test_query_too_short() {
    let config = SearchConfig::default();
    let result = search_documents(Path::new("."), &[], " a ", &config);
    assert!(matches!(result, Err(SearchError::QueryTooShort { min: 2 })));
  }

  #[test]
  fn test_disabled_search() {
    let config = SearchConfig {
      enable: false,
      ..Default::default()
    };
    let result = search_documents(Path::new("."), &[], "query", &config);
    assert!(matches!(result, Err(SearchError::Disabled)));
  }
}
