#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use std::{fs, path::Path};

use markview::{
  api::{self, CONTENT_ERROR, ContentResponse},
  export::export_site,
  html::{PageMode, render_page},
  site::Site,
};
use markview_config::Config;
use serde_json::json;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("create parent");
  }
  fs::write(path, content).expect("write document");
}

fn docs_root() -> TempDir {
  let dir = TempDir::new().expect("temp dir");
  write(
    dir.path(),
    "README.md",
    "# Welcome\n\nSee the [guide](docs/guide.md) or [Rust](https://rust-lang.org).",
  );
  write(
    dir.path(),
    "docs/guide.md",
    "# Guide\n\n## Install\n\nRun `cargo install`.\n\n[Back](README.md)",
  );
  write(dir.path(), "notes.txt", "not a document");
  dir
}

fn config_for(dir: &TempDir) -> Config {
  Config {
    root_dir: dir.path().to_path_buf(),
    ..Default::default()
  }
}

#[test]
fn page_contains_document_and_sidebar() {
  let dir = docs_root();
  let site = Site::new(config_for(&dir));
  let documents = site.documents();

  let html = render_page(&site, &documents, None, PageMode::Served)
    .expect("page renders");

  assert!(html.contains("<h1>Welcome</h1>"));
  assert!(html.contains("<title>Welcome - MarkView</title>"));
  assert!(html.contains(r#"<a href="?file=docs%2Fguide.md">guide</a>"#));
  assert!(html.contains(r#"href="?file=docs%2Fguide.md" title="#));
  assert!(html.contains(r#"id="search-input""#));
  assert!(!html.contains("<base"));
}

#[test]
fn missing_document_renders_error_page() {
  let dir = docs_root();
  let site = Site::new(config_for(&dir));

  let html = render_page(&site, &[], Some("nope.md"), PageMode::Served)
    .expect("page renders");
  assert!(html.contains("<h1>File Not Found</h1>"));
  assert!(html.contains("<code>nope.md</code>"));

  let html = render_page(&site, &[], Some("notes.txt"), PageMode::Served)
    .expect("page renders");
  assert!(html.contains("Only markdown (.md) files are allowed."));
}

#[test]
fn author_markup_in_file_names_is_escaped() {
  let dir = docs_root();
  write(dir.path(), "<i>tagged.md", "# Tagged");
  let site = Site::new(config_for(&dir));
  let documents = site.documents();

  let html = render_page(&site, &documents, None, PageMode::Served)
    .expect("page renders");
  assert!(!html.contains("<i>tagged"));
  assert!(html.contains("&lt;i&gt;tagged.md"));
}

#[test]
fn content_api_serves_fragments_only_inside_root() {
  let dir = docs_root();
  let site = Site::new(config_for(&dir));

  match api::content(&site, "/docs/guide.md") {
    ContentResponse::Found { success, file, html } => {
      assert!(success);
      assert_eq!(file, "docs/guide.md");
      assert!(html.starts_with("<h1>Guide</h1><h2>Install</h2>"));
      assert!(html.contains("<code>cargo install</code>"));
    },
    ContentResponse::Failed { error, .. } => panic!("unexpected error {error}"),
  }

  for bad in ["../../etc/passwd", "notes.txt", "missing.md", ""] {
    assert_eq!(
      serde_json::to_value(api::content(&site, bad)).unwrap(),
      json!({ "success": false, "error": CONTENT_ERROR }),
      "request for {bad:?}"
    );
  }
}

#[test]
fn search_api_reports_short_queries() {
  let dir = docs_root();
  let site = Site::new(config_for(&dir));

  let value = serde_json::to_value(api::search(&site, " g ")).unwrap();
  assert_eq!(
    value,
    json!({
      "success": false,
      "error": "Search query must be at least 2 characters",
      "results": []
    })
  );
}

#[test]
fn search_api_finds_matches() {
  let dir = docs_root();
  let site = Site::new(config_for(&dir));

  let value = serde_json::to_value(api::search(&site, "  GUIDE ")).unwrap();
  assert_eq!(value["success"], json!(true));
  assert_eq!(value["query"], json!("GUIDE"));
  assert_eq!(value["totalResults"], json!(2));

  let files: Vec<&str> = value["results"]
    .as_array()
    .unwrap()
    .iter()
    .map(|result| result["file"].as_str().unwrap())
    .collect();
  assert_eq!(files, vec!["README.md", "docs/guide.md"]);
  assert_eq!(
    value["results"][1]["matches"][0]["preview"],
    json!("# <mark>Guide</mark>")
  );
}

#[test]
fn export_writes_static_pages() {
  let dir = docs_root();
  let out = TempDir::new().expect("output dir");
  let config = config_for(&dir);

  let count = export_site(&config, out.path(), Some(2)).expect("export");
  assert_eq!(count, 2);

  let readme =
    fs::read_to_string(out.path().join("README.html")).expect("README page");
  assert!(readme.contains(r#"<base href="./" />"#));
  assert!(readme.contains(r#"<a href="docs/guide.html">guide</a>"#));
  assert!(!readme.contains(r#"id="search-input""#));

  let guide = fs::read_to_string(out.path().join("docs/guide.html"))
    .expect("guide page");
  assert!(guide.contains(r#"<base href="../" />"#));
  assert!(guide.contains(r#"<a href="README.html">Back</a>"#));

  let index =
    fs::read_to_string(out.path().join("index.html")).expect("index page");
  assert_eq!(index, readme);
}

#[test]
fn export_without_default_document_lists_documents() {
  let dir = TempDir::new().expect("temp dir");
  write(dir.path(), "a.md", "# A");
  write(dir.path(), "sub/b.md", "# B");
  let out = TempDir::new().expect("output dir");

  export_site(&config_for(&dir), out.path(), None).expect("export");

  let index =
    fs::read_to_string(out.path().join("index.html")).expect("index page");
  assert!(index.contains("<h1>MarkView</h1>"));
  assert!(index.contains(r#"<a href="a.html">a.md</a>"#));
  assert!(index.contains(r#"<a href="sub/b.html">sub/b.md</a>"#));
}
