use std::{collections::HashSet, ffi::OsStr, path::Path};

use log::{debug, trace};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_string_lossy().starts_with('.')
}

/// Collect every document below `root` that has the given extension.
///
/// Paths are relative to `root`, use `/` as separator and are sorted. Symlinks
/// are followed as long as their target lies inside the root, and documents
/// reached through a symlinked directory are listed under the link's name.
/// Links that lead out of the root are skipped, so everything listed can
/// also be resolved. Each real directory is scanned at most once, which also
/// stops symlink cycles; the first path that reaches it wins. Hidden entries
/// are skipped unless they are symlinks. Entries that cannot be read,
/// including broken symlinks, are skipped.
#[must_use]
pub fn scan_markdown_files(root: &Path, extension: &str) -> Vec<String> {
  let Ok(canonical_root) = root.canonicalize() else {
    debug!("Cannot scan {}: root does not resolve", root.display());
    return Vec::new();
  };
  let mut visited = HashSet::from([canonical_root.clone()]);
  let extension = OsStr::new(extension);

  // Real entries before symlinks, then by name, so the listing does not
  // depend on directory order
  let walker = WalkDir::new(root)
    .follow_links(true)
    .sort_by(|a, b| {
      a.path_is_symlink()
        .cmp(&b.path_is_symlink())
        .then_with(|| a.file_name().cmp(b.file_name()))
    })
    .into_iter()
    .filter_entry(|entry| {
      if entry.depth() == 0 {
        return true;
      }

      if is_hidden(entry) && !entry.path_is_symlink() {
        trace!("Skipping hidden entry: {}", entry.path().display());
        return false;
      }

      // Below a kept directory only a symlink can lead somewhere else
      let is_dir = entry.file_type().is_dir();
      if !is_dir && !entry.path_is_symlink() {
        return true;
      }

      let real = match entry.path().canonicalize() {
        Ok(real) => real,
        Err(e) => {
          debug!("Cannot resolve {}: {e}", entry.path().display());
          return false;
        },
      };

      if !real.starts_with(&canonical_root) {
        debug!(
          "Skipping {}: resolves outside the root",
          entry.path().display()
        );
        return false;
      }

      if !is_dir {
        return true;
      }

      let first_visit = visited.insert(real);
      if !first_visit {
        debug!(
          "Skipping already scanned directory: {}",
          entry.path().display()
        );
      }
      first_visit
    });

  let mut files: Vec<String> = walker
    .filter_map(|entry| {
      entry
        .map_err(|e| debug!("Skipping unreadable entry: {e}"))
        .ok()
    })
    .filter(|entry| entry.file_type().is_file())
    .filter(|entry| entry.path().extension() == Some(extension))
    .filter_map(|entry| {
      let relative = entry.path().strip_prefix(root).ok()?;
      let parts: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();
      Some(parts.join("/"))
    })
    .collect();

  files.sort();
  debug!("Found {} documents under {}", files.len(), root.display());
  files
}
