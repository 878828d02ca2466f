//! Reading the fragments of one release directory

use super::Entry;
use super::sort::sort_entries;
use crate::core::error::{CalensError, CalensResult};
use crate::release::Release;
use std::fs;
use std::path::{Path, PathBuf};

/// File names in a release directory that are never fragments
pub const IGNORED_NAMES: [&str; 2] = ["TEMPLATE", "releases"];

/// List fragment files in `dir`, sorted by file name
///
/// Skips [`IGNORED_NAMES`] and anything starting with a dot.
pub fn list_fragments(dir: &Path) -> CalensResult<Vec<PathBuf>> {
  let entries = fs::read_dir(dir).map_err(|e| CalensError::io("open dir", dir, e))?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|e| CalensError::io("list dir", dir, e))?;
    let name = entry.file_name();

    if IGNORED_NAMES.iter().any(|ignored| name == *ignored) {
      continue;
    }
    if name.as_encoded_bytes().starts_with(b".") {
      continue;
    }

    names.push(name);
  }
  names.sort();

  Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Read, parse and validate one fragment file
pub fn read_fragment(path: &Path) -> CalensResult<Entry> {
  let text = fs::read_to_string(path).map_err(|e| CalensError::io("read", path, e))?;
  Entry::parse(&text).map_err(|e| CalensError::fragment(path, e))
}

/// All entries of a release, ordered by change type
pub fn read_entries(release: &Release) -> CalensResult<Vec<Entry>> {
  let mut entries = list_fragments(&release.path)?
    .iter()
    .map(|path| read_fragment(path))
    .collect::<CalensResult<Vec<_>>>()?;

  sort_entries(&mut entries);
  tracing::debug!(version = %release.version, count = entries.len(), "read fragments");

  Ok(entries)
}
