//! Release discovery
//!
//! The changelog directory holds one subdirectory per release:
//!
//! ```text
//! changelog/
//!   unreleased/            # not released yet, sorts first
//!   2.1.0_2024-06-01/      # version + release date
//!   2.0.0_2024-01-15/
//!   CHANGELOG.tmpl         # plain files are ignored
//! ```
//!
//! Any other subdirectory name is a hard error.

use crate::core::error::{CalensError, CalensResult, ReleaseError};
use chrono::NaiveDate;
use regex::Regex;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Directory name (and version) of the not-yet-released changes
pub const UNRELEASED: &str = "unreleased";

/// Date placeholder handed to templates for the unreleased version
pub const UNRELEASED_DATE: &str = "UNRELEASED";

static VERSION_DIR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d+\.\d+\.\d+)(_(\d{4}-\d{2}-\d{2}))?$").expect("release directory pattern is valid")
});

/// One release directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
  /// `x.y.z`, or `unreleased`
  pub version: String,
  /// Release date; `None` means not released yet
  pub date: Option<NaiveDate>,
  /// Directory holding the fragments
  pub path: PathBuf,
}

impl Release {
  /// Parse a release from its directory name
  pub fn from_dir_name(name: &str, path: PathBuf) -> CalensResult<Self> {
    if name == UNRELEASED {
      return Ok(Self {
        version: UNRELEASED.to_string(),
        date: None,
        path,
      });
    }

    let Some(caps) = VERSION_DIR.captures(name) else {
      return Err(ReleaseError::InvalidDirName { path }.into());
    };

    let date = match caps.get(3) {
      Some(raw) => Some(NaiveDate::parse_from_str(raw.as_str(), "%Y-%m-%d").map_err(|e| {
        ReleaseError::InvalidDate {
          path: path.clone(),
          date: raw.as_str().to_string(),
          reason: e.to_string(),
        }
      })?),
      None => None,
    };

    Ok(Self {
      version: caps[1].to_string(),
      date,
      path,
    })
  }

  /// `YYYY-MM-DD`, or `UNRELEASED` when there is no date
  pub fn date_label(&self) -> String {
    self
      .date
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| UNRELEASED_DATE.to_string())
  }
}

/// List and order all releases below `dir`
///
/// Undated releases come first, then dated ones from newest to oldest. The
/// sort is stable over the lexicographic directory order, so releases sharing
/// a date keep a deterministic order.
pub fn scan_releases(dir: &Path) -> CalensResult<Vec<Release>> {
  let entries = fs::read_dir(dir).map_err(|e| CalensError::io("open dir", dir, e))?;

  let mut dirs = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|e| CalensError::io("list directory", dir, e))?;
    let file_type = entry
      .file_type()
      .map_err(|e| CalensError::io("stat", entry.path(), e))?;
    if file_type.is_dir() {
      dirs.push(entry.path());
    }
  }
  dirs.sort();

  let mut releases = Vec::with_capacity(dirs.len());
  for path in dirs {
    let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
      return Err(ReleaseError::InvalidDirName { path }.into());
    };
    releases.push(Release::from_dir_name(&name, path)?);
  }

  sort_releases(&mut releases);
  tracing::debug!(count = releases.len(), dir = %dir.display(), "scanned releases");

  Ok(releases)
}

/// Stable sort: undated first, then by date descending
pub fn sort_releases(releases: &mut [Release]) {
  releases.sort_by_key(|r| (r.date.is_some(), Reverse(r.date)));
}

/// Keep only the releases named in `versions`, in scan order
///
/// An empty selection keeps everything.
pub fn select_releases(releases: Vec<Release>, versions: &[String]) -> Vec<Release> {
  if versions.is_empty() {
    return releases;
  }

  releases
    .into_iter()
    .filter(|r| versions.iter().any(|v| *v == r.version))
    .collect()
}
