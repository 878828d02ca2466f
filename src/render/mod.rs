//! Changelog rendering
//!
//! Templates are tera templates. They receive a single variable, `releases`:
//!
//! ```text
//! releases: [
//!   { version: "2.1.0", date: "2024-06-01" | "UNRELEASED", entries: [
//!     { type, type_short, title, paragraphs, urls, issues, issue_urls,
//!       prs, pr_urls, other_urls, primary_id, primary_url }
//!   ] }
//! ]
//! ```
//!
//! The same structure is what `--json` prints.

pub mod filters;

use crate::core::error::{CalensError, CalensResult, TemplateStage};
use crate::fragment::Entry;
use crate::release::Release;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "changelog";

/// One release as seen by the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseChanges {
  pub version: String,
  pub date: String,
  pub entries: Vec<EntryView>,
}

impl ReleaseChanges {
  pub fn new(release: &Release, entries: &[Entry]) -> Self {
    Self {
      version: release.version.clone(),
      date: release.date_label(),
      entries: entries.iter().map(EntryView::from).collect(),
    }
  }
}

/// One entry as seen by the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
  #[serde(rename = "type")]
  pub entry_type: &'static str,
  pub type_short: &'static str,
  pub title: String,
  pub paragraphs: Vec<String>,
  pub urls: Vec<String>,
  pub issues: Vec<String>,
  pub issue_urls: Vec<String>,
  pub prs: Vec<String>,
  pub pr_urls: Vec<String>,
  pub other_urls: Vec<String>,
  pub primary_id: String,
  pub primary_url: String,
}

impl From<&Entry> for EntryView {
  fn from(entry: &Entry) -> Self {
    Self {
      entry_type: entry.entry_type.name(),
      type_short: entry.entry_type.abbreviation(),
      title: entry.title.clone(),
      paragraphs: entry.paragraphs.clone(),
      urls: entry.links.urls.clone(),
      issues: entry.links.issues.clone(),
      issue_urls: entry.links.issue_urls.clone(),
      prs: entry.links.prs.clone(),
      pr_urls: entry.links.pr_urls.clone(),
      other_urls: entry.links.other_urls.clone(),
      primary_id: entry.primary_id.clone(),
      primary_url: entry.primary_url.clone(),
    }
  }
}

/// A compiled changelog template
pub struct ChangelogTemplate {
  tera: Tera,
  path: PathBuf,
}

impl ChangelogTemplate {
  /// Read and compile the template at `path`
  pub fn load(path: &Path) -> CalensResult<Self> {
    let source = fs::read_to_string(path).map_err(|e| CalensError::io("read template from", path, e))?;
    Self::from_source(&source, path)
  }

  /// Compile a template; `path` is only used in error messages
  pub fn from_source(source: &str, path: &Path) -> CalensResult<Self> {
    let mut tera = Tera::default();
    filters::register(&mut tera);
    tera
      .add_raw_template(TEMPLATE_NAME, source)
      .map_err(|e| template_error(path, TemplateStage::Compile, &e))?;

    tracing::debug!(path = %path.display(), "compiled template");
    Ok(Self {
      tera,
      path: path.to_path_buf(),
    })
  }

  /// Render the whole document into memory
  pub fn render(&self, releases: &[ReleaseChanges]) -> CalensResult<String> {
    let mut context = Context::new();
    context.insert("releases", releases);

    self
      .tera
      .render(TEMPLATE_NAME, &context)
      .map_err(|e| template_error(&self.path, TemplateStage::Render, &e))
  }
}

/// Flatten tera's error chain; the top-level message alone rarely says what
/// went wrong
fn template_error(path: &Path, stage: TemplateStage, err: &tera::Error) -> CalensError {
  let mut message = err.to_string();
  let mut source = std::error::Error::source(err);
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }

  CalensError::Template {
    path: path.to_path_buf(),
    stage,
    message,
  }
}
