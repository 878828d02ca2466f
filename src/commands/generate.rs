//! Changelog generation
//!
//! The pipeline is strictly fail-fast: the template is compiled first, then
//! every selected fragment is parsed and validated, and only a complete
//! document is ever written.

use crate::core::config::{GenerateConfig, OutputMode};
use crate::core::error::{CalensError, CalensResult};
use crate::fragment::read_entries;
use crate::release::{scan_releases, select_releases};
use crate::render::{ChangelogTemplate, ReleaseChanges};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Where the collected releases end up
enum Target {
  Template(ChangelogTemplate),
  Json,
  Check,
}

/// Run the generate command
pub fn run_generate(config: &GenerateConfig) -> CalensResult<()> {
  let target = match config.mode {
    OutputMode::Render => Target::Template(ChangelogTemplate::load(&config.template)?),
    OutputMode::Json => Target::Json,
    OutputMode::Check => Target::Check,
  };

  let changes = collect_changes(&config.input_dir, &config.versions)?;

  match target {
    Target::Template(template) => {
      let document = template.render(&changes)?;
      write_output(config.output.as_deref(), &document)
    }
    Target::Json => {
      let mut document = serde_json::to_string_pretty(&changes)?;
      document.push('\n');
      write_output(config.output.as_deref(), &document)
    }
    Target::Check => {
      let fragments: usize = changes.iter().map(|c| c.entries.len()).sum();
      println!(
        "✅ {} fragments in {} releases are valid",
        fragments,
        changes.len()
      );
      Ok(())
    }
  }
}

/// Scan, select and read releases; releases without fragments are dropped
pub fn collect_changes(input_dir: &Path, versions: &[String]) -> CalensResult<Vec<ReleaseChanges>> {
  let releases = select_releases(scan_releases(input_dir)?, versions);

  for requested in versions {
    if !releases.iter().any(|r| r.version == *requested) {
      tracing::warn!(version = %requested, "requested version has no release directory");
    }
  }

  let mut changes = Vec::with_capacity(releases.len());
  for release in &releases {
    let entries = read_entries(release)?;
    if entries.is_empty() {
      tracing::debug!(version = %release.version, "skipping release without fragments");
      continue;
    }
    changes.push(ReleaseChanges::new(release, &entries));
  }

  Ok(changes)
}

/// Write the finished document to `output`, or stdout when `None`
fn write_output(output: Option<&Path>, document: &str) -> CalensResult<()> {
  match output {
    Some(path) => {
      fs::write(path, document).map_err(|e| CalensError::io("create file", path, e))?;
      tracing::info!(path = %path.display(), bytes = document.len(), "wrote changelog");
    }
    None => {
      let mut stdout = io::stdout().lock();
      stdout
        .write_all(document.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| CalensError::io("write", "<stdout>", e))?;
    }
  }
  Ok(())
}
