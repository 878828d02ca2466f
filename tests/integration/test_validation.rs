//! Integration tests for fragment and layout validation

use crate::helpers::{TestProject, fragment, run_calens, run_calens_failing};
use anyhow::Result;

fn assert_fails_naming(project: &TestProject, file: &str, message: &str) -> Result<()> {
  let stderr = run_calens_failing(&project.path, &["-o", "CHANGELOG.md"])?;
  assert!(stderr.contains(file), "stderr should name {}: {}", file, stderr);
  assert!(stderr.contains(message), "stderr should contain {:?}: {}", message, stderr);
  assert!(!project.file_exists("CHANGELOG.md"), "no output on failure");
  Ok(())
}

#[test]
fn test_trailing_punctuation() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "good", &fragment("Bugfix: upload retry", 1))?;
  project.add_fragment("unreleased", "shouting", &fragment("Bugfix: fix the crash!", 2))?;

  assert_fails_naming(&project, "shouting", "title ends with punctuation")
}

#[test]
fn test_missing_type() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "untyped", &fragment("just a title", 1))?;

  assert_fails_naming(&project, "untyped", "does not have a prefix")
}

#[test]
fn test_unknown_type() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "feature", &fragment("Feature: dark mode", 1))?;

  let stderr = run_calens_failing(&project.path, &[])?;
  assert!(stderr.contains("\"Feature\" is invalid"), "got: {}", stderr);
  assert!(stderr.contains("Bugfix"), "valid types should be listed: {}", stderr);

  Ok(())
}

#[test]
fn test_title_too_long() -> Result<()> {
  let project = TestProject::new()?;
  let title = format!("Enhancement: {}", "a".repeat(80));
  project.add_fragment("1.0.0_2023-01-01", "verbose", &fragment(&title, 1))?;

  assert_fails_naming(&project, "verbose", "title is too long")
}

#[test]
fn test_title_at_limit_is_accepted() -> Result<()> {
  let project = TestProject::new()?;
  // 11 + 1 + 68 = 80
  let title = format!("Enhancement: {}", "a".repeat(68));
  project.add_fragment("unreleased", "long", &fragment(&title, 1))?;

  run_calens(&project.path, &["--check"])?;
  Ok(())
}

#[test]
fn test_missing_primary_id() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment(
    "unreleased",
    "forum-only",
    "Change: new forum link\n\nhttps://central.owncloud.org/t/ios\n",
  )?;

  assert_fails_naming(&project, "forum-only", "primary issue ID not found")
}

#[test]
fn test_invalid_url() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment(
    "unreleased",
    "bad-link",
    "Bugfix: upload retry\n\nhttps://github.com/owncloud/ios-app/issues/1 http://[broken\n",
  )?;

  assert_fails_naming(&project, "bad-link", "unable to parse url")
}

#[test]
fn test_invalid_release_dir_name() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "fix", &fragment("Bugfix: upload retry", 1))?;
  project.add_release("v1.0.0")?;

  let stderr = run_calens_failing(&project.path, &[])?;
  assert!(stderr.contains("Invalid subdir name"), "got: {}", stderr);
  assert!(stderr.contains("v1.0.0"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_invalid_release_date() -> Result<()> {
  let project = TestProject::new()?;
  project.add_release("1.0.0_2023-02-30")?;

  let stderr = run_calens_failing(&project.path, &[])?;
  assert!(stderr.contains("2023-02-30"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_unselected_release_is_not_read() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("1.0.0_2023-01-01", "fix", &fragment("Bugfix: upload retry", 1))?;
  project.add_fragment("unreleased", "broken", "not a fragment at all")?;

  let output = run_calens(&project.path, &["--version", "1.0.0"])?;
  let stdout = String::from_utf8(output.stdout)?;
  assert_eq!(stdout, "## 1.0.0 (2023-01-01)\n* Fix - Upload retry (#1)\n");

  run_calens_failing(&project.path, &[])?;
  Ok(())
}

#[test]
fn test_check_reports_invalid_fragment() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "shouting", &fragment("Bugfix: fix the crash.", 2))?;

  let stderr = run_calens_failing(&project.path, &["--check"])?;
  assert!(stderr.contains("shouting"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_missing_input_dir() -> Result<()> {
  let project = TestProject::new()?;

  let stderr = run_calens_failing(&project.path, &["-i", "does-not-exist"])?;
  assert!(stderr.contains("does-not-exist"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_missing_template() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "fix", &fragment("Bugfix: upload retry", 1))?;

  let stderr = run_calens_failing(&project.path, &["-t", "nope.tmpl", "-o", "CHANGELOG.md"])?;
  assert!(stderr.contains("nope.tmpl"), "got: {}", stderr);
  assert!(!project.file_exists("CHANGELOG.md"));

  Ok(())
}

#[test]
fn test_template_compile_error() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "fix", &fragment("Bugfix: upload retry", 1))?;
  project.write_file("broken.tmpl", "{% for r in releases %}unterminated")?;

  let stderr = run_calens_failing(&project.path, &["-t", "broken.tmpl", "-o", "CHANGELOG.md"])?;
  assert!(stderr.contains("Unable to compile template"), "got: {}", stderr);
  assert!(!project.file_exists("CHANGELOG.md"));

  Ok(())
}

#[test]
fn test_template_render_error_leaves_no_output() -> Result<()> {
  let project = TestProject::new()?;
  project.add_fragment("unreleased", "fix", &fragment("Bugfix: upload retry", 1))?;
  project.write_file(
    "bad-field.tmpl",
    "{% for r in releases %}{{ r.version }}{{ r.no_such_field }}{% endfor %}",
  )?;

  let stderr = run_calens_failing(&project.path, &["-t", "bad-field.tmpl", "-o", "CHANGELOG.md"])?;
  assert!(stderr.contains("Error executing template"), "got: {}", stderr);
  assert!(!project.file_exists("CHANGELOG.md"));

  Ok(())
}
