//! Integration tests for calens.toml handling

use crate::helpers::{TestProject, fragment, run_calens, run_calens_failing};
use anyhow::Result;
use pretty_assertions::assert_eq;

fn project() -> Result<TestProject> {
  let project = TestProject::new()?;
  project.write_file("notes/1.0.0_2023-01-01/fix", &fragment("Bugfix: upload retry", 1))?;
  project.write_file("notes/unreleased/login", &fragment("Enhancement: new login", 2))?;
  project.write_file("tmpl/short.tmpl", "{% for r in releases %}{{ r.version }}\n{% endfor %}")?;
  Ok(project)
}

#[test]
fn test_config_file_supplies_defaults() -> Result<()> {
  let project = project()?;
  project.write_file(
    "calens.toml",
    "input = \"notes\"\ntemplate = \"tmpl/short.tmpl\"\noutput = \"CHANGELOG.md\"\n",
  )?;

  let output = run_calens(&project.path, &[])?;
  assert!(output.stdout.is_empty());
  assert_eq!(project.read_file("CHANGELOG.md")?, "unreleased\n1.0.0\n");

  Ok(())
}

#[test]
fn test_hidden_config_file() -> Result<()> {
  let project = project()?;
  project.write_file(
    ".config/calens.toml",
    "input = \"notes\"\ntemplate = \"tmpl/short.tmpl\"\nversions = [\"1.0.0\"]\n",
  )?;

  let output = run_calens(&project.path, &[])?;
  assert_eq!(String::from_utf8(output.stdout)?, "1.0.0\n");

  Ok(())
}

#[test]
fn test_command_line_overrides_config() -> Result<()> {
  let project = project()?;
  project.write_file(
    "calens.toml",
    "input = \"notes\"\ntemplate = \"tmpl/short.tmpl\"\nversions = [\"1.0.0\"]\n",
  )?;

  let output = run_calens(&project.path, &["--version", "unreleased"])?;
  assert_eq!(String::from_utf8(output.stdout)?, "unreleased\n");

  Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
  let project = project()?;
  project.write_file(
    "ci/release.toml",
    "input = \"notes\"\ntemplate = \"tmpl/short.tmpl\"\n",
  )?;

  let output = run_calens(&project.path, &["--config", "ci/release.toml"])?;
  assert_eq!(String::from_utf8(output.stdout)?, "unreleased\n1.0.0\n");

  Ok(())
}

#[test]
fn test_explicit_config_missing() -> Result<()> {
  let project = project()?;

  let stderr = run_calens_failing(&project.path, &["--config", "missing.toml"])?;
  assert!(stderr.contains("Config file not found"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_unknown_config_key() -> Result<()> {
  let project = project()?;
  project.write_file("calens.toml", "input = \"notes\"\nformat = \"markdown\"\n")?;

  let stderr = run_calens_failing(&project.path, &[])?;
  assert!(stderr.contains("Failed to parse config"), "got: {}", stderr);
  assert!(stderr.contains("format"), "got: {}", stderr);

  Ok(())
}
