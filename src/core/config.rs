use crate::core::error::{CalensError, CalensResult, ConfigError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory holding one subdirectory per release
pub const DEFAULT_INPUT_DIR: &str = "changelog";

/// Default template location, relative to the working directory
pub const DEFAULT_TEMPLATE: &str = "changelog/CHANGELOG.tmpl";

/// Optional configuration file for calens
/// Searched in order: calens.toml, .calens.toml, .config/calens.toml
///
/// Paths are interpreted relative to the working directory, the same way
/// command-line paths are.
///
/// # Example
///
/// ```toml
/// input = "changelog"
/// template = "changelog/CHANGELOG.tmpl"
/// output = "CHANGELOG.md"
/// versions = ["2.1.0"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
  pub input: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub template: Option<PathBuf>,
  #[serde(default)]
  pub versions: Vec<String>,
}

impl FileConfig {
  /// Find config file in search order: calens.toml, .calens.toml, .config/calens.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("calens.toml"),
      path.join(".calens.toml"),
      path.join(".config").join("calens.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load and parse a config file
  pub fn load(config_path: &Path) -> CalensResult<Self> {
    if !config_path.is_file() {
      return Err(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }
      .into());
    }

    let content =
      fs::read_to_string(config_path).map_err(|e| CalensError::io("read config", config_path, e))?;

    toml_edit::de::from_str(&content).map_err(|e| {
      ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason: e.to_string().trim_end().to_string(),
      }
      .into()
    })
  }

  /// Load the explicitly requested file, else the first one found in `dir`,
  /// else an empty config
  pub fn load_or_default(dir: &Path, explicit: Option<&Path>) -> CalensResult<Self> {
    if let Some(path) = explicit {
      return Self::load(path);
    }

    match Self::find_config_path(dir) {
      Some(path) => {
        tracing::debug!(path = %path.display(), "loading config file");
        Self::load(&path)
      }
      None => Ok(Self::default()),
    }
  }
}

/// What to do with the collected releases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
  /// Render the template into the output sink
  #[default]
  Render,
  /// Validate every fragment, produce no output
  Check,
  /// Emit the template context as JSON instead of rendering
  Json,
}

/// Values given on the command line; `None`/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub input: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub template: Option<PathBuf>,
  pub versions: Vec<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
  pub input_dir: PathBuf,
  /// `None` writes to stdout
  pub output: Option<PathBuf>,
  pub template: PathBuf,
  /// Empty selects every release
  pub versions: Vec<String>,
  pub mode: OutputMode,
}

impl GenerateConfig {
  /// Merge command line over config file over built-in defaults
  pub fn resolve(file: FileConfig, cli: Overrides, mode: OutputMode) -> Self {
    let versions = if cli.versions.is_empty() {
      file.versions
    } else {
      cli.versions
    };

    Self {
      input_dir: cli
        .input
        .or(file.input)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
      output: cli.output.or(file.output),
      template: cli
        .template
        .or(file.template)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE)),
      versions: versions
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect(),
      mode,
    }
  }
}
