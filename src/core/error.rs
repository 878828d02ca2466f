//! Error types for calens with contextual messages
//!
//! Every failure in the pipeline is fatal. Errors carry the offending path
//! wherever one exists, and most variants can offer a short hint telling the
//! author how to fix the fragment or directory in question.

use crate::fragment::FragmentError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for calens
#[derive(Debug)]
pub enum CalensError {
  /// Configuration errors
  Config(ConfigError),

  /// Filesystem errors while listing, reading or writing
  Io {
    path: PathBuf,
    action: &'static str,
    source: io::Error,
  },

  /// Release directory layout errors
  Release(ReleaseError),

  /// A fragment failed to parse or validate
  Fragment { path: PathBuf, error: FragmentError },

  /// Template compilation or rendering failed
  Template {
    path: PathBuf,
    stage: TemplateStage,
    message: String,
  },

  /// Anything without a more specific category
  Message(String),
}

impl CalensError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    CalensError::Message(msg.into())
  }

  /// Wrap an I/O error with the path and the action that failed
  pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
    CalensError::Io {
      path: path.into(),
      action,
      source,
    }
  }

  /// Attach the fragment path to a parse or validation failure
  pub fn fragment(path: impl Into<PathBuf>, error: FragmentError) -> Self {
    CalensError::Fragment {
      path: path.into(),
      error,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      CalensError::Config(e) => e.help_message(),
      CalensError::Release(e) => e.help_message(),
      CalensError::Fragment { error, .. } => error.help_message(),
      CalensError::Template { stage, .. } => stage.help_message(),
      CalensError::Io { .. } | CalensError::Message(_) => None,
    }
  }
}

impl fmt::Display for CalensError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CalensError::Config(e) => write!(f, "{}", e),
      CalensError::Io { path, action, source } => {
        write!(f, "Unable to {} {}: {}", action, path.display(), source)
      }
      CalensError::Release(e) => write!(f, "{}", e),
      CalensError::Fragment { path, error } => write!(f, "File {}: {}", path.display(), error),
      CalensError::Template { path, stage, message } => {
        write!(f, "{} template {}: {}", stage, path.display(), message)
      }
      CalensError::Message(message) => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for CalensError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CalensError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<ReleaseError> for CalensError {
  fn from(err: ReleaseError) -> Self {
    CalensError::Release(err)
  }
}

impl From<ConfigError> for CalensError {
  fn from(err: ConfigError) -> Self {
    CalensError::Config(err)
  }
}

impl From<serde_json::Error> for CalensError {
  fn from(err: serde_json::Error) -> Self {
    CalensError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// The config file is not valid TOML or has unknown keys
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to use calens.toml from the working directory, or the built-in defaults.".to_string())
      }
      ConfigError::Invalid { .. } => {
        Some("Supported keys are `input`, `output`, `template` and `versions`.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::Invalid { path, reason } => {
        write!(f, "Failed to parse config from {}: {}", path.display(), reason)
      }
    }
  }
}

/// Errors in the layout of the changelog directory
#[derive(Debug)]
pub enum ReleaseError {
  /// Subdirectory name is neither `unreleased` nor `x.y.z[_YYYY-MM-DD]`
  InvalidDirName { path: PathBuf },

  /// Name matched the pattern but the date is not a calendar date
  InvalidDate { path: PathBuf, date: String, reason: String },
}

impl ReleaseError {
  fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::InvalidDirName { .. } => Some(
        "Release directories must be named `unreleased`, `x.y.z` or `x.y.z_YYYY-MM-DD` (e.g. 1.4.0_2024-03-18)."
          .to_string(),
      ),
      ReleaseError::InvalidDate { .. } => Some("Release dates use the ISO format YYYY-MM-DD.".to_string()),
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::InvalidDirName { path } => write!(f, "Invalid subdir name {}", path.display()),
      ReleaseError::InvalidDate { path, date, reason } => {
        write!(f, "Unable to parse date {:?} of {}: {}", date, path.display(), reason)
      }
    }
  }
}

/// Where a template failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateStage {
  /// Reading or parsing the template source
  Compile,
  /// Evaluating the template against the releases
  Render,
}

impl TemplateStage {
  fn help_message(&self) -> Option<String> {
    match self {
      TemplateStage::Compile => None,
      TemplateStage::Render => Some(
        "The template receives `releases`, a list of {version, date, entries}. Check the field names it uses."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for TemplateStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TemplateStage::Compile => write!(f, "Unable to compile"),
      TemplateStage::Render => write!(f, "Error executing"),
    }
  }
}

/// Result type alias for calens
pub type CalensResult<T> = Result<T, CalensError>;

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &CalensError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
