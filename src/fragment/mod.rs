//! Changelog fragments
//!
//! A fragment is one file describing one change. This module lists the
//! fragments of a release, parses and validates them, and orders them by
//! change type.

pub mod entry;
pub mod links;
pub mod reader;
pub mod sort;

pub use entry::Entry;
pub use reader::read_entries;

use std::fmt;

/// Why a single fragment was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
  /// The file has no first line
  Empty,
  /// A token in the link list is not an absolute URL
  InvalidUrl { token: String, reason: String },
  MissingType,
  MissingTitle,
  /// No GitHub issue or pull request link
  MissingPrimaryId,
  TrailingPunctuation,
  UnknownType { found: String, valid: String },
  /// `<Type> <title>` is longer than [`entry::MAX_TITLE_LEN`]
  TitleTooLong { length: usize },
}

impl FragmentError {
  pub fn help_message(&self) -> Option<String> {
    match self {
      FragmentError::Empty | FragmentError::MissingType => {
        Some("Start the first line with a type, e.g. `Bugfix: Restore old behavior`.".to_string())
      }
      FragmentError::MissingPrimaryId => Some(
        "End the fragment with a paragraph listing at least one GitHub issue or pull request URL.".to_string(),
      ),
      FragmentError::InvalidUrl { .. } => {
        Some("The last paragraph of a fragment may only contain URLs separated by whitespace.".to_string())
      }
      FragmentError::TitleTooLong { .. } => {
        Some("Move details into the body paragraphs and keep the title short.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for FragmentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FragmentError::Empty => write!(f, "unable to read first line"),
      FragmentError::InvalidUrl { token, reason } => write!(f, "unable to parse url {:?}: {}", token, reason),
      FragmentError::MissingType => write!(
        f,
        "entry title does not have a prefix, example: Bugfix: restore old behavior"
      ),
      FragmentError::MissingTitle => write!(f, "entry does not have a title"),
      FragmentError::MissingPrimaryId => write!(f, "primary issue ID not found"),
      FragmentError::TrailingPunctuation => write!(
        f,
        "title ends with punctuation, e.g. a character out of {:?}",
        entry::PUNCTUATION
      ),
      FragmentError::UnknownType { found, valid } => {
        write!(f, "entry type {:?} is invalid, valid types: {}", found, valid)
      }
      FragmentError::TitleTooLong { length } => write!(
        f,
        "title is too long ({} characters including the type, at most {})",
        length,
        entry::MAX_TITLE_LEN
      ),
    }
  }
}

impl std::error::Error for FragmentError {}
