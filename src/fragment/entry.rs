//! Fragment parsing and validation
//!
//! Format of a fragment file:
//!
//! ```text
//! Bugfix: Fix crash on startup
//!
//! The app crashed when the account list was empty. It now shows the
//! onboarding screen instead.
//!
//! https://github.com/owncloud/ios-app/issues/42
//! https://github.com/owncloud/ios-app/pull/57
//! ```
//!
//! The first line is `<Type>: <title>`, followed by free-form paragraphs.
//! The last paragraph is always the list of links.

use super::FragmentError;
use super::links::Links;
use crate::utils::capitalize;
use std::fmt;

/// Longest allowed `<Type> <title>` line
pub const MAX_TITLE_LEN: usize = 80;

/// Characters a title may not end with
pub const PUNCTUATION: &str = ".!?";

/// Kind of change, in changelog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
  Security,
  Bugfix,
  Change,
  Enhancement,
}

impl EntryType {
  pub const ALL: [EntryType; 4] = [
    EntryType::Security,
    EntryType::Bugfix,
    EntryType::Change,
    EntryType::Enhancement,
  ];

  /// Look up a type by its exact (capitalized) name
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.name() == name)
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Security => "Security",
      Self::Bugfix => "Bugfix",
      Self::Change => "Change",
      Self::Enhancement => "Enhancement",
    }
  }

  /// Short form used in overview tables
  pub fn abbreviation(&self) -> &'static str {
    match self {
      Self::Security => "Sec",
      Self::Bugfix => "Fix",
      Self::Change => "Chg",
      Self::Enhancement => "Enh",
    }
  }

  /// Lower sorts first
  pub fn priority(&self) -> u8 {
    match self {
      Self::Security => 1,
      Self::Bugfix => 2,
      Self::Change => 3,
      Self::Enhancement => 4,
    }
  }

  fn valid_names() -> String {
    Self::ALL.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
  }
}

impl fmt::Display for EntryType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// One validated changelog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub entry_type: EntryType,
  pub title: String,
  pub paragraphs: Vec<String>,
  pub links: Links,
  pub primary_id: String,
  pub primary_url: String,
}

impl Entry {
  /// Parse and validate the full text of a fragment
  pub fn parse(text: &str) -> Result<Self, FragmentError> {
    Draft::parse(text)?.validate()
  }
}

/// A parsed fragment before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Draft {
  entry_type: Option<String>,
  title: String,
  paragraphs: Vec<String>,
  links: Links,
}

impl Draft {
  fn parse(text: &str) -> Result<Self, FragmentError> {
    let mut lines = text.lines();
    let first = lines.next().ok_or(FragmentError::Empty)?;

    let (entry_type, title) = match first.split_once(": ") {
      Some((prefix, title)) => (Some(capitalize(prefix.trim())), title),
      None => (None, first),
    };

    let mut paragraphs = split_paragraphs(lines);
    let links = match paragraphs.pop() {
      Some(list) => Links::parse(&list)?,
      None => Links::default(),
    };

    Ok(Self {
      entry_type,
      title: capitalize(title.trim()),
      paragraphs: paragraphs.iter().map(|p| capitalize(p)).collect(),
      links,
    })
  }

  /// Checks run in a fixed order; the first failure is reported
  fn validate(self) -> Result<Entry, FragmentError> {
    let raw_type = match self.entry_type {
      Some(t) if !t.is_empty() => t,
      _ => return Err(FragmentError::MissingType),
    };

    if self.title.is_empty() {
      return Err(FragmentError::MissingTitle);
    }

    let Some(primary) = self.links.primary.clone() else {
      return Err(FragmentError::MissingPrimaryId);
    };

    if self.title.ends_with(|c| PUNCTUATION.contains(c)) {
      return Err(FragmentError::TrailingPunctuation);
    }

    let Some(entry_type) = EntryType::from_name(&raw_type) else {
      return Err(FragmentError::UnknownType {
        found: raw_type,
        valid: EntryType::valid_names(),
      });
    };

    let length = raw_type.chars().count() + self.title.chars().count() + 1;
    if length > MAX_TITLE_LEN {
      return Err(FragmentError::TitleTooLong { length });
    }

    Ok(Entry {
      entry_type,
      title: self.title,
      paragraphs: self.paragraphs,
      links: self.links,
      primary_id: primary.id,
      primary_url: primary.url,
    })
  }
}

/// Group lines into paragraphs separated by blank lines; lines inside a
/// paragraph are trimmed and joined with single spaces
fn split_paragraphs<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut paragraphs = Vec::new();
  let mut current = String::new();

  for line in lines {
    let line = line.trim();
    if line.is_empty() {
      if !current.is_empty() {
        paragraphs.push(std::mem::take(&mut current));
      }
      continue;
    }

    if !current.is_empty() {
      current.push(' ');
    }
    current.push_str(line);
  }

  if !current.is_empty() {
    paragraphs.push(current);
  }

  paragraphs
}
