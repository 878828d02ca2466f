//! Trailing link list of a fragment
//!
//! The last paragraph of a fragment lists the URLs the change refers to.
//! GitHub issue and pull request links are recognised so templates can show
//! short `#123` references; everything else is kept as an "other" link.

use super::FragmentError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Host whose issue and pull request URLs get an ID
pub const ISSUE_HOST: &str = "github.com";

static ISSUE_PATH: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"/.*/.*/issues/(\d+)").expect("issue path pattern is valid"));
static PULL_PATH: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"/.*/.*/pull/(\d+)").expect("pull request path pattern is valid"));

/// What a single link points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
  Issue(String),
  PullRequest(String),
  Other,
}

/// Classify one URL by host and path
pub fn classify(url: &Url) -> LinkKind {
  if url.host_str() != Some(ISSUE_HOST) {
    return LinkKind::Other;
  }

  let path = url.path();
  if let Some(caps) = ISSUE_PATH.captures(path) {
    LinkKind::Issue(caps[1].to_string())
  } else if let Some(caps) = PULL_PATH.captures(path) {
    LinkKind::PullRequest(caps[1].to_string())
  } else {
    LinkKind::Other
  }
}

/// Base for resolving relative tokens such as `owncloud/ios-app#42`
static RELATIVE_BASE: LazyLock<Url> =
  LazyLock::new(|| Url::parse("http://relative.invalid/").expect("relative base is a valid URL"));

/// Parse and classify one token of the link list
///
/// Absolute URLs are classified by host and path. Relative references are
/// accepted and resolved against a placeholder base, so only
/// protocol-relative GitHub links (`//github.com/...`) can still count as
/// issues. A token is rejected only if neither parse succeeds.
pub fn parse_link(token: &str) -> Result<LinkKind, FragmentError> {
  let invalid = |e: url::ParseError| FragmentError::InvalidUrl {
    token: token.to_string(),
    reason: e.to_string(),
  };

  match Url::parse(token) {
    Ok(url) => Ok(classify(&url)),
    Err(url::ParseError::RelativeUrlWithoutBase) => Url::options()
      .base_url(Some(&*RELATIVE_BASE))
      .parse(token)
      .map(|url| classify(&url))
      .map_err(invalid),
    Err(e) => Err(invalid(e)),
  }
}

/// The issue or pull request that identifies an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryRef {
  pub id: String,
  pub url: String,
}

/// All links of one fragment, in their original order and partitioned by kind
///
/// Links keep the text the author wrote. `issues`/`issue_urls` and
/// `prs`/`pr_urls` are parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
  pub urls: Vec<String>,
  pub issues: Vec<String>,
  pub issue_urls: Vec<String>,
  pub prs: Vec<String>,
  pub pr_urls: Vec<String>,
  pub other_urls: Vec<String>,
  /// First issue or pull request in `urls` order
  pub primary: Option<PrimaryRef>,
}

impl Links {
  /// Parse a whitespace-separated list of links
  pub fn parse(list: &str) -> Result<Self, FragmentError> {
    let mut links = Self::default();

    for token in list.split_whitespace() {
      let text = token.to_string();
      let id = match parse_link(token)? {
        LinkKind::Issue(id) => {
          links.issues.push(id.clone());
          links.issue_urls.push(text.clone());
          Some(id)
        }
        LinkKind::PullRequest(id) => {
          links.prs.push(id.clone());
          links.pr_urls.push(text.clone());
          Some(id)
        }
        LinkKind::Other => {
          links.other_urls.push(text.clone());
          None
        }
      };

      if let Some(id) = id
        && links.primary.is_none()
      {
        links.primary = Some(PrimaryRef { id, url: text.clone() });
      }
      links.urls.push(text);
    }

    Ok(links)
  }
}
