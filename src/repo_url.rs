use std::fmt;

use url::Url;

use crate::error::{ReleaseRangeError, Result};

/// Owner and repository name extracted from a repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Extracts `{owner, repo}` from the first two non-empty path segments of a URL.
///
/// Any host is accepted and anything after the second segment is ignored, so
/// `https://github.com/facebook/react-native/releases` works as well as the
/// bare repository URL.
///
/// # Example
/// ```
/// use release_range::repo_url::parse_repo_url;
///
/// let repo = parse_repo_url("https://github.com/facebook/react-native/releases").unwrap();
/// assert_eq!(repo.owner, "facebook");
/// assert_eq!(repo.repo, "react-native");
/// ```
pub fn parse_repo_url(input: &str) -> Result<RepoRef> {
    let url = Url::parse(input.trim())
        .map_err(|e| ReleaseRangeError::invalid_url(format!("'{}': {}", input, e)))?;

    let mut segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => Ok(RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => Err(ReleaseRangeError::invalid_url(format!(
            "'{}' must contain an owner and a repository",
            input
        ))),
    }
}
