//! Hosting provider abstraction layer
//!
//! This module provides a trait-based abstraction over the hosting provider's
//! release and tag listings, allowing for the real GitHub API client and an
//! in-memory mock for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [ReleaseSource] trait. Implementations:
//!
//! - [github::GitHubClient]: the GitHub REST API over `reqwest`
//! - [mock::MockSource]: canned pages for tests
//!
//! Both listings are paginated. A page holding fewer than `per_page` items is
//! the last one; callers loop until they see one.

pub mod github;
pub mod mock;

pub use github::{Credential, GitHubClient};
pub use mock::MockSource;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::future::Future;

/// Largest page size the provider accepts
pub const MAX_PER_PAGE: u32 = 100;

/// One release record as the provider returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRelease {
    /// Kept untyped so one malformed record cannot fail the whole page
    #[serde(default)]
    pub tag_name: serde_json::Value,
    #[serde(default)]
    pub html_url: String,
    pub name: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl RawRelease {
    /// Minimal record with just a tag, used by tests and mocks
    pub fn with_tag(tag_name: impl Into<String>) -> Self {
        RawRelease {
            tag_name: serde_json::Value::String(tag_name.into()),
            html_url: String::new(),
            name: None,
            body: None,
            prerelease: false,
            draft: false,
            published_at: None,
        }
    }

    /// The tag name, when the provider sent it as a string
    pub fn tag(&self) -> Option<&str> {
        self.tag_name.as_str()
    }
}

/// One tag record as the provider returns it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTag {
    pub name: String,
}

/// Paginated access to a repository's releases and tags
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync` and return `Send` futures so requests
/// can run on a multi-threaded runtime.
///
/// ## Error Handling
///
/// Failures map to [crate::error::ReleaseRangeError::UpstreamFetch], or
/// [crate::error::ReleaseRangeError::RateLimited] when the provider refuses
/// for rate-limit reasons. Implementations never retry.
pub trait ReleaseSource: Send + Sync {
    /// Fetch one page (1-based) of releases
    fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<RawRelease>>> + Send;

    /// Fetch one page (1-based) of tags
    fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<RawTag>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_release_deserializes_github_shape() {
        let json = r###"{
            "tag_name": "v0.72.0",
            "html_url": "https://github.com/facebook/react-native/releases/tag/v0.72.0",
            "name": "0.72.0",
            "body": "## Changes\n- Stuff",
            "prerelease": false,
            "draft": false,
            "published_at": "2023-06-21T16:09:20Z",
            "assets": []
        }"###;
        let release: RawRelease = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v0.72.0");
        assert_eq!(release.body.as_deref(), Some("## Changes\n- Stuff"));
        assert!(release.published_at.is_some());
    }

    #[test]
    fn test_raw_release_tolerates_nulls() {
        let json = r#"{"tag_name": "v1.0.0", "html_url": "", "name": null, "body": null,
                       "prerelease": true, "published_at": null}"#;
        let release: RawRelease = serde_json::from_str(json).unwrap();
        assert!(release.prerelease);
        assert!(!release.draft);
        assert!(release.name.is_none());
        assert!(release.published_at.is_none());
    }

    #[test]
    fn test_raw_release_accepts_non_string_tag() {
        let records: Vec<RawRelease> =
            serde_json::from_str(r#"[{"tag_name": 42}, {"tag_name": null}, {}]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.tag().is_none()));
        assert_eq!(RawRelease::with_tag("v1.0.0").tag(), Some("v1.0.0"));
    }
}
