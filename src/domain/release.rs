use crate::domain::version::{normalize, NormalizedVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A release whose tag normalized to a valid version
///
/// Built once from provider data and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub tag_name: String,
    pub html_url: String,
    pub name: Option<String>,
    /// Markdown release notes, exactly as the provider returned them
    pub body: Option<String>,
    pub pre_release: bool,
    pub published_date: Option<DateTime<Utc>>,
    pub valid_version: NormalizedVersion,
}

impl Release {
    /// Builds a release from a tag plus metadata, or `None` if the tag is not a version
    pub fn new(
        tag_name: impl Into<String>,
        html_url: impl Into<String>,
        name: Option<String>,
        body: Option<String>,
        pre_release: bool,
        published_date: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        let tag_name = tag_name.into();
        let valid_version = normalize(&tag_name)?;
        Some(Release {
            tag_name,
            html_url: html_url.into(),
            name,
            body,
            pre_release,
            published_date,
            valid_version,
        })
    }

    /// Release notes body, empty when the provider sent none
    pub fn notes(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Inclusion toggles for secondary filtering
///
/// Passed by value into each filtering call; nothing in the core holds on to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterState {
    #[serde(default = "default_true")]
    pub include_major: bool,
    #[serde(default = "default_true")]
    pub include_minor: bool,
    #[serde(default = "default_true")]
    pub include_patch: bool,
    #[serde(default = "default_true")]
    pub include_beta: bool,
    #[serde(default = "default_true")]
    pub include_rc: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            include_major: true,
            include_minor: true,
            include_patch: true,
            include_beta: true,
            include_rc: true,
        }
    }
}

/// The raw endpoint tags the user picked; never hidden by attribute filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedRange {
    pub from: String,
    pub to: String,
}

impl PinnedRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        PinnedRange {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether `tag_name` is exactly one of the endpoint tags
    pub fn pins(&self, tag_name: &str) -> bool {
        tag_name == self.from || tag_name == self.to
    }
}
