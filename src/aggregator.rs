//! Release aggregation
//!
//! Pulls every page of releases from a [`ReleaseSource`], turns each record
//! into a [`Release`], keeps the ones inside the requested version range and
//! orders them newest first.
//!
//! Pagination is strictly sequential: page `n + 1` is only requested after
//! page `n` came back full. Every await is raced against the request's
//! [`CancelToken`], so an abandoned request stops at the next page boundary
//! at the latest and returns [`ReleaseRangeError::Cancelled`] rather than a
//! partial list.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::cancel::CancelToken;
use crate::domain::{normalize, normalize_value, NormalizedVersion, Release};
use crate::error::{ReleaseRangeError, Result};
use crate::filter::filter_by_range;
use crate::provider::{RawRelease, ReleaseSource, MAX_PER_PAGE};

/// Outcome of a release-notes request, with the bookkeeping needed for warnings
#[derive(Debug, Clone)]
pub struct ReleaseReport {
    /// Releases inside the range, newest first
    pub releases: Vec<Release>,
    pub from: NormalizedVersion,
    pub to: NormalizedVersion,
    /// Non-draft releases skipped because their tag is not a version
    pub unparsable: usize,
    /// Set when paging stopped at `max_pages` with a full last page
    pub page_limit_hit: Option<u32>,
}

impl ReleaseReport {
    /// Non-fatal conditions worth telling the user about
    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        let mut warnings = Vec::new();
        if self.from > self.to {
            warnings.push(BoundaryWarning::ReversedRange {
                from: self.from.to_string(),
                to: self.to.to_string(),
            });
        } else if self.releases.is_empty() {
            warnings.push(BoundaryWarning::NoReleasesInRange {
                from: self.from.to_string(),
                to: self.to.to_string(),
            });
        }
        if self.unparsable > 0 {
            warnings.push(BoundaryWarning::UnparsableTags {
                count: self.unparsable,
            });
        }
        if let Some(pages) = self.page_limit_hit {
            warnings.push(BoundaryWarning::PageLimitReached { pages });
        }
        warnings
    }
}

/// Fetches, normalizes, range-filters and sorts releases
///
/// Holds no per-request state. The source (and with it the credential) is
/// replaced wholesale through [`ReleaseAggregator::replace_source`].
#[derive(Debug)]
pub struct ReleaseAggregator<S> {
    source: S,
    per_page: u32,
    max_pages: Option<u32>,
}

impl<S: ReleaseSource> ReleaseAggregator<S> {
    pub fn new(source: S) -> Self {
        ReleaseAggregator {
            source,
            per_page: MAX_PER_PAGE,
            max_pages: None,
        }
    }

    /// Page size requested from the source, clamped to 1..=100
    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Upper bound on pages fetched per listing
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swaps in a new source (e.g. a client with a new credential), returning the old one
    pub fn replace_source(&mut self, source: S) -> S {
        std::mem::replace(&mut self.source, source)
    }

    /// Releases with versions in `[from_tag, to_tag]`, newest first.
    ///
    /// # Errors
    /// * `InvalidRange` - either endpoint is not a version; nothing is fetched
    /// * `UpstreamFetch` / `RateLimited` - a page request failed
    /// * `Cancelled` - `cancel` fired before the last page arrived
    pub async fn get_release_notes(
        &self,
        owner: &str,
        repo: &str,
        from_tag: &str,
        to_tag: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<Release>> {
        let report = self
            .get_release_report(owner, repo, from_tag, to_tag, cancel)
            .await?;
        Ok(report.releases)
    }

    /// Same as [`Self::get_release_notes`] but keeps the range and skip count
    pub async fn get_release_report(
        &self,
        owner: &str,
        repo: &str,
        from_tag: &str,
        to_tag: &str,
        cancel: &CancelToken,
    ) -> Result<ReleaseReport> {
        let from = normalize_endpoint("from", from_tag)?;
        let to = normalize_endpoint("to", to_tag)?;

        let (source, per_page) = (&self.source, self.per_page);
        let (raw, page_limit_hit) = self
            .fetch_all(cancel, move |page| source.list_releases(owner, repo, page, per_page))
            .await?;
        let fetched = raw.len();

        let (releases, unparsable) = into_releases(raw);
        let mut releases = filter_by_range(releases, &from, &to);
        releases.sort_by(|a, b| b.valid_version.cmp(&a.valid_version));

        info!(
            repo = %format!("{}/{}", owner, repo),
            fetched,
            unparsable,
            in_range = releases.len(),
            "collected release notes"
        );

        Ok(ReleaseReport {
            releases,
            from,
            to,
            unparsable,
            page_limit_hit,
        })
    }

    /// Every tag name in the repository, in provider order
    pub async fn available_versions(
        &self,
        owner: &str,
        repo: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<String>> {
        let (source, per_page) = (&self.source, self.per_page);
        let (tags, page_limit_hit) = self
            .fetch_all(cancel, move |page| source.list_tags(owner, repo, page, per_page))
            .await?;
        if let Some(pages) = page_limit_hit {
            warn!(pages, "tag listing truncated at max_pages");
        }
        Ok(tags.into_iter().map(|tag| tag.name).collect())
    }

    /// Fetches pages until a short one, returning the items and, if paging
    /// stopped at `max_pages` instead, the number of pages read
    async fn fetch_all<T, F, Fut>(
        &self,
        cancel: &CancelToken,
        mut fetch_page: F,
    ) -> Result<(Vec<T>, Option<u32>)>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            if cancel.is_cancelled() {
                return Err(ReleaseRangeError::Cancelled);
            }

            let batch = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ReleaseRangeError::Cancelled),
                result = fetch_page(page) => result?,
            };

            let count = batch.len();
            debug!(page, count, "fetched page");
            items.extend(batch);

            if count < self.per_page as usize {
                break;
            }
            if self.max_pages.is_some_and(|max| page >= max) {
                debug!(page, "page limit reached");
                return Ok((items, Some(page)));
            }
            page += 1;
        }

        Ok((items, None))
    }
}

fn normalize_endpoint(which: &str, tag: &str) -> Result<NormalizedVersion> {
    normalize(tag).ok_or_else(|| {
        ReleaseRangeError::invalid_range(format!("'{}' tag '{}' is not a version", which, tag))
    })
}

/// Converts provider records, dropping drafts and tags that are not versions
///
/// A tag that is missing or not a string counts as unparsable like any other.
fn into_releases(raw: Vec<RawRelease>) -> (Vec<Release>, usize) {
    let mut unparsable = 0;
    let mut releases = Vec::with_capacity(raw.len());

    for record in raw {
        if record.draft {
            debug!(tag = %record.tag_name, "skipping draft release");
            continue;
        }
        let Some(valid_version) = normalize_value(&record.tag_name) else {
            debug!(tag = %record.tag_name, "skipping release with unparsable tag");
            unparsable += 1;
            continue;
        };
        releases.push(Release {
            tag_name: record.tag().unwrap_or_default().to_string(),
            html_url: record.html_url,
            name: record.name,
            body: record.body,
            pre_release: record.prerelease,
            published_date: record.published_at,
            valid_version,
        });
    }

    (releases, unparsable)
}
