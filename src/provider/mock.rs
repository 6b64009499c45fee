use std::sync::Mutex;

use crate::error::{ReleaseRangeError, Result};
use crate::provider::{RawRelease, RawTag, ReleaseSource};

/// In-memory release source for testing without network access
///
/// Serves its releases and tags in `per_page` slices and records every page
/// requested so tests can assert on the pagination sequence.
#[derive(Debug, Default)]
pub struct MockSource {
    releases: Vec<RawRelease>,
    tags: Vec<RawTag>,
    fail_on_page: Option<u32>,
    stall_on_page: Option<u32>,
    requests: Mutex<Vec<u32>>,
}

impl MockSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a release record
    pub fn add_release(&mut self, release: RawRelease) {
        self.releases.push(release);
    }

    /// Add a release record carrying only a tag name
    pub fn add_release_tag(&mut self, tag_name: impl Into<String>) {
        self.releases.push(RawRelease::with_tag(tag_name));
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(RawTag { name: name.into() });
    }

    /// Make the given page fail with an upstream error
    pub fn fail_on_page(&mut self, page: u32) {
        self.fail_on_page = Some(page);
    }

    /// Make the given page never complete
    pub fn stall_on_page(&mut self, page: u32) {
        self.stall_on_page = Some(page);
    }

    /// Pages requested so far, in order
    pub fn requested_pages(&self) -> Vec<u32> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn serve<T: Clone>(&self, items: &[T], page: u32, per_page: u32) -> Result<Vec<T>> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(page),
            Err(poisoned) => poisoned.into_inner().push(page),
        }

        if self.fail_on_page == Some(page) {
            return Err(ReleaseRangeError::upstream(format!(
                "mock failure on page {}",
                page
            )));
        }
        if self.stall_on_page == Some(page) {
            std::future::pending::<()>().await;
        }

        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        Ok(items
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }
}

impl ReleaseSource for MockSource {
    async fn list_releases(
        &self,
        _owner: &str,
        _repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRelease>> {
        self.serve(&self.releases, page, per_page).await
    }

    async fn list_tags(&self, _owner: &str, _repo: &str, page: u32, per_page: u32) -> Result<Vec<RawTag>> {
        self.serve(&self.tags, page, per_page).await
    }
}
