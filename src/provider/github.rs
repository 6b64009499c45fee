//! GitHub REST API client for release and tag listings.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{RawRelease, RawTag, ReleaseSource};
use crate::config::GitHubConfig;
use crate::error::{ReleaseRangeError, Result};

const USER_AGENT_VALUE: &str = concat!("release-range/", env!("CARGO_PKG_VERSION"));

/// Bearer token for the GitHub API
///
/// Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token, treating a blank string as no token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Credential(trimmed.to_string()))
        }
    }

    fn bearer(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("Bearer {}", self.0))
            .map_err(|_| ReleaseRangeError::config("token contains invalid header characters"))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// GitHub error payload
#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

/// GitHub API client
///
/// The credential is fixed for the lifetime of a client. Re-authenticating
/// means building a new client with [`GitHubClient::with_credential`] and
/// swapping it in wholesale.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    credential: Option<Credential>,
}

impl GitHubClient {
    /// Creates a client from configuration and an optional credential
    pub fn new(config: &GitHubConfig, credential: Option<Credential>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReleaseRangeError::upstream(format!("failed to create HTTP client: {e}")))?;

        Ok(GitHubClient {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    /// Returns a new client carrying `credential`; `self` is left untouched
    pub fn with_credential(&self, credential: Option<Credential>) -> Self {
        GitHubClient {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
            credential,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        listing: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<T>> {
        let url = format!("{}/repos/{}/{}/{}", self.api_url, owner, repo, listing);
        tracing::debug!(%url, page, per_page, "requesting page");

        let mut request = self
            .http
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)]);
        if let Some(credential) = &self.credential {
            request = request.header(AUTHORIZATION, credential.bearer()?);
        }

        let response = request.send().await?;
        let response = check_status(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ReleaseRangeError::upstream(format!("invalid {} response: {}", listing, e)))
    }
}

impl ReleaseSource for GitHubClient {
    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRelease>> {
        self.get_page(owner, repo, "releases", page, per_page).await
    }

    async fn list_tags(&self, owner: &str, repo: &str, page: u32, per_page: u32) -> Result<Vec<RawTag>> {
        self.get_page(owner, repo, "tags", page, per_page).await
    }
}

/// Maps rate limiting and non-success statuses to errors
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|remaining| remaining.trim() == "0");

    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        let retry_after = retry_after_secs(&response);
        tracing::warn!(retry_after, "GitHub rate limit exceeded");
        return Err(ReleaseRangeError::RateLimited { retry_after });
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubError>(&text)
        .map(|e| e.message)
        .unwrap_or(text);
    Err(ReleaseRangeError::upstream(format!(
        "GitHub API error ({}): {}",
        status, message
    )))
}

/// Seconds until the limit resets, from `retry-after` or `x-ratelimit-reset`
fn retry_after_secs(response: &Response) -> u64 {
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    if let Some(secs) = header("retry-after") {
        return secs;
    }
    header("x-ratelimit-reset")
        .map(|reset| {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            reset.saturating_sub(now)
        })
        .unwrap_or(60)
}
