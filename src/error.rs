use thiserror::Error;

/// Unified error type for release-range operations
#[derive(Error, Debug)]
pub enum ReleaseRangeError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid version range: {0}")]
    InvalidRange(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Rate limit exceeded, resets in {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-range
pub type Result<T> = std::result::Result<T, ReleaseRangeError>;

impl ReleaseRangeError {
    /// Create an invalid URL error with context
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        ReleaseRangeError::InvalidUrl(msg.into())
    }

    /// Create an invalid range error with context
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        ReleaseRangeError::InvalidRange(msg.into())
    }

    /// Create an upstream fetch error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        ReleaseRangeError::UpstreamFetch(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseRangeError::Config(msg.into())
    }

    /// Whether this error came from the hosting provider (including rate limiting)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ReleaseRangeError::UpstreamFetch(_) | ReleaseRangeError::RateLimited { .. }
        )
    }
}

impl From<reqwest::Error> for ReleaseRangeError {
    fn from(err: reqwest::Error) -> Self {
        ReleaseRangeError::UpstreamFetch(err.to_string())
    }
}

impl From<toml::de::Error> for ReleaseRangeError {
    fn from(err: toml::de::Error) -> Self {
        ReleaseRangeError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseRangeError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseRangeError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: ReleaseRangeError = toml_err.into();
        assert!(matches!(err, ReleaseRangeError::Config(_)));
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ReleaseRangeError::RateLimited { retry_after: 42 };
        assert_eq!(err.to_string(), "Rate limit exceeded, resets in 42s");
    }

    #[test]
    fn test_is_upstream() {
        assert!(ReleaseRangeError::upstream("boom").is_upstream());
        assert!(ReleaseRangeError::RateLimited { retry_after: 1 }.is_upstream());
        assert!(!ReleaseRangeError::invalid_range("v1").is_upstream());
        assert!(!ReleaseRangeError::Cancelled.is_upstream());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseRangeError::invalid_url("x"), "Invalid repository URL"),
            (ReleaseRangeError::invalid_range("x"), "Invalid version range"),
            (ReleaseRangeError::upstream("x"), "Upstream fetch failed"),
            (ReleaseRangeError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
