pub mod aggregator;
pub mod boundary;
pub mod cancel;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod provider;
pub mod repo_url;
pub mod ui;

pub use error::{ReleaseRangeError, Result};
