use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::FilterState;
use crate::error::Result;
use crate::provider::MAX_PER_PAGE;

/// Config file name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-range.toml";

/// Environment variable consulted for a GitHub token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Represents the complete configuration for release-range.
///
/// Contains API connection settings, default filter toggles and endpoint selection options.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub filters: FilterState,

    #[serde(default)]
    pub selection: SelectionConfig,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for the GitHub API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop after this many pages even if the last one was full
    #[serde(default)]
    pub max_pages: Option<u32>,

    #[serde(default)]
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            max_pages: None,
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Page size clamped to what the API accepts (1..=100)
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

fn default_hide_patterns() -> Vec<String> {
    vec!["preview".to_string(), "alpha".to_string()]
}

/// Options for the list of tags offered as range endpoints.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Tags containing any of these (case-insensitive) are never offered
    #[serde(default = "default_hide_patterns")]
    pub hide_patterns: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            hide_patterns: default_hide_patterns(),
        }
    }
}

impl Config {
    /// Resolves the token to authenticate with.
    ///
    /// Precedence: explicit value (e.g. `--token`), then `GITHUB_TOKEN`, then the config file.
    /// Blank values count as absent.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        explicit
            .and_then(non_blank)
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok().as_deref().and_then(non_blank))
            .or_else(|| self.github.token.as_deref().and_then(non_blank))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-range.toml` in current directory
/// 3. `release-range.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!("loaded configuration file");
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
