//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GO2WEB_*)
//! 2. TOML config file (if GO2WEB_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Placeholder replaced by the encoded search term in `search_url`.
pub const SEARCH_TERM_PLACEHOLDER: &str = "{}";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GO2WEB_*)
/// 2. TOML config file (if GO2WEB_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional User-Agent header. When unset, requests carry only `Host`
    /// and `Connection: close`.
    ///
    /// Set via GO2WEB_USER_AGENT environment variable.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Maximum bytes read per response.
    ///
    /// Set via GO2WEB_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Connect and read timeout in milliseconds.
    ///
    /// Set via GO2WEB_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of `Location` hops per request.
    ///
    /// Set via GO2WEB_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Number of pages kept in the cache before the least recently used is evicted.
    ///
    /// Set via GO2WEB_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Age in seconds after which a cached page is refetched.
    ///
    /// Set via GO2WEB_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Search query template; `{}` is replaced by the encoded term.
    ///
    /// Set via GO2WEB_SEARCH_URL environment variable.
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Substring an anchor `href` must contain to count as a search result.
    ///
    /// Set via GO2WEB_SEARCH_MARKER environment variable.
    #[serde(default = "default_search_marker")]
    pub search_marker: String,

    /// Number of search results printed.
    ///
    /// Set via GO2WEB_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_cache_capacity() -> usize {
    128
}

fn default_cache_ttl_secs() -> u64 {
    3_600
}

fn default_search_url() -> String {
    "https://www.google.com/search?q={}".into()
}

fn default_search_marker() -> String {
    "/url?q=".into()
}

fn default_max_results() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
            search_url: default_search_url(),
            search_marker: default_search_marker(),
            max_results: default_max_results(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GO2WEB_`
    /// 2. TOML file from `GO2WEB_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GO2WEB_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GO2WEB_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Build the search URL for an already percent-encoded term.
    pub fn search_url_for(&self, encoded_term: &str) -> String {
        self.search_url.replacen(SEARCH_TERM_PLACEHOLDER, encoded_term, 1)
    }
}
