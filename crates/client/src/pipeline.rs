//! Cached fetch → negotiate → reduce pipeline.
//!
//! Every page request checks the cache by exact URL first. On a miss the URL
//! is fetched (redirects included), the body negotiated and reduced, and the
//! resulting [`Page`] stored. The raw body travels with the page so result
//! scraping never depends on a previously fetched document.

use std::num::NonZeroUsize;

use go2web_core::{AppConfig, ConfigError, Error, Page, PageCache};

use crate::extract::{SearchHit, process_body};
use crate::fetch::{FetchClient, FetchConfig};
use crate::search::{scrape_results, search_url};

/// A page and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct Opened {
    pub page: Page,
    pub cache_hit: bool,
}

/// Fetch client plus page cache.
pub struct Pipeline {
    fetcher: FetchClient,
    cache: PageCache,
    config: AppConfig,
}

impl Pipeline {
    /// Build the pipeline from validated configuration.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let capacity = NonZeroUsize::new(config.cache_capacity).ok_or_else(|| ConfigError::Invalid {
            field: "cache_capacity".into(),
            reason: "must be greater than 0".into(),
        })?;

        Ok(Self {
            fetcher: FetchClient::new(FetchConfig::from(config)),
            cache: PageCache::new(capacity, config.cache_ttl()),
            config: config.clone(),
        })
    }

    /// Fetch `url` and reduce it to text, serving repeats from the cache.
    ///
    /// Failed fetches are not cached.
    pub async fn open(&self, url: &str) -> Result<Opened, Error> {
        if let Some(page) = self.cache.get(url).await {
            return Ok(Opened { page, cache_hit: true });
        }

        let response = self.fetcher.fetch(url).await?;
        tracing::debug!(
            "opened {} after {} redirect(s) in {}ms",
            response.final_url,
            response.redirects,
            response.fetch_ms
        );
        let raw_body = response.body_text();
        let text = process_body(&raw_body, response.content_type.as_deref())?;

        let page = Page {
            url: url.to_string(),
            final_url: response.final_url,
            status: response.status,
            content_type: response.content_type,
            text,
            raw_body,
        };

        self.cache.put(url, page.clone()).await;

        Ok(Opened { page, cache_hit: false })
    }

    /// Search for `term` and scrape result anchors from the returned HTML.
    ///
    /// Returns the single "no results" entry when nothing matches.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchHit>, Error> {
        let term = term.trim();
        if term.is_empty() {
            return Err(Error::InvalidInput("search term cannot be empty".into()));
        }

        let url = search_url(&self.config, term);
        tracing::debug!("searching {:?} via {}", term, url);

        let opened = self.open(&url).await?;
        Ok(scrape_results(&opened.page.raw_body, &self.config.search_marker))
    }

    /// Get reference to the page cache.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
