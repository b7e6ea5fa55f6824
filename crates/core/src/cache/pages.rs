//! Page cache storage and lookup.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A fetched and processed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL as requested by the user; also the cache key.
    pub url: String,
    /// URL of the last response after following redirects.
    pub final_url: String,
    /// Status code of the last response.
    pub status: u16,
    /// Content-Type header of the last response.
    pub content_type: Option<String>,
    /// Reduced visible text.
    pub text: String,
    /// Response body before negotiation, kept for result scraping.
    pub raw_body: String,
}

/// Cached page with insertion timestamp.
struct CachedPage {
    page: Page,
    stored_at: Instant,
}

impl CachedPage {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Bounded LRU cache of processed pages.
pub struct PageCache {
    entries: Mutex<LruCache<String, CachedPage>>,
    ttl: Duration,
}

impl PageCache {
    /// Create a cache holding at most `capacity` pages for `ttl` each.
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self { entries: Mutex::new(LruCache::new(capacity)), ttl }
    }

    /// Look up a page by exact URL.
    ///
    /// Expired entries are removed and reported as a miss.
    pub async fn get(&self, url: &str) -> Option<Page> {
        let mut entries = self.entries.lock().await;

        let expired = match entries.get(url) {
            Some(cached) if !cached.is_expired(self.ttl) => {
                tracing::debug!("page cache hit for {}", url);
                return Some(cached.page.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            tracing::debug!("page cache entry for {} expired", url);
            entries.pop(url);
        }

        None
    }

    /// Store a page under `url`, evicting the least recently used entry when full.
    pub async fn put(&self, url: &str, page: Page) {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(url.to_string(), CachedPage { page, stored_at: Instant::now() })
            && evicted != url
        {
            tracing::debug!("page cache evicted {}", evicted);
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
