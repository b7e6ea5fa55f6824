//! Raw-socket HTTP fetch pipeline with bounded redirect following.
//!
//! ### Request
//! - Split the URL with the host/path regular expressions in [`url`].
//! - `http` connects in plaintext on port 80, `https` over TLS on 443,
//!   unless the URL names a port.
//! - Write a literal `GET` with `Host` and `Connection: close`, read until
//!   the server closes.
//!
//! ### Redirects
//! - Any response carrying `Location` is followed with another `GET`.
//! - Max redirects: 5 (configurable).
//! - A URL seen twice in one chain is a cycle and fails immediately.
//!
//! ### Limits
//! - Connect/read timeout: 20s (configurable)
//! - Max response bytes: 5MB (configurable)

pub mod request;
pub mod response;
pub mod transport;
pub mod url;

use bytes::Bytes;
use std::collections::HashSet;
use std::time::{Duration, Instant};

pub use request::compose_get;
pub use response::RawResponse;
pub use transport::Transport;
pub use self::url::{Scheme, Target, UrlError, absolute_link, host_from_link, parse_target, path_from_link};

use go2web_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Optional User-Agent header (default: none)
    pub user_agent: Option<String>,

    /// Maximum response size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Connect and read timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: None, max_bytes: 5 * 1024 * 1024, timeout: Duration::from_millis(20000), max_redirects: 5 }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL of the final response after redirects
    pub final_url: String,
    /// Status code of the final response
    pub status: u16,
    /// Content-Type header of the final response
    pub content_type: Option<String>,
    /// Body of the final response, de-chunked
    pub body: Bytes,
    /// Number of redirects followed
    pub redirects: usize,
    /// Time taken in milliseconds, redirects included
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as text; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Raw-socket HTTP client.
pub struct FetchClient {
    transport: Transport,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Self {
        let transport = Transport::new(config.timeout, config.max_bytes);
        Self { transport, config }
    }

    /// Fetch a URL, following `Location` headers until a response has none.
    pub async fn fetch(&self, url: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let mut current = url.trim().to_string();
        let mut visited = HashSet::from([current.clone()]);
        let mut redirects = 0;

        let response = loop {
            let response = self.fetch_once(&current).await?;

            let Some(location) = response.location().map(str::to_string) else {
                break response;
            };

            let next = absolute_link(&current, &location);

            if !visited.insert(next.clone()) {
                return Err(Error::RedirectCycle(next));
            }

            if redirects == self.config.max_redirects {
                return Err(Error::TooManyRedirects { count: redirects, url: next });
            }

            redirects += 1;
            tracing::debug!("redirect {} ({}): {} -> {}", redirects, response.status, current, next);
            current = next;
        };

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes, status {} {})",
            url,
            current,
            fetch_ms,
            response.body.len(),
            response.status,
            response.reason
        );

        Ok(FetchResponse {
            content_type: response.content_type().map(str::to_string),
            final_url: current,
            status: response.status,
            body: response.body,
            redirects,
            fetch_ms,
        })
    }

    /// One request/response exchange, no redirect handling.
    pub async fn fetch_once(&self, url: &str) -> Result<RawResponse, Error> {
        let target = parse_target(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let request = compose_get(&target, self.config.user_agent.as_deref());

        let raw = self.transport.roundtrip(&target, request.as_bytes()).await?;
        RawResponse::parse(&raw)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
