//! Unified error types for go2web.
//!
//! Every message starts with a stable code so console output and logs can be
//! grepped without parsing.

use crate::config::ConfigError;

/// Unified error type for the go2web pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid user input (e.g., empty search term).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// URL could not be split into scheme, host and path.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// TCP connection could not be established.
    #[error("CONNECT_FAILED: {0}")]
    ConnectFailed(String),

    /// TLS handshake or certificate setup failed.
    #[error("TLS_ERROR: {0}")]
    Tls(String),

    /// Connect or read did not finish in time.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Response exceeded the configured byte cap.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Malformed response or socket failure mid-exchange.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Redirect chain longer than the configured limit.
    #[error("TOO_MANY_REDIRECTS: gave up after {count} redirects at {url}")]
    TooManyRedirects { count: usize, url: String },

    /// Redirect chain revisited a URL.
    #[error("REDIRECT_CYCLE: {0} was already visited")]
    RedirectCycle(String),

    /// Body announced as JSON did not parse.
    #[error("INVALID_JSON: {0}")]
    InvalidJson(String),

    /// Configuration could not be loaded or failed validation.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Stable code prefix for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::ConnectFailed(_) => "CONNECT_FAILED",
            Error::Tls(_) => "TLS_ERROR",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::TooManyRedirects { .. } => "TOO_MANY_REDIRECTS",
            Error::RedirectCycle(_) => "REDIRECT_CYCLE",
            Error::InvalidJson(_) => "INVALID_JSON",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}
