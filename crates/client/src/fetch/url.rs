//! URL splitting and redirect target resolution.
//!
//! URLs are taken apart with two anchored regular expressions rather than a
//! full URL parser: the request line needs the path exactly as the user typed
//! it, and cache keys are the raw input string.

use regex::Regex;
use std::sync::LazyLock;

static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:https?)://([^/?#]+)").expect("invalid host regex"));

static PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:https?)://[^/?#]+([/?][^#]*)?").expect("invalid path regex"));

/// Error type for URL splitting failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Transport selected by URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plaintext TCP.
    Http,
    /// TLS over TCP.
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Connection target derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    /// Authority as written in the URL, sent as the `Host` header.
    pub authority: String,
    /// Host name or address to connect to (IPv6 without brackets).
    pub hostname: String,
    pub port: u16,
    /// Request path including the query string.
    pub path: String,
}

/// Host (authority) of an `http(s)://` URL, `None` when the URL does not match.
pub fn host_from_link(link: &str) -> Option<String> {
    HOST_RE
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path and query of an `http(s)://` URL, `/` when there is none.
///
/// The fragment is dropped since it never goes on the wire.
pub fn path_from_link(link: &str) -> String {
    let path = PATH_RE
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("/");

    if path.starts_with('?') { format!("/{path}") } else { path.to_string() }
}

/// Scheme of `link`; anything that is not `https://` is treated as plain http.
fn scheme_of(link: &str) -> Scheme {
    if link.trim().to_ascii_lowercase().starts_with("https://") { Scheme::Https } else { Scheme::Http }
}

fn is_absolute(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a `Location` header value against the URL that produced it.
///
/// - absolute `http(s)://` locations pass through unchanged
/// - `//host/path` takes the base scheme
/// - `/path` is re-anchored to the base host
/// - `?query` replaces the query of the base path
/// - anything else is joined to the directory of the base path
pub fn absolute_link(base: &str, location: &str) -> String {
    let location = location.trim();

    if is_absolute(location) {
        return location.to_string();
    }

    let scheme = scheme_of(base).as_str();

    if let Some(rest) = location.strip_prefix("//") {
        return format!("{scheme}://{rest}");
    }

    let host = host_from_link(base).unwrap_or_default();

    if location.starts_with('/') {
        return format!("{scheme}://{host}{location}");
    }

    let base_path = path_from_link(base);
    let base_path = base_path.split('?').next().unwrap_or("/");

    if location.starts_with('?') {
        return format!("{scheme}://{host}{base_path}{location}");
    }

    let dir = &base_path[..base_path.rfind('/').unwrap_or(0)];
    format!("{scheme}://{host}{dir}/{location}")
}

/// Split a URL into the pieces needed to open a connection and write a request.
pub fn parse_target(link: &str) -> Result<Target, UrlError> {
    let trimmed = link.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let Some(authority) = host_from_link(trimmed) else {
        return match trimmed.split_once("://") {
            Some((scheme, _)) if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") => {
                Err(UrlError::UnsupportedScheme(scheme.to_string()))
            }
            _ => Err(UrlError::InvalidUrl(trimmed.to_string())),
        };
    };

    let scheme = scheme_of(trimmed);
    let (hostname, port) = split_authority(&authority, scheme.default_port())?;

    Ok(Target { scheme, authority, hostname, port, path: path_from_link(trimmed) })
}

/// Split `host[:port]` (or `[v6][:port]`) into host name and port.
fn split_authority(authority: &str, default_port: u16) -> Result<(String, u16), UrlError> {
    let bad = || UrlError::InvalidUrl(format!("bad authority: {authority}"));

    let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
        let (host, after) = rest.split_once(']').ok_or_else(bad)?;
        match after.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None if after.is_empty() => (host, None),
            None => return Err(bad()),
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    if host.is_empty() {
        return Err(bad());
    }

    let port = match port {
        Some(p) => p.parse::<u16>().map_err(|_| bad())?,
        None => default_port,
    };

    Ok((host.to_string(), port))
}
