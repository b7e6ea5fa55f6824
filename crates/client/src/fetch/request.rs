//! HTTP/1.1 request composition.

use super::url::Target;

/// Compose a literal `GET` request for `target`.
///
/// Only `Host` and `Connection: close` are sent, plus `User-Agent` when one
/// is configured. The server closing the connection marks the end of the
/// response.
pub fn compose_get(target: &Target, user_agent: Option<&str>) -> String {
    let mut request = format!(
        "GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n",
        path = target.path,
        host = target.authority
    );

    if let Some(ua) = user_agent {
        request.push_str(&format!("User-Agent: {ua}\r\n"));
    }

    request.push_str("\r\n");
    request
}
