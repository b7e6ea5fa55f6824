//! Raw HTTP/1.x response parsing.
//!
//! The whole response has already been read off the socket; this splits the
//! head from the body, reads the status line and headers, and undoes chunked
//! transfer encoding.

use bytes::Bytes;
use go2web_core::Error;

/// A response split into status, headers and body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    /// Header lines in arrival order, names as sent.
    pub headers: Vec<(String, String)>,
    /// Body with any chunked encoding removed.
    pub body: Bytes,
}

impl RawResponse {
    /// Parse the complete bytes of a response.
    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        if raw.is_empty() {
            return Err(Error::HttpError("empty response".into()));
        }

        let (head, body) = split_head(raw);
        let head = String::from_utf8_lossy(head);
        let mut lines = head.lines();

        let status_line = lines.next().unwrap_or_default();
        let (status, reason) = parse_status_line(status_line)?;

        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();

        let mut response = Self { status, reason, headers, body: Bytes::copy_from_slice(body) };

        if response
            .header("Transfer-Encoding")
            .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"))
        {
            response.body = Bytes::from(decode_chunked(body)?);
        }

        Ok(response)
    }

    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    pub fn location(&self) -> Option<&str> {
        self.header("Location").filter(|l| !l.is_empty())
    }

    /// Body decoded as text; invalid UTF-8 is replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Split at the first blank line. A response with no blank line is all head.
fn split_head(raw: &[u8]) -> (&[u8], &[u8]) {
    if let Some(pos) = find(raw, b"\r\n\r\n") {
        (&raw[..pos], &raw[pos + 4..])
    } else if let Some(pos) = find(raw, b"\n\n") {
        (&raw[..pos], &raw[pos + 2..])
    } else {
        (raw, &raw[raw.len()..])
    }
}

fn parse_status_line(line: &str) -> Result<(u16, String), Error> {
    let malformed = || Error::HttpError(format!("malformed status line: {line:?}"));

    let (version, rest) = line.trim().split_once(char::is_whitespace).ok_or_else(malformed)?;
    if !version.starts_with("HTTP/") {
        return Err(malformed());
    }

    let rest = rest.trim_start();
    let (code, reason) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let status = code.parse::<u16>().map_err(|_| malformed())?;

    Ok((status, reason.trim().to_string()))
}

/// Remove chunked transfer encoding. Trailers after the last chunk are ignored.
fn decode_chunked(mut rest: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(rest.len());

    loop {
        let line_end = find(rest, b"\r\n").ok_or_else(|| Error::HttpError("truncated chunk header".into()))?;
        let size_line = String::from_utf8_lossy(&rest[..line_end]);
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| Error::HttpError(format!("bad chunk size: {size_hex:?}")))?;
        rest = &rest[line_end + 2..];

        if size == 0 {
            break;
        }

        if rest.len() < size {
            return Err(Error::HttpError("truncated chunk body".into()));
        }

        out.extend_from_slice(&rest[..size]);
        rest = &rest[size..];
        rest = rest.strip_prefix(b"\r\n").unwrap_or(rest);
    }

    Ok(out)
}
