//! Content-Type driven body transformation.

use go2web_core::Error;
use regex::Regex;
use std::sync::LazyLock;

/// Anything tag-shaped, shortest match, single line.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("invalid tag regex"));

/// Body handling chosen from a `Content-Type` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Plain,
    Html,
    Json,
    Other,
}

impl ContentKind {
    /// Classify by substring, checked in order plain, html, json.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(ct) = content_type else {
            return ContentKind::Other;
        };
        let ct = ct.to_ascii_lowercase();

        if ct.contains("text/plain") {
            ContentKind::Plain
        } else if ct.contains("text/html") {
            ContentKind::Html
        } else if ct.contains("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Other
        }
    }
}

/// Transform `body` according to its content type.
///
/// JSON that fails to parse is an error; everything else succeeds.
pub fn negotiate(body: &str, content_type: Option<&str>) -> Result<String, Error> {
    match ContentKind::from_content_type(content_type) {
        ContentKind::Plain | ContentKind::Other => Ok(body.to_string()),
        ContentKind::Html => Ok(strip_tags(body)),
        ContentKind::Json => pretty_json(body),
    }
}

/// Remove every `<...>` on a single line. Comments, scripts and broken markup
/// are not special-cased.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

fn pretty_json(body: &str) -> Result<String, Error> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| Error::InvalidJson(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| Error::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_kind() {
        assert_eq!(ContentKind::from_content_type(Some("text/plain; charset=utf-8")), ContentKind::Plain);
        assert_eq!(ContentKind::from_content_type(Some("text/html")), ContentKind::Html);
        assert_eq!(ContentKind::from_content_type(Some("Text/HTML; charset=UTF-8")), ContentKind::Html);
        assert_eq!(ContentKind::from_content_type(Some("application/json")), ContentKind::Json);
        assert_eq!(ContentKind::from_content_type(Some("image/png")), ContentKind::Other);
        assert_eq!(ContentKind::from_content_type(None), ContentKind::Other);
    }

    #[test]
    fn test_plain_passthrough() {
        let body = "<b>not stripped</b>";
        assert_eq!(negotiate(body, Some("text/plain")).unwrap(), body);
    }

    #[test]
    fn test_unknown_passthrough() {
        let body = "<b>not stripped</b>";
        assert_eq!(negotiate(body, None).unwrap(), body);
        assert_eq!(negotiate(body, Some("application/octet-stream")).unwrap(), body);
    }

    #[test]
    fn test_html_strips_tags() {
        let body = "<html><body><h1>Title</h1><p class=\"x\">Text</p></body></html>";
        assert_eq!(negotiate(body, Some("text/html")).unwrap(), "TitleText");
    }

    #[test]
    fn test_html_keeps_script_text() {
        let body = "<script>var a = 1;</script><p>b</p>";
        assert_eq!(negotiate(body, Some("text/html")).unwrap(), "var a = 1;b");
    }

    #[test]
    fn test_html_multiline_tag_survives() {
        let body = "<a\nhref=\"x\">link</a>";
        assert_eq!(negotiate(body, Some("text/html")).unwrap(), "<a\nhref=\"x\">link");
    }

    #[test]
    fn test_json_pretty_printed() {
        assert_eq!(negotiate(r#"{"a":1}"#, Some("application/json")).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_json_array_pretty_printed() {
        assert_eq!(negotiate("[1,2]", Some("application/json; charset=utf-8")).unwrap(), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_json_invalid() {
        let result = negotiate("not json", Some("application/json"));
        assert!(matches!(result, Err(Error::InvalidJson(_))));
    }
}
