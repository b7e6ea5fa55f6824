//! HTML to visible text.

use scraper::{ElementRef, Html};

/// Elements whose contents never render as text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse `html` as a document and return its visible text, trimmed.
///
/// Text nodes are concatenated in document order without separators.
/// Entities are decoded by the parser.
pub fn reduce_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    collect_visible(document.root_element(), &mut text);
    text.trim().to_string()
}

fn collect_visible(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child)
            && !HIDDEN_ELEMENTS.contains(&child_element.value().name())
        {
            collect_visible(child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reduce_document() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head><title>Example Domain</title></head>
            <body>
                <h1>Example</h1>
                <p>More information...</p>
            </body>
            </html>
        "#;

        let text = reduce_to_text(html);
        assert!(text.starts_with("Example Domain"));
        assert!(text.contains("Example"));
        assert!(text.ends_with("More information..."));
    }

    #[test]
    fn test_reduce_decodes_entities() {
        assert_eq!(reduce_to_text("<p>Tom &amp; Jerry &lt;3 &quot;cheese&quot; &#169;</p>"), "Tom & Jerry <3 \"cheese\" ©");
    }

    #[test]
    fn test_reduce_skips_script_and_style() {
        let html = "<html><head><style>p { color: red }</style></head>\
                    <body><script>alert(1)</script><p>shown</p><noscript>hidden</noscript></body></html>";
        assert_eq!(reduce_to_text(html), "shown");
    }

    #[test]
    fn test_reduce_plain_text() {
        assert_eq!(reduce_to_text("  just text \n"), "just text");
    }

    #[test]
    fn test_reduce_keeps_inner_whitespace() {
        assert_eq!(reduce_to_text("{\n  \"a\": 1\n}"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_reduce_empty() {
        assert_eq!(reduce_to_text(""), "");
    }
}
