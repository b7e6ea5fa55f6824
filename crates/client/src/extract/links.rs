//! Search result harvesting from HTML documents.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// A harvested search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Anchor text, whitespace collapsed
    pub title: String,
    /// Target URL from the `q` query parameter, when the href carries one
    pub url: Option<String>,
}

/// Extract anchors whose `href` contains `marker`.
///
/// Anchors without text are skipped and duplicates (by href) are dropped,
/// keeping the first.
pub fn extract_result_links(html: &str, marker: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("invalid selector");

    let mut seen = HashSet::new();
    let mut hits = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) if h.contains(marker) => h,
            _ => continue,
        };

        let title = element.text().collect::<Vec<_>>().join(" ");
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            continue;
        }

        if !seen.insert(href.to_string()) {
            continue;
        }

        hits.push(SearchHit { title, url: target_from_href(href) });
    }

    hits
}

/// Decode the `q` parameter of a redirect-style result href.
fn target_from_href(href: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
