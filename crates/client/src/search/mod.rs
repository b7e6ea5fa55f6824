//! Search-engine query building and result scraping.
//!
//! The query URL is a template with `{}` standing for the form-encoded term
//! (`https://www.google.com/search?q={}` by default). Results are the anchors
//! whose `href` contains the provider's redirect marker (`/url?q=` for
//! Google's basic HTML results), so scraping is tied to that provider's markup.

use go2web_core::AppConfig;

use crate::extract::{SearchHit, extract_result_links};

/// Sentinel entry reported when a page has no result anchors.
pub const NO_RESULTS: &str = "No search results found.";

/// Form-encode a search term (spaces become `+`).
pub fn encode_term(term: &str) -> String {
    url::form_urlencoded::byte_serialize(term.as_bytes()).collect()
}

/// Query URL for `term` using the configured template.
pub fn search_url(config: &AppConfig, term: &str) -> String {
    config.search_url_for(&encode_term(term))
}

/// Result anchors in `html`, or the single sentinel entry when there are none.
pub fn scrape_results(html: &str, marker: &str) -> Vec<SearchHit> {
    let hits = extract_result_links(html, marker);

    if hits.is_empty() {
        tracing::debug!("no anchors matching {:?} in {} bytes of HTML", marker, html.len());
        return vec![SearchHit { title: NO_RESULTS.to_string(), url: None }];
    }

    hits
}
