//! Client code for go2web.
//!
//! This crate provides the raw-socket HTTP fetch pipeline, content
//! negotiation and text reduction, search result scraping, and the cached
//! [`Pipeline`] the CLI drives.

pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod search;

#[cfg(test)]
mod test_support;

pub use extract::{ContentKind, SearchHit, extract_result_links, negotiate, process_body, reduce_to_text};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, absolute_link, host_from_link, path_from_link};

pub use pipeline::{Opened, Pipeline};

pub use search::{NO_RESULTS, scrape_results, search_url};
