//! Body processing: content negotiation, text reduction, result links.
//!
//! ### Negotiation
//! - `text/plain` and unknown types pass through.
//! - `text/html` has tag-shaped substrings stripped.
//! - `application/json` is re-serialized with indentation.
//!
//! ### Reduction
//! - The negotiated text is always parsed as an HTML document and its visible
//!   text extracted, whatever the content type was.

pub mod links;
pub mod negotiate;
pub mod reduce;

pub use links::{SearchHit, extract_result_links};
pub use negotiate::{ContentKind, negotiate};
pub use reduce::reduce_to_text;

use go2web_core::Error;

/// Negotiate then reduce a response body to the text shown to the user.
pub fn process_body(body: &str, content_type: Option<&str>) -> Result<String, Error> {
    let negotiated = negotiate(body, content_type)?;
    Ok(reduce_to_text(&negotiated))
}
