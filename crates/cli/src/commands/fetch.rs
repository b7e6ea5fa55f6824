//! `-u <URL>`: fetch a page and print its text.

use std::io::Write;

use anyhow::Result;
use go2web_client::Pipeline;

use super::{Flow, report_error};

pub async fn run<W: Write>(pipeline: &Pipeline, url: &str, out: &mut W) -> Result<Flow> {
    writeln!(out, "Making HTTP request to {url}...\n")?;

    let opened = match pipeline.open(url).await {
        Ok(opened) => opened,
        Err(e) => return report_error(out, &e),
    };

    if opened.cache_hit {
        writeln!(out, "Retrieving response from cache...\n")?;
    }

    writeln!(out, "Response:\n{}", opened.page.text)?;
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use go2web_core::AppConfig;
    use pretty_assertions::assert_eq;
    use crate::test_support::serve_html;

    #[tokio::test]
    async fn test_fetch_prints_text_then_cache_notice() {
        let url = format!("http://{}/", serve_html("<h1>Hello</h1>").await);
        let pipeline = Pipeline::new(&AppConfig::default()).unwrap();

        let mut out = Vec::new();
        assert_eq!(run(&pipeline, &url, &mut out).await.unwrap(), Flow::Continue);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Making HTTP request to {url}...\n\nResponse:\nHello\n")
        );

        let mut out = Vec::new();
        run(&pipeline, &url, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Retrieving response from cache..."));
    }

    #[tokio::test]
    async fn test_fetch_error_is_printed() {
        let pipeline = Pipeline::new(&AppConfig::default()).unwrap();
        let mut out = Vec::new();

        let flow = run(&pipeline, "not-a-url", &mut out).await.unwrap();

        assert_eq!(flow, Flow::Failed);
        assert!(String::from_utf8(out).unwrap().contains("Error: INVALID_URL"));
    }
}
