//! `-s <term>`: search and print numbered results.

use std::io::Write;

use anyhow::Result;
use go2web_client::Pipeline;

use super::{Flow, report_error};

pub async fn run<W: Write>(pipeline: &Pipeline, term: &str, out: &mut W) -> Result<Flow> {
    writeln!(out, "Searching for '{term}'...\n")?;

    let hits = match pipeline.search(term).await {
        Ok(hits) => hits,
        Err(e) => return report_error(out, &e),
    };

    let max = pipeline.config().max_results;
    writeln!(out, "Top {max} search results:\n")?;

    for (i, hit) in hits.iter().take(max).enumerate() {
        writeln!(out, "{}. {}", i + 1, hit.title)?;
        if let Some(url) = &hit.url {
            writeln!(out, "   {url}")?;
        }
    }

    Ok(Flow::Continue)
}
