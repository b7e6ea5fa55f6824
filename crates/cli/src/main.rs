//! go2web entry point.
//!
//! With arguments, runs that single command and exits. Without, reads
//! commands from stdin until `exit` or end of input.
//! Logging goes to stderr so page text on stdout stays clean.

use std::process::ExitCode;

use anyhow::Result;
use go2web_client::Pipeline;
use go2web_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod repl;
#[cfg(test)]
mod test_support;

use commands::{Flow, parse_tokens, run_command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    let pipeline = Pipeline::new(&config)?;
    let mut out = std::io::stdout();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
        tracing::debug!("running one-shot command {:?}", tokens);

        let flow = run_command(&pipeline, parse_tokens(&tokens), &mut out).await?;
        return Ok(if flow == Flow::Failed { ExitCode::FAILURE } else { ExitCode::SUCCESS });
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl::run(&pipeline, stdin, &mut out).await?;

    Ok(ExitCode::SUCCESS)
}
