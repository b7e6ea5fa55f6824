//! Command parsing and dispatch.
//!
//! The first token picks the command; `-u` and `-s` take exactly one
//! argument. Argument-count mistakes print a usage line and never touch the
//! network.

mod fetch;
mod help;
mod search;

use std::io::Write;

use anyhow::Result;
use go2web_client::Pipeline;

pub const FETCH_USAGE: &str = "Invalid arguments. Usage: -u <URL>";
pub const SEARCH_USAGE: &str = "Invalid arguments. Usage: -s <search-term>";
pub const INVALID_COMMAND: &str = "Invalid command. Type '-h' for a list of available commands.";
pub const EMPTY_COMMAND: &str = "Please enter a command.";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Fetch(String),
    Search(String),
    /// Known command with the wrong number of arguments.
    Usage(&'static str),
    Empty,
    Invalid(String),
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The command was rejected or its request failed.
    Failed,
    Exit,
}

/// Parse one line of console input.
pub fn parse_line(line: &str) -> Command {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    parse_tokens(&tokens)
}

/// Parse pre-split tokens (console words or process arguments).
pub fn parse_tokens(tokens: &[&str]) -> Command {
    let Some((first, rest)) = tokens.split_first() else {
        return Command::Empty;
    };

    match (*first, rest) {
        ("exit", _) => Command::Exit,
        ("-h" | "help", _) => Command::Help,
        ("-u", [url]) => Command::Fetch(url.to_string()),
        ("-u", _) => Command::Usage(FETCH_USAGE),
        ("-s", [term]) => Command::Search(term.to_string()),
        ("-s", _) => Command::Usage(SEARCH_USAGE),
        (other, _) => Command::Invalid(other.to_string()),
    }
}

/// Run `command`, writing everything the user sees to `out`.
///
/// Request failures are printed and reported as [`Flow::Failed`]; only
/// output errors are returned.
pub async fn run_command<W: Write>(pipeline: &Pipeline, command: Command, out: &mut W) -> Result<Flow> {
    let flow = match command {
        Command::Exit => Flow::Exit,
        Command::Help => {
            help::print(out)?;
            Flow::Continue
        }
        Command::Fetch(url) => fetch::run(pipeline, &url, out).await?,
        Command::Search(term) => search::run(pipeline, &term, out).await?,
        Command::Usage(usage) => {
            writeln!(out, "{usage}")?;
            Flow::Failed
        }
        Command::Empty => {
            writeln!(out, "{EMPTY_COMMAND}")?;
            Flow::Failed
        }
        Command::Invalid(name) => {
            tracing::debug!("unknown command {:?}", name);
            writeln!(out, "{INVALID_COMMAND}")?;
            Flow::Failed
        }
    };

    Ok(flow)
}

/// Print a request failure the way every command does.
fn report_error<W: Write>(out: &mut W, err: &go2web_core::Error) -> Result<Flow> {
    tracing::warn!(code = err.code(), "request failed: {}", err);
    writeln!(out, "Error: {err}")?;
    Ok(Flow::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use go2web_core::AppConfig;

    #[test]
    fn test_parse_exit_and_help() {
        assert_eq!(parse_line("exit"), Command::Exit);
        assert_eq!(parse_line("exit now"), Command::Exit);
        assert_eq!(parse_line("-h"), Command::Help);
        assert_eq!(parse_line("help"), Command::Help);
    }

    #[test]
    fn test_parse_fetch() {
        assert_eq!(parse_line("-u http://example.com"), Command::Fetch("http://example.com".into()));
        assert_eq!(parse_line("  -u   http://example.com  "), Command::Fetch("http://example.com".into()));
    }

    #[test]
    fn test_parse_fetch_wrong_arity() {
        assert_eq!(parse_line("-u"), Command::Usage(FETCH_USAGE));
        assert_eq!(parse_line("-u http://a.com http://b.com"), Command::Usage(FETCH_USAGE));
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(parse_line("-s rust"), Command::Search("rust".into()));
        assert_eq!(parse_line("-s"), Command::Usage(SEARCH_USAGE));
        assert_eq!(parse_line("-s rust lang"), Command::Usage(SEARCH_USAGE));
    }

    #[test]
    fn test_parse_tokens_keeps_quoted_argument() {
        assert_eq!(parse_tokens(&["-s", "rust lang"]), Command::Search("rust lang".into()));
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert_eq!(parse_line(""), Command::Empty);
        assert_eq!(parse_line("   "), Command::Empty);
        assert_eq!(parse_line("fetch http://example.com"), Command::Invalid("fetch".into()));
    }

    #[tokio::test]
    async fn test_run_usage_does_no_io() {
        let pipeline = Pipeline::new(&AppConfig::default()).unwrap();
        let mut out = Vec::new();

        let flow = run_command(&pipeline, parse_line("-u"), &mut out).await.unwrap();

        assert_eq!(flow, Flow::Failed);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{FETCH_USAGE}\n"));
        assert!(pipeline.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_run_exit() {
        let pipeline = Pipeline::new(&AppConfig::default()).unwrap();
        let mut out = Vec::new();

        let flow = run_command(&pipeline, Command::Exit, &mut out).await.unwrap();

        assert_eq!(flow, Flow::Exit);
        assert!(out.is_empty());
    }
}
