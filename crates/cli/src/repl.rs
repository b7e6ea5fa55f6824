//! Interactive prompt loop.

use std::io::Write;

use anyhow::Result;
use go2web_client::Pipeline;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::{Flow, parse_line, run_command};

const PROMPT: &str = "Enter a command (type '-h' for a list of available commands): ";

/// Prompt, read a line, run it; stop on `exit` or end of input.
pub async fn run<R, W>(pipeline: &Pipeline, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        if run_command(pipeline, parse_line(&line), out).await? == Flow::Exit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use go2web_core::AppConfig;

    async fn run_script(script: &str) -> String {
        let pipeline = Pipeline::new(&AppConfig::default()).unwrap();
        let mut out = Vec::new();
        run(&pipeline, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_exit_stops_loop() {
        let output = run_script("exit\n-h\n").await;
        assert_eq!(output.matches(PROMPT).count(), 1);
        assert!(!output.contains("Usage:"));
    }

    #[tokio::test]
    async fn test_eof_stops_loop() {
        let output = run_script("-h\n").await;
        assert!(output.contains("Usage: go2web <command> [arguments]"));
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_usage_errors_keep_looping() {
        let output = run_script("-u\n-u a b\n-s\nbogus\n\nexit\n").await;

        assert_eq!(output.matches("Invalid arguments. Usage: -u <URL>").count(), 2);
        assert!(output.contains("Invalid arguments. Usage: -s <search-term>"));
        assert!(output.contains("Invalid command. Type '-h' for a list of available commands."));
        assert!(output.contains("Please enter a command."));
        assert!(!output.contains("Making HTTP request"));
        assert_eq!(output.matches(PROMPT).count(), 6);
    }
}
