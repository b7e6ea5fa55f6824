//! Usage text.

use std::io::Write;

pub fn print<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Usage: go2web <command> [arguments]")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  -u <URL>\t\tMake an HTTP request to the specified URL and print the response.")?;
    writeln!(out, "  -s <search-term>\tSearch for the specified term and print the top 10 results.")?;
    writeln!(out, "  -h\t\t\tShow help instructions.")?;
    writeln!(out, "  exit\t\t\tQuit.")
}
