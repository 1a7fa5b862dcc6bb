//! Terminal styling and JSON serialization for CLI output.

use std::{path::PathBuf, process::ExitCode};

use serde::Serialize;

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Indents every line of `content` by three spaces.
pub fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON output for `select --json`.
#[derive(Serialize)]
struct JsonSelection<'a> {
    /// The query text as typed.
    query: &'a str,
    /// Number of matching tracks.
    total: usize,
    /// Resolved track paths in result order.
    paths: &'a [PathBuf],
}

/// Prints selected paths as pretty JSON.
pub fn print_json_selection(query: &str, paths: &[PathBuf]) -> ExitCode {
    let selection = JsonSelection {
        query,
        total: paths.len(),
        paths,
    };
    match serde_json::to_string_pretty(&selection) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_prefixes_each_line() {
        assert_eq!(indent("a\nb"), "   a\n   b");
    }

    #[test]
    fn styles_wrap_text() {
        assert_eq!(dim("x"), "\x1b[2mx\x1b[0m");
        assert!(header("Library").contains("Library"));
        assert!(warning("w").starts_with("\x1b[33m"));
    }
}
