//! Implementation of `cantrip complete`.
//!
//! Prints one candidate per line for a partially typed command line. Shell
//! completion scripts call this with the words after `cantrip`.

use std::process::ExitCode;

use cantrip_ql::completions;
use clap::CommandFactory;

use crate::cli::{
    args::{Cli, CompleteCommand},
    context::CommandContext,
};

/// Subcommands whose arguments are a query.
const QUERY_COMMANDS: [&str; 2] = ["play", "select"];

/// Prints completions for the words typed so far.
pub fn run(ctx: &mut CommandContext, cmd: &CompleteCommand) -> ExitCode {
    let words = &cmd.words;
    let candidates = match words.as_slice() {
        [] => subcommands(""),
        [.., last] if last.starts_with('-') => long_options(words, last),
        [first, rest @ ..] if QUERY_COMMANDS.contains(&first.as_str()) => {
            let partial = query_text(rest);
            let library = match ctx.library() {
                Ok(library) => library,
                Err(code) => return code,
            };
            match completions(&*library, &partial) {
                Ok(values) => values,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        [only] => subcommands(only),
        _ => Vec::new(),
    };

    for candidate in candidates {
        println!("{candidate}");
    }
    ExitCode::SUCCESS
}

/// Joins query words, leaving out options typed among them.
fn query_text(words: &[String]) -> String {
    let words: Vec<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| !w.starts_with('-'))
        .collect();
    words.join(" ")
}

/// Returns the sorted subcommand names starting with `prefix`.
fn subcommands(prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = Cli::command()
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    names
}

/// Returns the sorted long options starting with `prefix`.
///
/// A lone word completes the global options; otherwise the options of the
/// subcommand named by the first word.
fn long_options(words: &[String], prefix: &str) -> Vec<String> {
    let root = Cli::command();
    let mut options: Vec<String> = root
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .map(|long| format!("--{long}"))
        .collect();
    if words.len() > 1
        && let Some(sub) = root.find_subcommand(&words[0])
    {
        options.extend(
            sub.get_arguments()
                .filter_map(|arg| arg.get_long())
                .map(|long| format!("--{long}")),
        );
    }
    options.retain(|option| option.starts_with(prefix));
    options.sort();
    options.dedup();
    options
}
