//! Implementation of `cantrip play`.

use std::process::{Command, ExitCode};

use cantrip_library::LibraryError;
use log::{debug, info};

use crate::cli::{
    args::PlayCommand,
    context::{CommandContext, report_parse_error},
};

/// Runs the configured player on the tracks matching the query.
pub fn run(ctx: &mut CommandContext, cmd: &PlayCommand) -> ExitCode {
    let text = cmd.query.text();
    let player = ctx.config.player.clone();

    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };
    let paths = match library.select(&text) {
        Ok(paths) => paths,
        Err(LibraryError::Query(err)) => return report_parse_error(&err),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if paths.is_empty() {
        info!("query {text:?} matched no tracks");
        println!("Nothing to play.");
        return ExitCode::SUCCESS;
    }

    debug!(
        "launching {} {:?} with {} tracks",
        player.command,
        player.args,
        paths.len()
    );
    let status = Command::new(&player.command)
        .args(&player.args)
        .args(&paths)
        .status();
    match status {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("error: {} exited with {status}", player.command);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: failed to run {}: {e}", player.command);
            ExitCode::FAILURE
        }
    }
}
