//! Implementation of `cantrip add`.

use std::process::ExitCode;

use cantrip_library::{AddOutcome, NewTrack};

use crate::cli::{args::AddCommand, context::CommandContext, output::dim};

/// Adds a track to the library.
pub fn run(ctx: &mut CommandContext, cmd: &AddCommand) -> ExitCode {
    let path = ctx.cwd.join(&cmd.path);
    if !path.is_file() {
        eprintln!("error: not a file: {}", path.display());
        return ExitCode::FAILURE;
    }

    let track = NewTrack {
        path,
        title: cmd.title.clone(),
        album: cmd.album.clone(),
        track_number: cmd.track_number,
        artists: cmd
            .artists
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
    };

    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };
    match library.add_track(&track) {
        Ok(AddOutcome::Added(id)) => {
            println!("Added {} {}", track.title, dim(&format!("(#{id})")));
            ExitCode::SUCCESS
        }
        Ok(AddOutcome::Existing(id)) => {
            println!(
                "Already in library: {} {}",
                track.path.display(),
                dim(&format!("(#{id})"))
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
