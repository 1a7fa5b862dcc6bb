//! Command implementations and dispatch.

pub mod add;
pub mod complete;
pub mod config;
pub mod init;
pub mod play;
pub mod select;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Select(cmd) => select::run(ctx, &cmd),
        Commands::Play(cmd) => play::run(ctx, &cmd),
        Commands::Add(cmd) => add::run(ctx, &cmd),
        Commands::Complete(cmd) => complete::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
