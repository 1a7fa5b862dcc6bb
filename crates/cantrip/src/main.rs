//! Command-line interface for the `cantrip` music library manager.

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::parse_cli, commands};

fn main() -> ExitCode {
    env_logger::init();
    let cli = parse_cli();

    let ctx = if cli.command.skips_config() {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load(cli.music_home.as_deref())
    };
    let mut ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
