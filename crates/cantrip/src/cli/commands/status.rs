//! Implementation of `cantrip status`.

use std::process::ExitCode;

use cantrip_config::ConfigWarning;

use crate::cli::{
    context::CommandContext,
    output::{dim, header, subheader, warning},
};

/// Shows configuration files, library location and size, and validation warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    println!("{}", header("cantrip"));
    println!();

    println!("{}", subheader("Config files:"));
    if ctx.config.files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
        println!(
            "   Run {} to create a configuration file.",
            subheader("cantrip init")
        );
    } else {
        for path in &ctx.config.files {
            println!("   {}", path.display());
        }
    }
    println!();

    let library = &ctx.config.library;
    let database = library.database_path();
    println!("{}", subheader("Library:"));
    println!("   music home {}", dim(&library.music_home.display().to_string()));
    println!("   database   {}", dim(&database.display().to_string()));

    let warnings = ctx.config.validate();
    if database.is_file() {
        match ctx.library().map(|l| l.track_count()) {
            Ok(Ok(count)) => println!("   tracks     {count}"),
            Ok(Err(e)) => eprintln!("error: {e}"),
            Err(code) => return code,
        }
    } else {
        println!("   tracks     {}", dim("(no database yet)"));
    }
    println!();

    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::MusicHomeMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: create the directory or set [library] music_home")
                );
            }
            ConfigWarning::EmptyPlayerCommand => {
                println!("{}", dim("Hint: set [player] command in .cantrip.toml"));
            }
            ConfigWarning::MusicHomeNotDirectory { .. } => {}
        }
    }
}
