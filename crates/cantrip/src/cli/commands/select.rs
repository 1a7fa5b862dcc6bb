//! Implementation of `cantrip select`.

use std::process::ExitCode;

use cantrip_library::{LibraryError, render};
use cantrip_ql::{compile, parse};
use log::debug;

use crate::cli::{
    args::SelectCommand,
    context::{CommandContext, report_parse_error},
    output::{dim, indent, print_json_selection, subheader},
};

/// Prints the paths of tracks matching the query.
pub fn run(ctx: &mut CommandContext, cmd: &SelectCommand) -> ExitCode {
    let text = cmd.query.text();
    if cmd.explain {
        return explain(&text);
    }

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
    debug!("query {text:?} selected {} tracks", paths.len());

    if cmd.json {
        return print_json_selection(&text, &paths);
    }
    for path in &paths {
        println!("{}", path.display());
    }
    ExitCode::SUCCESS
}

/// Prints the parsed query, its plans and the SQL they render to.
fn explain(text: &str) -> ExitCode {
    let query = match parse(text) {
        Ok(query) => query,
        Err(err) => return report_parse_error(&err),
    };
    let plans = compile(&query);

    println!("{}", subheader("Query:"));
    println!("   {query}");
    println!();

    for (i, plan) in plans.iter().enumerate() {
        println!("{}", subheader(&format!("Plan {}:", i + 1)));
        println!("{}", indent(&plan.to_string()));
        let statement = render(plan);
        println!("{}", indent(&statement.sql));
        if !statement.params.is_empty() {
            println!("   {}", dim(&format!("params: {:?}", statement.params)));
        }
        println!();
    }
    ExitCode::SUCCESS
}
