//! Clap argument definitions for the `cantrip` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "cantrip", version)]
#[command(about = "Music library manager driven by a small query language")]
pub struct Cli {
    /// Music directory, overriding configuration
    #[arg(long, global = true, env = "CANTRIP_MUSIC_HOME")]
    pub music_home: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Query words shared by commands that select tracks.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Query, as one or more words
    #[arg(required = true)]
    pub query: Vec<String>,
}

impl QueryArgs {
    /// Returns the query text.
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `cantrip select`.
#[derive(Args, Debug, Clone)]
pub struct SelectCommand {
    /// Query to run.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Show the parsed query and generated SQL without running it
    #[arg(long)]
    pub explain: bool,

    /// Output paths as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cantrip play`.
#[derive(Args, Debug, Clone)]
pub struct PlayCommand {
    /// Query to run.
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for `cantrip add`.
#[derive(Args, Debug, Clone)]
pub struct AddCommand {
    /// Audio file to add
    pub path: PathBuf,

    /// Track title
    #[arg(long)]
    pub title: String,

    /// Album title
    #[arg(long)]
    pub album: Option<String>,

    /// Artist name (comma separated or repeated)
    #[arg(long = "artist", value_delimiter = ',')]
    pub artists: Vec<String>,

    /// Position of the track on its album
    #[arg(long)]
    pub track_number: Option<u32>,
}

/// Arguments for `cantrip complete`.
#[derive(Args, Debug, Clone)]
pub struct CompleteCommand {
    /// Command line words typed so far, after `cantrip`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

/// Arguments for `cantrip init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Write the global configuration in the home directory
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `cantrip` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the paths of tracks matching a query
    #[command(after_help = "\
QUERY SYNTAX:
  a, b              Tracks titled like a or b
  a on x            ...on an album titled like x
  a on x ordered    ...in album track order
  a by y            ...by an artist named like y
  a shuffle         ...in random order
  q1 and q2         Tracks matching both queries
  q1 or q2          Tracks of q1, then tracks of q2

PATTERNS:
  word              Matches anywhere, ignoring case
  ^word / word$     Anchored at the start / end
  a.b               '.' matches any run of characters
  .                 Matches everything
  :on               Leading ':' makes a keyword a plain word

EXAMPLES:
  cantrip select . on debut ordered
  cantrip select . by autechre shuffle
  cantrip select 'intro, outro by ^bj'")]
    Select(SelectCommand),

    /// Play tracks matching a query with the configured player
    Play(PlayCommand),

    /// Add a track to the library
    Add(AddCommand),

    /// Print completions for a partial command line
    Complete(CompleteCommand),

    /// Initialize cantrip configuration in current directory
    Init(InitCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,
}

impl Commands {
    /// Returns true for commands that must work without a valid configuration.
    pub fn skips_config(&self) -> bool {
        matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
