//! SQLite-backed music library for cantrip.
//!
//! Stores tracks, albums and artists, executes compiled queries, and supplies values
//! for query completion.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use cantrip_library::{Library, NewTrack};
//!
//! let mut library = Library::open_in_memory("/music").unwrap();
//! library
//!     .add_track(&NewTrack {
//!         path: PathBuf::from("/music/debut/01.flac"),
//!         title: "human behaviour".into(),
//!         album: Some("debut".into()),
//!         track_number: Some(1),
//!         artists: vec!["bjork".into()],
//!     })
//!     .unwrap();
//! let paths = library.select("human on debut").unwrap();
//! assert_eq!(paths, vec![PathBuf::from("/music/debut/01.flac")]);
//! ```

mod error;
mod library;
mod schema;
mod sql;

pub use error::LibraryError;
pub use library::{AddOutcome, Library, NewTrack};
pub use schema::SCHEMA_VERSION;
pub use sql::{Statement, render};
