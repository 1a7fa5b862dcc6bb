//! The cantrip query language.
//!
//! A query selects tracks from a music library:
//!
//! - **Titles**: `intro, outro` - tracks whose title matches any pattern
//! - **Albums**: `intro on debut ordered` - restrict by album, in track order
//! - **Artists**: `. by autechre` - restrict by artist
//! - **Shuffle**: `. by autechre shuffle` - random order
//! - **Combinators**: `a and b`, `a or b` - intersect with or append another query
//!
//! Patterns match anywhere in a value unless anchored with `^` or `$`, and `.`
//! matches any run of characters. A leading `:` escapes a keyword.
//!
//! # Example
//!
//! ```
//! use cantrip_ql::{compile, parse};
//!
//! let query = parse("intro on debut ordered by ^bj").unwrap();
//! assert!(query.ordered);
//! assert_eq!(compile(&query).len(), 1);
//! ```

mod ast;
mod compile;
mod completion;
mod error;
mod lexer;
mod parser;
mod pattern;
mod stream;

pub use ast::{Combinator, MATCH_ALL, Query};
pub use compile::{Column, Filter, Join, Order, OrderKey, Plan, compile, compile_str};
pub use completion::{Attribute, CompletionSource, completions, keywords};
pub use error::ParseError;
pub use lexer::{Lexeme, Lexer, TokenKind, lex};
pub use parser::{CompletionClass, Cursor, parse, parse_partial};
pub use pattern::{Pattern, escape_like};
pub use stream::{Lookahead, TokenStream};
