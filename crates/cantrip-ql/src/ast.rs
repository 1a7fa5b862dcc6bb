//! Query AST.
//!
//! A [`Query`] names track titles, optionally narrowed by album and artist, and may
//! chain to one nested query through a [`Combinator`]. Chains are right-recursive:
//! `a and b or c` is `a and (b or c)`.

use std::fmt;

use crate::lexer::TokenKind;

/// The title pattern that matches every track.
pub const MATCH_ALL: &str = ".";

/// How a query combines with the query nested after it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Combinator {
    /// No nested query.
    #[default]
    None,
    /// Keep only tracks that also match the nested query.
    And(Box<Query>),
    /// Append the tracks of the nested query.
    Or(Box<Query>),
}

/// A parsed query node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Track title patterns. Never empty.
    pub titles: Vec<String>,
    /// Album title patterns from an `on` clause.
    pub on: Option<Vec<String>>,
    /// Order tracks by their number within the album.
    pub ordered: bool,
    /// Artist name patterns from a `by` clause.
    pub by: Option<Vec<String>>,
    /// Randomize the result order.
    pub shuffle: bool,
    /// The nested query, if any.
    pub combinator: Combinator,
}

impl Query {
    /// Creates a query for the given title patterns with no other clauses.
    pub fn new<S: Into<String>>(titles: impl IntoIterator<Item = S>) -> Self {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
            on: None,
            ordered: false,
            by: None,
            shuffle: false,
            combinator: Combinator::None,
        }
    }

    /// Returns the query this one intersects with.
    pub fn and_(&self) -> Option<&Self> {
        match &self.combinator {
            Combinator::And(query) => Some(query),
            _ => None,
        }
    }

    /// Returns the query whose results are appended to this one.
    pub fn or_(&self) -> Option<&Self> {
        match &self.combinator {
            Combinator::Or(query) => Some(query),
            _ => None,
        }
    }
}

/// Writes a pattern list separated by `, `, escaping names spelled like keywords.
fn write_list(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    for (idx, name) in names.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        let escaped = TokenKind::KEYWORDS
            .iter()
            .any(|kind| kind.keyword() == Some(name.as_str()));
        if escaped {
            write!(f, ":")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.titles)?;
        if let Some(on) = &self.on {
            write!(f, " on ")?;
            write_list(f, on)?;
            if self.ordered {
                write!(f, " ordered")?;
            }
        }
        if let Some(by) = &self.by {
            write!(f, " by ")?;
            write_list(f, by)?;
        }
        if self.shuffle {
            write!(f, " shuffle")?;
        }
        match &self.combinator {
            Combinator::None => Ok(()),
            Combinator::And(query) => write!(f, " and {query}"),
            Combinator::Or(query) => write!(f, " or {query}"),
        }
    }
}
