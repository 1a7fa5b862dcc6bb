//! Completion of partially typed queries.

use crate::{
    lexer::TokenKind,
    parser::{CompletionClass, parse_partial},
};

/// A library attribute that completions draw values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Track titles.
    Title,
    /// Album titles.
    Album,
    /// Artist names.
    Artist,
}

/// Supplies distinct attribute values for completion.
pub trait CompletionSource {
    /// Error returned by the source.
    type Error;

    /// Returns distinct values of `attribute` starting with `prefix`, or all values
    /// when `prefix` is `None`.
    fn values(&self, attribute: Attribute, prefix: Option<&str>)
    -> Result<Vec<String>, Self::Error>;
}

/// Returns the keywords starting with `prefix`.
pub fn keywords(prefix: Option<&str>) -> Vec<String> {
    let prefix = prefix.unwrap_or_default();
    TokenKind::KEYWORDS
        .iter()
        .filter_map(|kind| kind.keyword())
        .filter(|word| word.starts_with(prefix))
        .map(ToString::to_string)
        .collect()
}

/// Returns sorted, distinct completions for the end of `partial`.
///
/// # Errors
///
/// Returns the source's error if a value lookup fails. Parse errors in `partial` are
/// never reported.
pub fn completions<S: CompletionSource + ?Sized>(
    source: &S,
    partial: &str,
) -> Result<Vec<String>, S::Error> {
    let cursor = parse_partial(partial);
    let prefix = cursor.prefix();
    let mut values = match cursor.class {
        CompletionClass::Keyword => keywords(prefix),
        CompletionClass::Title => source.values(Attribute::Title, prefix)?,
        CompletionClass::Album => source.values(Attribute::Album, prefix)?,
        CompletionClass::Artist => source.values(Attribute::Artist, prefix)?,
    };
    values.sort();
    values.dedup();
    Ok(values)
}
