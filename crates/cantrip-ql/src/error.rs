//! Parse errors.

use std::{collections::BTreeSet, error::Error, fmt};

use crate::lexer::{Lexeme, TokenKind};

/// A query that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The offending lexeme, or `None` when input ended early.
    pub lexeme: Option<Lexeme>,
    /// Error message without position or context.
    pub message: String,
    /// Token kinds that would have been accepted at the failure point.
    pub expected: BTreeSet<TokenKind>,
    /// The query text, once attached.
    pub source: Option<String>,
}

impl ParseError {
    /// Creates an error for an unexpected lexeme.
    pub fn unexpected(lexeme: Lexeme, expected: BTreeSet<TokenKind>) -> Self {
        Self {
            message: with_expected(lexeme.describe(), &expected),
            lexeme: Some(lexeme),
            expected,
            source: None,
        }
    }

    /// Creates an error for input that ended while more tokens were required.
    pub fn end_of_stream(expected: BTreeSet<TokenKind>) -> Self {
        Self {
            message: with_expected("unexpected end of lexeme stream".to_string(), &expected),
            lexeme: None,
            expected,
            source: None,
        }
    }

    /// Attaches the query text for display.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the byte column of the failure.
    ///
    /// End-of-input failures point just past the end of the source.
    pub fn column(&self) -> Option<usize> {
        match (&self.lexeme, &self.source) {
            (Some(lexeme), _) => Some(lexeme.col),
            (None, Some(source)) => Some(source.len()),
            (None, None) => None,
        }
    }
}

/// Appends the expected-kinds suffix to a message.
fn with_expected(message: String, expected: &BTreeSet<TokenKind>) -> String {
    let kinds: Vec<String> = expected.iter().map(ToString::to_string).collect();
    match kinds.as_slice() {
        [] => message,
        [only] => format!("{message}, expected {only}"),
        _ => format!("{message}, expected one of {{{}}}", kinds.join(", ")),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column() {
            Some(col) => write!(f, "query syntax error at column {col}: {}", self.message)?,
            None => write!(f, "query syntax error: {}", self.message)?,
        }
        if let Some(source) = &self.source {
            write!(f, "\n  {source}")?;
            if let Some(col) = self.column() {
                let width = source
                    .get(..col.min(source.len()))
                    .map_or(col, |prefix| prefix.chars().count());
                write!(f, "\n  {}^", " ".repeat(width))?;
            }
        }
        Ok(())
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(kinds: &[TokenKind]) -> BTreeSet<TokenKind> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn unexpected_message() {
        let err = ParseError::unexpected(
            Lexeme::new(TokenKind::Comma, ",", 4),
            expected(&[TokenKind::Name]),
        );
        assert_eq!(err.message, "unexpected ',', expected name");
        assert_eq!(err.column(), Some(4));
    }

    #[test]
    fn expected_set_listed() {
        let err = ParseError::unexpected(
            Lexeme::new(TokenKind::Name, "x", 2),
            expected(&[TokenKind::Or, TokenKind::And]),
        );
        assert_eq!(err.message, "unexpected name: 'x', expected one of {and, or}");
    }

    #[test]
    fn display_with_caret() {
        let err = ParseError::unexpected(
            Lexeme::new(TokenKind::Invalid, "b$d", 2),
            expected(&[TokenKind::Name]),
        )
        .with_source("a b$d");
        assert_eq!(
            err.to_string(),
            "query syntax error at column 2: invalid lexeme: 'b$d', expected name\n  a b$d\n    ^"
        );
    }

    #[test]
    fn caret_counts_characters() {
        let err = ParseError::unexpected(
            Lexeme::new(TokenKind::Invalid, "1$$", 3),
            expected(&[TokenKind::Name]),
        )
        .with_source("é 1$$");
        assert!(err.to_string().ends_with("\n  é 1$$\n    ^"));
    }

    #[test]
    fn end_of_stream_points_past_end() {
        let err = ParseError::end_of_stream(expected(&[TokenKind::Name])).with_source("a,");
        assert_eq!(err.column(), Some(2));
        assert!(err.to_string().ends_with("\n  a,\n    ^"));
    }

    #[test]
    fn display_without_source() {
        let err = ParseError::end_of_stream(BTreeSet::new());
        assert_eq!(
            err.to_string(),
            "query syntax error: unexpected end of lexeme stream"
        );
    }
}
