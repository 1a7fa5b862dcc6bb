//! Query parser.
//!
//! Recursive descent over a [`TokenStream`] of lexemes.
//!
//! # Grammar
//!
//! ```text
//! query     → (name_list | <"." when starting at on/by>)
//!             [("on" name_list ["ordered"] | "by" name_list) [by_or_on]]
//!             ["shuffle"]
//!             [("and" | "or") query]
//! name_list → NAME ("," NAME)*
//! ```
//!
//! `on` and `by` may each appear once, in either order. A trailing `and`/`or` takes
//! the rest of the input as one nested query.
//!
//! The same parser serves completion: alongside the AST it keeps a [`Cursor`]
//! describing what kind of word the input ends in, which [`parse_partial`] returns
//! even when the input does not parse.

use std::{collections::BTreeSet, mem};

use log::debug;

use crate::{
    ast::{Combinator, MATCH_ALL, Query},
    error::ParseError,
    lexer::{Lexeme, TokenKind, lex},
    stream::TokenStream,
};

/// The kind of word a completion should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionClass {
    /// A query keyword.
    Keyword,
    /// A track title.
    Title,
    /// An album title.
    Album,
    /// An artist name.
    Artist,
}

/// Completion state: the class of word at the end of the input and the partial word
/// typed so far, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// What kind of word is being typed.
    pub class: CompletionClass,
    /// The partially typed word.
    pub lexeme: Option<Lexeme>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            class: CompletionClass::Keyword,
            lexeme: None,
        }
    }
}

impl Cursor {
    /// Returns the partially typed text, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.lexeme.as_ref().map(|l| l.text.as_str())
    }
}

/// Recursive descent parser state.
struct Parser<I: Iterator<Item = Lexeme>> {
    /// The lexeme stream.
    stream: TokenStream<I>,
    /// Kinds offered by rejected accepts since the last consumed token.
    expected: BTreeSet<TokenKind>,
    /// Completion state, updated as tokens are consumed.
    cursor: Cursor,
}

impl<I: Iterator<Item = Lexeme>> Parser<I> {
    /// Creates a parser over a lexeme producer.
    fn new(lexemes: I) -> Self {
        Self {
            stream: TokenStream::new(lexemes),
            expected: BTreeSet::new(),
            cursor: Cursor::default(),
        }
    }

    /// Moves the cursor to a fresh word of `class`.
    fn enter(&mut self, class: CompletionClass) {
        self.cursor = Cursor {
            class,
            lexeme: None,
        };
    }

    /// Consumes the next lexeme if its kind is in `kinds`.
    ///
    /// A rejected name where a keyword was acceptable becomes the keyword prefix of
    /// the cursor.
    fn accept(&mut self, kinds: &[TokenKind]) -> Option<Lexeme> {
        let lexeme = self.stream.peek_one()?.clone();
        if kinds.contains(&lexeme.kind) {
            self.stream.consume_peeked(1);
            self.expected.clear();
            return Some(lexeme);
        }
        self.expected.extend(kinds.iter().copied());
        if lexeme.kind == TokenKind::Name && kinds.iter().any(|k| k.is_keyword()) {
            self.cursor = Cursor {
                class: CompletionClass::Keyword,
                lexeme: Some(lexeme),
            };
        }
        None
    }

    /// Consumes the next lexeme, failing unless its kind is in `kinds`.
    fn expect(&mut self, kinds: &[TokenKind]) -> Result<Lexeme, ParseError> {
        self.expected.extend(kinds.iter().copied());
        let expected = mem::take(&mut self.expected);
        match self.stream.next() {
            Some(lexeme) if kinds.contains(&lexeme.kind) => Ok(lexeme),
            Some(lexeme) => Err(ParseError::unexpected(lexeme, expected)),
            None => Err(ParseError::end_of_stream(expected)),
        }
    }

    /// Parses a complete query and requires the input to be exhausted.
    fn parse(&mut self) -> Result<Query, ParseError> {
        let query = self.query()?;
        if !self.stream.is_exhausted() {
            let lexeme = self.expect(&[TokenKind::And, TokenKind::Or])?;
            unreachable!("query left a trailing {lexeme:?} unparsed");
        }
        Ok(query)
    }

    /// query → titles [on/by clauses] ["shuffle"] [("and" | "or") query]
    fn query(&mut self) -> Result<Query, ParseError> {
        let starts_with_clause = matches!(
            self.stream.peek_one().map(|l| l.kind),
            Some(TokenKind::On | TokenKind::By)
        );
        let titles = if starts_with_clause {
            vec![MATCH_ALL.to_string()]
        } else {
            self.name_list(CompletionClass::Title)?
        };
        let mut query = Query::new(titles);

        match self.accept(&[TokenKind::On, TokenKind::By]).map(|l| l.kind) {
            Some(TokenKind::On) => self.on_clause(&mut query)?,
            Some(TokenKind::By) => self.by_clause(&mut query)?,
            _ => {}
        }

        if self.accept(&[TokenKind::Shuffle]).is_some() {
            self.enter(CompletionClass::Keyword);
            query.shuffle = true;
        }

        query.combinator = match self.accept(&[TokenKind::And, TokenKind::Or]).map(|l| l.kind) {
            Some(TokenKind::And) => {
                self.enter(CompletionClass::Title);
                Combinator::And(Box::new(self.query()?))
            }
            Some(TokenKind::Or) => {
                self.enter(CompletionClass::Title);
                Combinator::Or(Box::new(self.query()?))
            }
            _ => Combinator::None,
        };

        Ok(query)
    }

    /// Parses the album list after a consumed `on`, then an optional `ordered` and
    /// `by` clause.
    fn on_clause(&mut self, query: &mut Query) -> Result<(), ParseError> {
        self.enter(CompletionClass::Album);
        query.on = Some(self.name_list(CompletionClass::Album)?);
        if self.accept(&[TokenKind::Ordered]).is_some() {
            self.enter(CompletionClass::Keyword);
            query.ordered = true;
        }
        if query.by.is_none() && self.accept(&[TokenKind::By]).is_some() {
            self.by_clause(query)?;
        }
        Ok(())
    }

    /// Parses the artist list after a consumed `by`, then an optional `on` clause.
    fn by_clause(&mut self, query: &mut Query) -> Result<(), ParseError> {
        self.enter(CompletionClass::Artist);
        query.by = Some(self.name_list(CompletionClass::Artist)?);
        if query.on.is_none() && self.accept(&[TokenKind::On]).is_some() {
            self.on_clause(query)?;
        }
        Ok(())
    }

    /// name_list → NAME ("," NAME)*
    ///
    /// Leaves the first lexeme after the list unconsumed.
    fn name_list(&mut self, class: CompletionClass) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        let mut want_name = true;

        for lexeme in self.stream.lookahead() {
            match (want_name, lexeme.kind) {
                (true, TokenKind::Name) => {
                    self.expected.clear();
                    names.push(lexeme.text.clone());
                    self.cursor = Cursor {
                        class,
                        lexeme: Some(lexeme),
                    };
                    want_name = false;
                }
                (true, _) => {
                    self.expected.insert(TokenKind::Name);
                    return Err(ParseError::unexpected(
                        lexeme,
                        mem::take(&mut self.expected),
                    ));
                }
                (false, TokenKind::Comma) => {
                    self.expected.clear();
                    self.cursor = Cursor {
                        class,
                        lexeme: None,
                    };
                    want_name = true;
                }
                (false, _) => {
                    self.expected.insert(TokenKind::Comma);
                    return Ok(names);
                }
            }
        }

        if want_name {
            self.expected.insert(TokenKind::Name);
            return Err(ParseError::end_of_stream(mem::take(
                &mut self.expected,
            )));
        }
        Ok(names)
    }
}

/// Parses query text into a [`Query`].
///
/// # Errors
///
/// Returns a [`ParseError`] with the query text attached if the input is not a
/// single well-formed query.
pub fn parse(source: &str) -> Result<Query, ParseError> {
    let query = Parser::new(lex(source))
        .parse()
        .map_err(|err| err.with_source(source))?;
    debug!("parsed query {source:?} as {query:?}");
    Ok(query)
}

/// Parses possibly incomplete query text and returns the completion cursor.
///
/// Never fails: parsing stops at the first error and the cursor keeps the state it
/// had reached.
pub fn parse_partial(source: &str) -> Cursor {
    let mut parser = Parser::new(lex(source));
    if let Err(err) = parser.parse() {
        debug!("partial query {source:?} stopped: {}", err.message);
    }
    parser.cursor
}
