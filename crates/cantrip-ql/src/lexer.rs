//! Query lexer.
//!
//! Splits query text into [`Lexeme`]s. Every position is classified by trying the
//! rules of a single static table in priority order; the first rule that matches wins.
//! Whitespace is matched and dropped.

use std::fmt;

/// The closed set of token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// A bare word: a title, album or artist pattern.
    Name,
    /// The `and` keyword.
    And,
    /// The `or` keyword.
    Or,
    /// The `on` keyword.
    On,
    /// The `by` keyword.
    By,
    /// The `ordered` keyword.
    Ordered,
    /// The `shuffle` keyword.
    Shuffle,
    /// A literal `,`.
    Comma,
    /// A run of non-whitespace that matches nothing else.
    Invalid,
}

impl TokenKind {
    /// All keyword kinds, in lexicographic order of their spelling.
    pub const KEYWORDS: [Self; 6] = [
        Self::And,
        Self::By,
        Self::On,
        Self::Or,
        Self::Ordered,
        Self::Shuffle,
    ];

    /// Returns the source spelling of a keyword kind.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::And => Some("and"),
            Self::Or => Some("or"),
            Self::On => Some("on"),
            Self::By => Some("by"),
            Self::Ordered => Some("ordered"),
            Self::Shuffle => Some("shuffle"),
            Self::Name | Self::Comma | Self::Invalid => None,
        }
    }

    /// Returns true for the keyword kinds.
    pub fn is_keyword(self) -> bool {
        self.keyword().is_some()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Comma => write!(f, "','"),
            Self::Invalid => write!(f, "invalid lexeme"),
            keyword => write!(f, "{}", keyword.keyword().unwrap_or_default()),
        }
    }
}

/// A classified substring of the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token text. Names have any escaping `:` stripped.
    pub text: String,
    /// Byte offset of the token in the query text.
    pub col: usize,
}

impl Lexeme {
    /// Creates a lexeme.
    pub fn new(kind: TokenKind, text: impl Into<String>, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            col,
        }
    }

    /// Describes this lexeme for an "unexpected ..." diagnostic.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Name => format!("unexpected name: '{}'", self.text),
            TokenKind::Invalid => format!("invalid lexeme: '{}'", self.text),
            TokenKind::Comma => "unexpected ','".to_string(),
            _ => format!("unexpected '{}'", self.text),
        }
    }
}

/// One entry of the lexer rule table.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// A keyword, which must be followed by whitespace or end of input.
    Keyword(TokenKind, &'static str),
    /// The comma separator.
    Comma,
    /// A name, optionally escaped with `:` and anchored with `^`/`$`.
    Name,
    /// Any other run of non-whitespace.
    Invalid,
    /// A whitespace run, which is discarded.
    Whitespace,
}

/// Lexer rules in priority order.
const RULES: [Rule; 10] = [
    Rule::Keyword(TokenKind::And, "and"),
    Rule::Keyword(TokenKind::Or, "or"),
    Rule::Keyword(TokenKind::On, "on"),
    Rule::Keyword(TokenKind::By, "by"),
    Rule::Keyword(TokenKind::Ordered, "ordered"),
    Rule::Keyword(TokenKind::Shuffle, "shuffle"),
    Rule::Comma,
    Rule::Name,
    Rule::Invalid,
    Rule::Whitespace,
];

/// A successful rule match at the head of the remaining input.
struct RuleMatch<'a> {
    /// The token kind, or `None` for discarded whitespace.
    kind: Option<TokenKind>,
    /// The token text after any stripping.
    text: &'a str,
    /// Number of input bytes consumed.
    len: usize,
}

/// Returns true for characters allowed in the body of a name.
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.' || ch == '-'
}

/// Returns the byte length of the leading run of characters satisfying `pred`.
fn run_len(input: &str, pred: impl Fn(char) -> bool) -> usize {
    input
        .char_indices()
        .find(|&(_, ch)| !pred(ch))
        .map_or(input.len(), |(idx, _)| idx)
}

/// Returns true if `rest` is a valid place for a token to end.
fn at_boundary(rest: &str, allow_comma: bool) -> bool {
    match rest.chars().next() {
        None => true,
        Some(ch) => ch.is_whitespace() || (allow_comma && ch == ','),
    }
}

impl Rule {
    /// Tries to match this rule at the start of `input`.
    fn matches(self, input: &str) -> Option<RuleMatch<'_>> {
        match self {
            Self::Keyword(kind, word) => {
                let rest = input.strip_prefix(word)?;
                at_boundary(rest, false).then_some(RuleMatch {
                    kind: Some(kind),
                    text: word,
                    len: word.len(),
                })
            }
            Self::Comma => input.starts_with(',').then_some(RuleMatch {
                kind: Some(TokenKind::Comma),
                text: ",",
                len: 1,
            }),
            Self::Name => Self::match_name(input),
            Self::Invalid => {
                let len = run_len(input, |ch| !ch.is_whitespace());
                (len > 0).then(|| RuleMatch {
                    kind: Some(TokenKind::Invalid),
                    text: &input[..len],
                    len,
                })
            }
            Self::Whitespace => {
                let len = run_len(input, char::is_whitespace);
                (len > 0).then_some(RuleMatch {
                    kind: None,
                    text: "",
                    len,
                })
            }
        }
    }

    /// Matches `:?^?[A-Za-z0-9.-]+$?` followed by a token boundary.
    fn match_name(input: &str) -> Option<RuleMatch<'_>> {
        let escape = usize::from(input.starts_with(':'));
        let body = &input[escape..];
        let mut len = usize::from(body.starts_with('^'));
        let core = run_len(&body[len..], is_name_char);
        if core == 0 {
            return None;
        }
        len += core;
        if body[len..].starts_with('$') {
            len += 1;
        }
        at_boundary(&body[len..], true).then(|| RuleMatch {
            kind: Some(TokenKind::Name),
            text: &body[..len],
            len: escape + len,
        })
    }
}

/// Lazy iterator of lexemes over a query string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The full query text.
    input: &'a str,
    /// Byte offset of the next unread character.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        loop {
            let rest = &self.input[self.position..];
            if rest.is_empty() {
                return None;
            }
            let Some(found) = RULES.iter().find_map(|rule| rule.matches(rest)) else {
                unreachable!("no lexer rule matches at {}: {rest:?}", self.position);
            };
            let col = self.position;
            self.position += found.len;
            if let Some(kind) = found.kind {
                return Some(Lexeme::new(kind, found.text, col));
            }
        }
    }
}

/// Returns a lazy lexeme iterator over `input`.
pub fn lex(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).map(|l| l.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        lex(input).map(|l| l.text).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(lex("").count(), 0);
        assert_eq!(lex("   \t ").count(), 0);
    }

    #[test]
    fn names_and_commas() {
        assert_eq!(
            lex("foo,bar").collect::<Vec<_>>(),
            vec![
                Lexeme::new(TokenKind::Name, "foo", 0),
                Lexeme::new(TokenKind::Comma, ",", 3),
                Lexeme::new(TokenKind::Name, "bar", 4),
            ]
        );
    }

    #[test]
    fn full_query() {
        use TokenKind::*;
        assert_eq!(
            kinds("a on b ordered by c shuffle and d or e"),
            vec![
                Name, On, Name, Ordered, By, Name, Shuffle, And, Name, Or, Name
            ]
        );
    }

    #[test]
    fn columns_are_byte_offsets() {
        let cols: Vec<usize> = lex("ab  on   x").map(|l| l.col).collect();
        assert_eq!(cols, vec![0, 4, 9]);
    }

    #[test]
    fn keyword_needs_boundary() {
        assert_eq!(kinds("orange"), vec![TokenKind::Name]);
        assert_eq!(kinds("bypass on"), vec![TokenKind::Name, TokenKind::On]);
        assert_eq!(kinds("ordered"), vec![TokenKind::Ordered]);
    }

    #[test]
    fn keyword_before_comma_is_name() {
        assert_eq!(kinds("on,x"), vec![TokenKind::Name, TokenKind::Comma, TokenKind::Name]);
    }

    #[test]
    fn colon_escapes_keyword() {
        let lexemes: Vec<Lexeme> = lex(":on").collect();
        assert_eq!(lexemes, vec![Lexeme::new(TokenKind::Name, "on", 0)]);
    }

    #[test]
    fn anchors_are_part_of_name() {
        assert_eq!(texts("^intro outro$"), vec!["^intro", "outro$"]);
    }

    #[test]
    fn invalid_run() {
        let lexemes: Vec<Lexeme> = lex("123$$$").collect();
        assert_eq!(lexemes, vec![Lexeme::new(TokenKind::Invalid, "123$$$", 0)]);
    }

    #[test]
    fn invalid_mid_query() {
        let lexemes: Vec<Lexeme> = lex("a b@r c").collect();
        assert_eq!(lexemes[1], Lexeme::new(TokenKind::Invalid, "b@r", 2));
        assert_eq!(lexemes[2].kind, TokenKind::Name);
    }

    #[test]
    fn describe_lexemes() {
        assert_eq!(Lexeme::new(TokenKind::On, "on", 0).describe(), "unexpected 'on'");
        assert_eq!(Lexeme::new(TokenKind::Comma, ",", 0).describe(), "unexpected ','");
        assert_eq!(
            Lexeme::new(TokenKind::Name, "x", 0).describe(),
            "unexpected name: 'x'"
        );
        assert_eq!(
            Lexeme::new(TokenKind::Invalid, "$", 0).describe(),
            "invalid lexeme: '$'"
        );
    }

    #[test]
    fn keyword_spellings() {
        let words: Vec<&str> = TokenKind::KEYWORDS
            .iter()
            .filter_map(|k| k.keyword())
            .collect();
        assert_eq!(words, vec!["and", "by", "on", "or", "ordered", "shuffle"]);
        assert!(!TokenKind::Name.is_keyword());
    }
}
