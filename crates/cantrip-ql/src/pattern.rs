//! Fuzzy name patterns.
//!
//! A pattern matches anywhere in a value unless anchored with a leading `^` or a
//! trailing `$`. Each `.` stands for any run of characters, including none.

use std::fmt;

/// Escapes `LIKE` wildcards and the `\` escape character in literal text.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// A parsed fuzzy pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// The pattern text without anchors.
    body: String,
    /// Whether the match must start at the beginning of the value.
    anchored_start: bool,
    /// Whether the match must end at the end of the value.
    anchored_end: bool,
}

impl Pattern {
    /// Parses pattern text such as `^intro`, `a.b` or `live$`.
    pub fn new(raw: &str) -> Self {
        let (anchored_start, rest) = match raw.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (anchored_end, body) = match rest.strip_suffix('$') {
            Some(body) => (true, body),
            None => (false, rest),
        };
        Self {
            body: body.to_string(),
            anchored_start,
            anchored_end,
        }
    }

    /// Renders the pattern as a SQL `LIKE` operand using `\` as the escape character.
    pub fn like(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 2);
        if !self.anchored_start {
            out.push('%');
        }
        let segments: Vec<String> = self.body.split('.').map(escape_like).collect();
        out.push_str(&segments.join("%"));
        if !self.anchored_end {
            out.push('%');
        }
        out
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = if self.anchored_start { "^" } else { "" };
        let end = if self.anchored_end { "$" } else { "" };
        write!(f, "{start}{}{end}", self.body)
    }
}
