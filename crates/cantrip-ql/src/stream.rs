//! Pull-based token stream with unbounded lookahead.
//!
//! The stream owns its producer, so items can only be pulled through the stream and
//! the peek buffer never goes stale.

use std::collections::VecDeque;

/// A cursor over any iterator with buffered lookahead.
#[derive(Debug)]
pub struct TokenStream<I: Iterator> {
    /// The underlying producer.
    source: I,
    /// Items pulled from `source` but not yet consumed.
    peeked: VecDeque<I::Item>,
}

impl<I: Iterator> TokenStream<I> {
    /// Wraps a producer.
    pub fn new(source: I) -> Self {
        Self {
            source,
            peeked: VecDeque::new(),
        }
    }

    /// Returns up to `n` upcoming items without consuming them.
    ///
    /// The returned slice is shorter than `n` only when the producer is exhausted.
    /// Repeated calls return the same items.
    pub fn peek(&mut self, n: usize) -> &[I::Item] {
        while self.peeked.len() < n {
            match self.source.next() {
                Some(item) => self.peeked.push_back(item),
                None => break,
            }
        }
        let available = n.min(self.peeked.len());
        &self.peeked.make_contiguous()[..available]
    }

    /// Returns the next item without consuming it.
    pub fn peek_one(&mut self) -> Option<&I::Item> {
        self.peek(1).first()
    }

    /// Drops up to `n` buffered items. Items that were never peeked are untouched.
    pub fn consume_peeked(&mut self, n: usize) {
        let n = n.min(self.peeked.len());
        self.peeked.drain(..n);
    }

    /// Returns an iterator that yields each upcoming item but only consumes it when
    /// iteration resumes.
    ///
    /// Breaking out of the loop leaves the last yielded item at the head of the stream.
    pub fn lookahead(&mut self) -> Lookahead<'_, I> {
        Lookahead {
            stream: self,
            pending: false,
        }
    }

    /// Returns true when no items remain.
    pub fn is_exhausted(&mut self) -> bool {
        self.peek_one().is_none()
    }
}

impl<I: Iterator> Iterator for TokenStream<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.peeked.pop_front().or_else(|| self.source.next())
    }
}

/// Iterator returned by [`TokenStream::lookahead`].
pub struct Lookahead<'a, I: Iterator> {
    /// The stream being walked.
    stream: &'a mut TokenStream<I>,
    /// Whether the previously yielded item is still at the head of the stream.
    pending: bool,
}

impl<I> Iterator for Lookahead<'_, I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.pending {
            self.stream.consume_peeked(1);
        }
        let item = self.stream.peek_one().cloned();
        self.pending = item.is_some();
        item
    }
}
