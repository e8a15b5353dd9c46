//! Lazy match iterator over a stream of symbols.

use crate::automaton::AhoCorasick;
use crate::{Span, StateId};

/// Walks the text one symbol at a time and yields a [`Span`] for every
/// pattern ending at the current position. Spans come out in order of their
/// end position, not their start.
pub struct Scanner<'a, I> {
    automaton: &'a AhoCorasick,
    symbols: I,
    state: StateId,
    consumed: usize,
    pending: usize,
}

impl<'a, I> Scanner<'a, I>
where
    I: Iterator<Item = char>,
{
    pub fn new(automaton: &'a AhoCorasick, symbols: I) -> Self {
        Self {
            automaton,
            symbols,
            state: automaton.start(),
            consumed: 0,
            pending: 0,
        }
    }

    /// Number of symbols consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }
}

impl<'a, I> Iterator for Scanner<'a, I>
where
    I: Iterator<Item = char>,
{
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let outputs = self.automaton.outputs(self.state);
            if let Some(&length) = outputs.get(self.pending) {
                self.pending += 1;
                return Some(Span::new(self.consumed - length, length));
            }

            let symbol = self.symbols.next()?;
            self.state = self.automaton.next_state(self.state, symbol);
            self.consumed += 1;
            self.pending = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_scanner_is_lazy() {
        let ac = AhoCorasick::build(["ab"].iter().map(|p| p.chars()));
        let mut scanner = ac.find_iter("ab ab ab".chars());
        assert_eq!(scanner.next(), Some(Span::new(0, 2)));
        assert_eq!(scanner.position(), 2);
        assert_eq!(scanner.next(), Some(Span::new(3, 2)));
        assert_eq!(scanner.position(), 5);
    }

    #[test]
    fn test_scanner_reports_all_outputs_at_one_position() {
        let ac = AhoCorasick::build(["c", "bc", "abc"].iter().map(|p| p.chars()));
        let mut spans: Vec<Span> = ac.find_iter("abc".chars()).collect();
        spans.sort();
        assert_eq!(spans, alloc::vec![Span::new(0, 3), Span::new(1, 2), Span::new(2, 1)]);
    }
}
