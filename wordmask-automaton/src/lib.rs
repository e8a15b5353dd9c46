//! A `no_std` Aho-Corasick automaton for wordmask.
//!
//! The automaton finds every occurrence of every pattern in a single pass,
//! including overlapping and nested occurrences. It is the degraded
//! multi-pattern matcher that `wordmask-core` falls back to when the primary
//! regex compiler refuses a word set. Resolution of overlaps is left to the
//! caller.
//!
//! Positions are measured in symbols (`char`s), never in bytes.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod automaton;
pub mod scanner;
pub mod trie;

pub use automaton::AhoCorasick;
pub use scanner::Scanner;

/// Index of a node inside the automaton.
pub type StateId = usize;

/// A raw match reported by the automaton, in symbol units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last symbol of the match.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}
