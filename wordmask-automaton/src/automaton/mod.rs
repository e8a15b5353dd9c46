//! Aho-Corasick construction and state transitions.
//!
//! Failure links are computed breadth-first: the link of a node points to the
//! longest proper suffix of its path that is also a prefix of some pattern.
//! Output lengths reachable through the failure chain are merged into every
//! node, so a single lookup yields all patterns ending at a position.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::scanner::Scanner;
use crate::trie::{Node, Trie};
use crate::{Span, StateId};

#[derive(Debug, Clone)]
pub struct AhoCorasick {
    nodes: Vec<Node>,
    patterns: usize,
}

impl AhoCorasick {
    /// Builds the automaton over `patterns`. Empty patterns never match.
    pub fn build<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = char>,
    {
        let mut trie = Trie::new();
        for pattern in patterns {
            trie.insert(pattern);
        }
        Self::from_trie(trie)
    }

    pub fn from_trie(trie: Trie) -> Self {
        let patterns = trie.pattern_count();
        let mut nodes = trie.nodes;
        let mut queue: VecDeque<StateId> = VecDeque::new();

        let depth_one: Vec<StateId> = nodes[Trie::ROOT].next.values().copied().collect();
        for child in depth_one {
            nodes[child].fail = Trie::ROOT;
            queue.push_back(child);
        }

        while let Some(state) = queue.pop_front() {
            let edges: Vec<(char, StateId)> = nodes[state]
                .next
                .iter()
                .map(|(&symbol, &child)| (symbol, child))
                .collect();

            for (symbol, child) in edges {
                queue.push_back(child);

                let mut fail = nodes[state].fail;
                let target = loop {
                    if let Some(&next) = nodes[fail].next.get(&symbol) {
                        break next;
                    }
                    if fail == Trie::ROOT {
                        break Trie::ROOT;
                    }
                    fail = nodes[fail].fail;
                };

                nodes[child].fail = target;
                let inherited = nodes[target].outputs.clone();
                for length in inherited {
                    nodes[child].add_output(length);
                }
            }
        }

        Self { nodes, patterns }
    }

    pub fn start(&self) -> StateId {
        Trie::ROOT
    }

    /// Follows the transition for `symbol`, walking failure links until one
    /// exists or the root is reached.
    pub fn next_state(&self, mut state: StateId, symbol: char) -> StateId {
        loop {
            if let Some(&next) = self.nodes[state].next.get(&symbol) {
                return next;
            }
            if state == Trie::ROOT {
                return Trie::ROOT;
            }
            state = self.nodes[state].fail;
        }
    }

    /// Lengths of every pattern ending at `state`.
    pub fn outputs(&self, state: StateId) -> &[usize] {
        self.nodes[state].outputs()
    }

    pub fn failure(&self, state: StateId) -> StateId {
        self.nodes[state].fail
    }

    /// Lazily reports every occurrence of every pattern in `text`.
    pub fn find_iter<I>(&self, text: I) -> Scanner<'_, I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        Scanner::new(self, text.into_iter())
    }

    pub fn find_all<I>(&self, text: I) -> Vec<Span>
    where
        I: IntoIterator<Item = char>,
    {
        self.find_iter(text).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }
}
