//! Keyword trie underlying the automaton.
//!
//! Each node owns its outgoing transitions, its failure link and the set of
//! pattern lengths (in symbols) that end at it.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::StateId;

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) next: BTreeMap<char, StateId>,
    pub(crate) fail: StateId,
    pub(crate) outputs: Vec<usize>,
}

impl Node {
    /// Lengths of all patterns ending at this node.
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    pub(crate) fn add_output(&mut self, length: usize) {
        if !self.outputs.contains(&length) {
            self.outputs.push(length);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    pub(crate) nodes: Vec<Node>,
    patterns: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub const ROOT: StateId = 0;

    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Node::default()],
            patterns: 0,
        }
    }

    /// Inserts a pattern. Empty patterns are ignored and return `false`.
    pub fn insert<P: IntoIterator<Item = char>>(&mut self, pattern: P) -> bool {
        let mut state = Self::ROOT;
        let mut length = 0usize;

        for symbol in pattern {
            state = match self.nodes[state].next.get(&symbol) {
                Some(&next) => next,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[state].next.insert(symbol, id);
                    id
                }
            };
            length += 1;
        }

        if length == 0 {
            return false;
        }
        self.nodes[state].add_output(length);
        self.patterns += 1;
        true
    }

    pub fn child(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.nodes.get(state)?.next.get(&symbol).copied()
    }

    pub fn node(&self, state: StateId) -> Option<&Node> {
        self.nodes.get(state)
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }

    /// Number of non-empty patterns inserted (duplicates included).
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }
}
