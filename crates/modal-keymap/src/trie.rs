//! A compressed trie over `char` sequences, generic over its terminal
//! output type. Resolving a buffer against it yields one of three
//! outcomes (`Resolution::{Matched, NeedMore, FallbackLiteral}`): a
//! complete match, a strict prefix of one or more registered sequences
//! still waiting on more input, or a dead end that falls back to the
//! buffer's first key. It resolves both the operator-suffix sequences
//! this crate needs (`iw`, `i"`, `ib`, `gg`, …) and, if a future binding
//! set needs it, any other closed vocabulary of char sequences to a
//! result value.

use smallvec::SmallVec;
use tracing::trace;

#[derive(Debug, Clone)]
struct Edge {
    ch: char,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node<O> {
    terminal: Option<O>,
    edges: SmallVec<[Edge; 4]>,
}

impl<O> Node<O> {
    fn new() -> Self {
        Self { terminal: None, edges: SmallVec::new() }
    }
}

#[derive(Debug)]
pub struct MappingTrie<O> {
    nodes: Vec<Node<O>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<O> {
    Matched { consumed: usize, output: O },
    NeedMore,
    FallbackLiteral(char),
}

impl<O: Clone> MappingTrie<O> {
    pub fn build(specs: Vec<(&str, O)>) -> Self {
        let mut trie = MappingTrie { nodes: vec![Node::new()] };
        for (seq, output) in specs {
            let mut cur = 0usize;
            for ch in seq.chars() {
                let existing = trie.nodes[cur].edges.iter().position(|e| e.ch == ch);
                cur = match existing {
                    Some(i) => trie.nodes[cur].edges[i].next,
                    None => {
                        let new_idx = trie.nodes.len();
                        trie.nodes.push(Node::new());
                        trie.nodes[cur].edges.push(Edge { ch, next: new_idx });
                        new_idx
                    }
                };
            }
            trie.nodes[cur].terminal = Some(output);
        }
        trie
    }

    /// Resolves the longest prefix of `buffer` with a registered terminal.
    /// A strict prefix of one or more sequences with no terminal yet
    /// reached yields `NeedMore`; no edge at all from the root yields
    /// `FallbackLiteral`.
    pub fn resolve(&self, buffer: &[char]) -> Resolution<O> {
        let mut node_idx = 0usize;
        for (i, ch) in buffer.iter().enumerate() {
            let edge = self.nodes[node_idx].edges.iter().find(|e| e.ch == *ch);
            let Some(edge) = edge else {
                return if node_idx == 0 {
                    Resolution::FallbackLiteral(buffer[0])
                } else if let Some(out) = &self.nodes[node_idx].terminal {
                    Resolution::Matched { consumed: i, output: out.clone() }
                } else {
                    Resolution::FallbackLiteral(buffer[0])
                };
            };
            node_idx = edge.next;
            trace!(target = "keymap.trie", step = i, ch = %ch, node = node_idx, "advance");
            if let Some(out) = &self.nodes[node_idx].terminal {
                if self.nodes[node_idx].edges.is_empty() {
                    return Resolution::Matched { consumed: i + 1, output: out.clone() };
                }
            }
        }
        if buffer.is_empty() {
            return Resolution::NeedMore;
        }
        match &self.nodes[node_idx].terminal {
            Some(out) => Resolution::Matched { consumed: buffer.len(), output: out.clone() },
            None => Resolution::NeedMore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_match() {
        let trie = MappingTrie::build(vec![("w", 1u8)]);
        assert_eq!(trie.resolve(&['w']), Resolution::Matched { consumed: 1, output: 1 });
    }

    #[test]
    fn needs_more_on_strict_prefix() {
        let trie = MappingTrie::build(vec![("iw", 1u8), ("i\"", 2u8)]);
        assert_eq!(trie.resolve(&['i']), Resolution::NeedMore);
    }

    #[test]
    fn resolves_after_prefix_completes() {
        let trie = MappingTrie::build(vec![("iw", 1u8), ("i\"", 2u8)]);
        assert_eq!(trie.resolve(&['i', 'w']), Resolution::Matched { consumed: 2, output: 1 });
    }

    #[test]
    fn fallback_when_no_edge_from_root() {
        let trie = MappingTrie::build(vec![("iw", 1u8)]);
        assert_eq!(trie.resolve(&['z']), Resolution::FallbackLiteral('z'));
    }

    #[test]
    fn no_match_after_partial_advance_falls_back_to_first_key() {
        let trie = MappingTrie::build(vec![("iw", 1u8)]);
        assert_eq!(trie.resolve(&['i', 'z']), Resolution::FallbackLiteral('i'));
    }
}
