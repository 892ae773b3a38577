//! Prefix tree of known identifiers.
//!
//! Nodes live in a single arena and refer to their children by index. Each
//! child has exactly one parent and nodes are never removed, so the tree is
//! dropped in one go with the arena.

use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<u8, usize>,
    terminal: bool,
}

/// Byte-keyed trie answering "which stored word extends this prefix?".
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    nodes: Vec<Node>,
    len: usize,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            len: 0,
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `word`. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = ROOT;
        for &byte in word.as_bytes() {
            node = match self.nodes[node].children.get(&byte) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(byte, child);
                    child
                }
            };
        }

        if self.nodes[node].terminal {
            return false;
        }
        self.nodes[node].terminal = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.locate(word)
            .map(|node| self.nodes[node].terminal)
            .unwrap_or(false)
    }

    /// Longest stored word that starts with `prefix` and is strictly longer
    /// than it.
    ///
    /// Ties between equally long words go to the lexicographically smallest.
    pub fn complete(&self, prefix: &str) -> Option<String> {
        let start = self.locate(prefix)?;

        let mut best: Option<Vec<u8>> = None;
        let mut path = prefix.as_bytes().to_vec();
        let mut stack: Vec<(usize, usize, Option<u8>)> = vec![(start, path.len(), None)];

        // Children are pushed in reverse so they pop in ascending byte order;
        // the first word of a given length seen is then also the smallest.
        while let Some((node, depth, edge)) = stack.pop() {
            path.truncate(depth);
            if let Some(byte) = edge {
                path.push(byte);
            }

            let longer = best.as_ref().map_or(true, |word| path.len() > word.len());
            if node != start && self.nodes[node].terminal && longer {
                best = Some(path.clone());
            }

            for (&byte, &child) in self.nodes[node].children.iter().rev() {
                stack.push((child, path.len(), Some(byte)));
            }
        }

        best.map(|word| String::from_utf8_lossy(&word).into_owned())
    }

    /// Walk `prefix` from the root.
    fn locate(&self, prefix: &str) -> Option<usize> {
        let mut node = ROOT;
        for byte in prefix.as_bytes() {
            node = *self.nodes[node].children.get(byte)?;
        }
        Some(node)
    }
}
