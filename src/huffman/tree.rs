use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
        seq: usize,
    },
    /// `left` is reached on a 0 bit, `right` on a 1 bit.
    Internal {
        weight: u64,
        seq: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn seq(&self) -> usize {
        match self {
            Node::Leaf { seq, .. } | Node::Internal { seq, .. } => *seq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Min-heap entry: the lowest `(weight, seq)` pops first.
struct Pending(Node);

impl Pending {
    fn key(&self) -> (u64, usize) {
        (self.0.weight(), self.0.seq())
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree greedily. Leaves get sequence numbers in ascending
    /// symbol order and merged nodes continue the counter, so equal weights
    /// always resolve the same way and the decoder rebuilds an identical tree.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut heap = table
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| {
                Pending(Node::Leaf {
                    symbol,
                    weight,
                    seq,
                })
            })
            .collect::<BinaryHeap<_>>();
        let mut seq = heap.len();

        while let Some(Pending(left)) = heap.pop() {
            let Pending(right) = match heap.pop() {
                Some(node) => node,
                None => {
                    let tree = Self { root: left };
                    debug!(
                        weight = tree.weight(),
                        depth = tree.depth(),
                        "built huffman tree"
                    );
                    return Ok(tree);
                }
            };

            heap.push(Pending(Node::Internal {
                weight: left.weight() + right.weight(),
                seq,
                left: Box::new(left),
                right: Box::new(right),
            }));
            seq += 1;
        }

        Err(Error::InvalidFrequencyTable(
            "cannot build a tree from an empty table".into(),
        ))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Longest root-to-leaf path. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
