//! Huffman prefix tree construction (weighted merge).

use crate::freq::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a node inside a [`HuffTree`] arena.
pub type NodeId = usize;

/// A node of the prefix tree.
///
/// Leaves and internal nodes are disjoint: a leaf carries a symbol and no
/// children, an internal node carries exactly two children and no symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf carrying a symbol value (0..=256).
    Leaf(u16),
    /// Internal node owning two subtrees by arena index.
    Internal {
        /// Left child (code bit 0).
        left: NodeId,
        /// Right child (code bit 1).
        right: NodeId,
    },
}

/// An immutable full binary prefix tree stored as an index arena.
///
/// Children are addressed by index rather than owned pointers, which keeps
/// the preorder header walk and the decoder state machine free of any
/// lifetime juggling. The tree is owned by a single compression or
/// decompression session and dropped with it.
#[derive(Debug, Clone)]
pub struct HuffTree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Heap entry ordered by (weight, insertion sequence), lowest first.
///
/// The sequence number pins the tie-break: equal weights resolve in the
/// order the nodes entered the heap, so building the same frequency table
/// twice yields a bit-identical tree and therefore a bit-identical stream.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the lowest entry first.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HuffTree {
    /// Build the optimal prefix tree for a frequency table.
    ///
    /// Classic weighted merge: seed one leaf per nonzero symbol, then
    /// repeatedly fuse the two lightest nodes until one root remains. The
    /// first node removed becomes the left child, the second the right.
    ///
    /// The end-marker's forced count keeps the heap nonempty even for empty
    /// input; if it is the only survivor, a zero-weight placeholder leaf for
    /// symbol 0 is seeded as well, so the tree always has at least two
    /// leaves and every code has length >= 1.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut nodes = Vec::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        for (symbol, count) in freqs.nonzero() {
            let node = nodes.len();
            nodes.push(Node::Leaf(symbol));
            heap.push(HeapEntry {
                weight: count,
                seq,
                node,
            });
            seq += 1;
        }

        if heap.len() == 1 {
            let node = nodes.len();
            nodes.push(Node::Leaf(0));
            heap.push(HeapEntry {
                weight: 0,
                seq,
                node,
            });
            seq += 1;
        }

        while heap.len() > 1 {
            let first = heap.pop().expect("BUG: heap holds at least two entries");
            let second = heap.pop().expect("BUG: heap holds at least two entries");
            let node = nodes.len();
            nodes.push(Node::Internal {
                left: first.node,
                right: second.node,
            });
            heap.push(HeapEntry {
                weight: first.weight + second.weight,
                seq,
                node,
            });
            seq += 1;
        }

        let root = heap
            .pop()
            .expect("BUG: the forced end marker keeps the heap nonempty")
            .node;

        Self { nodes, root }
    }

    /// Assemble a tree from parsed parts (used by the header reader).
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Arena index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by arena index.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not obtained from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total node count (leaves plus internal nodes).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no nodes. Never the case for built trees.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, i.e. distinct symbols carried by the tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::END_MARKER;
    use crate::bitstream::BitReader;
    use std::io::Cursor;

    fn freqs_of(data: &[u8]) -> FrequencyTable {
        let mut reader = BitReader::new(Cursor::new(data.to_vec()));
        FrequencyTable::from_reader(&mut reader).unwrap()
    }

    fn leaf_symbols(tree: &HuffTree) -> Vec<u16> {
        (0..tree.len())
            .filter_map(|id| match tree.node(id) {
                Node::Leaf(symbol) => Some(*symbol),
                Node::Internal { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_full_binary_tree() {
        let tree = HuffTree::from_frequencies(&freqs_of(b"abracadabra"));

        // a, b, c, d, r plus the end marker
        assert_eq!(tree.leaf_count(), 6);
        // A full binary tree with n leaves has n - 1 internal nodes.
        assert_eq!(tree.len(), 11);
        assert!(matches!(tree.node(tree.root()), Node::Internal { .. }));
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        // 'a' x2, 'b' x1, end marker x1. The two weight-1 leaves merge
        // first; 'b' was inserted before the end marker, so it goes left.
        let tree = HuffTree::from_frequencies(&freqs_of(b"aab"));

        let Node::Internal { left, right } = tree.node(tree.root()) else {
            panic!("root must be internal");
        };
        // Tie at weight 2: the 'a' leaf (seq 0) beats the merged node.
        assert_eq!(tree.node(*left), &Node::Leaf(b'a' as u16));
        let Node::Internal { left, right } = tree.node(*right) else {
            panic!("expected merged weight-2 node on the right");
        };
        assert_eq!(tree.node(*left), &Node::Leaf(b'b' as u16));
        assert_eq!(tree.node(*right), &Node::Leaf(END_MARKER));
    }

    #[test]
    fn test_empty_input_gets_placeholder_leaf() {
        let tree = HuffTree::from_frequencies(&freqs_of(b""));

        assert_eq!(tree.leaf_count(), 2);
        let mut symbols = leaf_symbols(&tree);
        symbols.sort_unstable();
        assert_eq!(symbols, vec![0, END_MARKER]);
    }

    #[test]
    fn test_single_distinct_byte() {
        let tree = HuffTree::from_frequencies(&freqs_of(&[0x41; 1000]));

        // Two leaves, one internal root; no placeholder needed.
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.len(), 3);
        let mut symbols = leaf_symbols(&tree);
        symbols.sort_unstable();
        assert_eq!(symbols, vec![0x41, END_MARKER]);
    }

    #[test]
    #[should_panic]
    fn test_node_out_of_range_panics() {
        let tree = HuffTree::from_frequencies(&freqs_of(b"aab"));
        let _ = tree.node(tree.len());
    }

    #[test]
    fn test_deterministic_rebuild() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let a = HuffTree::from_frequencies(&freqs_of(data));
        let b = HuffTree::from_frequencies(&freqs_of(data));

        assert_eq!(a.len(), b.len());
        for id in 0..a.len() {
            assert_eq!(a.node(id), b.node(id));
        }
        assert_eq!(a.root(), b.root());
    }
}
