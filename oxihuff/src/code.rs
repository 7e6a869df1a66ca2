//! Code table derivation (tree leaf -> bit-string).

use crate::SYMBOL_COUNT;
use crate::tree::{HuffTree, Node};
use std::fmt;

/// A variable-length Huffman code: the root-to-leaf path of a symbol.
///
/// Stored as an owned bit sequence rather than a packed integer because a
/// 257-leaf tree can legally assign codes longer than 64 bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the empty code (only ever an intermediate traversal state).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append one path bit (false = left, true = right).
    pub(crate) fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Iterate over the bits, most significant (root edge) first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() < other.len() && other.bits[..self.len()] == self.bits[..]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol-to-code mapping derived from a prefix tree.
///
/// Built fresh per compression and never persisted; the decoder walks the
/// tree directly instead of materializing a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree and assign each leaf its root-to-leaf path.
    ///
    /// Preorder with an explicit stack; the left child is pushed last so it
    /// is visited first, keeping assignment order deterministic. Left edges
    /// append 0, right edges append 1.
    pub fn from_tree(tree: &HuffTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut stack = vec![(tree.root(), Code::default())];

        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf(symbol) => codes[*symbol as usize] = Some(path),
                Node::Internal { left, right } => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    let mut right_path = path;
                    right_path.push(true);
                    stack.push((*right, right_path));
                    stack.push((*left, left_path));
                }
            }
        }

        Self { codes }
    }

    /// Code for a symbol, if the symbol appears in the tree.
    pub fn get(&self, symbol: u16) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Iterate over `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u16, c)))
    }

    /// Shortest assigned code length, if any symbol has a code.
    pub fn min_code_len(&self) -> Option<usize> {
        self.iter().map(|(_, code)| code.len()).min()
    }

    /// Longest assigned code length, if any symbol has a code.
    pub fn max_code_len(&self) -> Option<usize> {
        self.iter().map(|(_, code)| code.len()).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::END_MARKER;
    use crate::bitstream::BitReader;
    use crate::freq::FrequencyTable;
    use std::io::Cursor;

    fn table_of(data: &[u8]) -> CodeTable {
        let mut reader = BitReader::new(Cursor::new(data.to_vec()));
        let freqs = FrequencyTable::from_reader(&mut reader).unwrap();
        CodeTable::from_tree(&HuffTree::from_frequencies(&freqs))
    }

    #[test]
    fn test_two_leaf_codes() {
        let codes = table_of(&[0x41; 10]);

        assert_eq!(codes.get(END_MARKER).unwrap().to_string(), "0");
        assert_eq!(codes.get(0x41).unwrap().to_string(), "1");
        assert_eq!(codes.get(0x42), None);
    }

    #[test]
    fn test_known_layout() {
        // Tree for "aab": root = (a, (b, end)).
        let codes = table_of(b"aab");

        assert_eq!(codes.get(b'a' as u16).unwrap().to_string(), "0");
        assert_eq!(codes.get(b'b' as u16).unwrap().to_string(), "10");
        assert_eq!(codes.get(END_MARKER).unwrap().to_string(), "11");
    }

    #[test]
    fn test_prefix_free() {
        let codes = table_of(b"this input uses a handful of distinct symbols!");

        let all: Vec<_> = codes.iter().collect();
        assert!(all.len() > 2);
        for (i, (_, a)) in all.iter().enumerate() {
            for (j, (_, b)) in all.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbols_get_short_codes() {
        let mut data = vec![b'x'; 100];
        data.extend_from_slice(b"yz");
        let codes = table_of(&data);

        let x = codes.get(b'x' as u16).unwrap().len();
        let y = codes.get(b'y' as u16).unwrap().len();
        let z = codes.get(b'z' as u16).unwrap().len();
        assert!(x <= y);
        assert!(x <= z);
    }

    #[test]
    fn test_code_lengths_weighted_by_kraft() {
        // A prefix-free complete code satisfies sum(2^-len) == 1.
        let codes = table_of(b"abracadabra");

        let kraft: f64 = codes.iter().map(|(_, c)| 0.5f64.powi(c.len() as i32)).sum();
        assert!((kraft - 1.0).abs() < 1e-9);
    }
}
