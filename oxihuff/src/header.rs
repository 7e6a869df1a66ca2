//! Serialized tree header (the self-describing part of the format).
//!
//! The header is a preorder bit encoding of the tree shape, written right
//! after the magic constant:
//!
//! - internal node: bit `0`, then the left subtree, then the right subtree
//! - leaf: bit `1`, then the symbol as a 9-bit value (0..=256)
//!
//! No frequency table or node count is stored; the recursive-descent shape
//! consumes exactly the bits the writer produced, so the reader knows it is
//! done the moment the root's last descendant closes.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{HuffError, Result};
use crate::tree::{HuffTree, Node, NodeId};
use crate::{END_MARKER, MAGIC, SYMBOL_BITS, SYMBOL_COUNT};
use std::io::{Read, Write};

/// Hard cap on header nesting depth.
///
/// A well-formed tree has at most 257 leaves and therefore at most 256
/// levels of internal nodes; anything deeper is corruption, and the cap
/// keeps hostile headers from growing the pending stack without bound.
pub const MAX_TREE_DEPTH: usize = 257;

/// Write the 32-bit magic constant that opens every compressed stream.
pub fn write_magic<W: Write>(writer: &mut BitWriter<W>) -> Result<()> {
    writer.write_bits(MAGIC, 32)
}

/// Read and verify the magic constant. Any other value is a format error.
pub fn check_magic<R: Read>(reader: &mut BitReader<R>) -> Result<()> {
    let found = reader.read_bits(32)?;
    if found != MAGIC {
        return Err(HuffError::invalid_magic(MAGIC, found));
    }
    Ok(())
}

/// Serialize the tree shape in preorder.
///
/// Iterative: the right child is pushed before the left so the left subtree
/// is emitted first, exactly mirroring the reader's descent.
pub fn write_tree<W: Write>(tree: &HuffTree, writer: &mut BitWriter<W>) -> Result<()> {
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Internal { left, right } => {
                writer.write_bit(false)?;
                stack.push(*right);
                stack.push(*left);
            }
            Node::Leaf(symbol) => {
                writer.write_bit(true)?;
                writer.write_bits(*symbol as u32, SYMBOL_BITS)?;
            }
        }
    }

    Ok(())
}

/// Deserialize a tree header.
///
/// Iterative preorder parse with a pending-parent stack: a `0` bit opens an
/// internal node waiting for two children, a `1` bit attaches a leaf. The
/// parse is complete when no internal node is missing a child.
///
/// Rejects truncation mid-header, leaf values above the end marker, nesting
/// past [`MAX_TREE_DEPTH`], more leaves than the alphabet holds, and the
/// degenerate single-leaf tree (which has no encoding path).
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffTree> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut pending: Vec<NodeId> = Vec::new();
    let mut leaves = 0usize;

    loop {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(HuffError::UnexpectedEof { position }) => {
                return Err(HuffError::truncated_header(position));
            }
            Err(e) => return Err(e),
        };

        let id = nodes.len();
        let node = if bit {
            let value = match reader.read_bits(SYMBOL_BITS) {
                Ok(value) => value,
                Err(HuffError::UnexpectedEof { position }) => {
                    return Err(HuffError::truncated_header(position));
                }
                Err(e) => return Err(e),
            };
            if value > END_MARKER as u32 {
                return Err(HuffError::invalid_header(format!(
                    "leaf value {value} out of range 0..={END_MARKER}"
                )));
            }
            leaves += 1;
            if leaves > SYMBOL_COUNT {
                return Err(HuffError::invalid_header(format!(
                    "more than {SYMBOL_COUNT} leaves"
                )));
            }
            Node::Leaf(value as u16)
        } else {
            if pending.len() >= MAX_TREE_DEPTH {
                return Err(HuffError::invalid_header(format!(
                    "tree nesting exceeds {MAX_TREE_DEPTH}"
                )));
            }
            // Children are patched in as they arrive; index 0 is always the
            // root, so it can double as the "unset" sentinel.
            Node::Internal { left: 0, right: 0 }
        };
        nodes.push(node);

        if id > 0 {
            let parent = *pending
                .last()
                .expect("BUG: non-root node always has a pending parent");
            match &mut nodes[parent] {
                Node::Internal { left, right } => {
                    if *left == 0 {
                        *left = id;
                    } else {
                        *right = id;
                        pending.pop();
                    }
                }
                Node::Leaf(_) => unreachable!("BUG: only internal nodes are pending"),
            }
        }

        if !bit {
            pending.push(id);
        }
        if pending.is_empty() {
            break;
        }
    }

    if nodes.len() == 1 {
        return Err(HuffError::invalid_header(
            "single-leaf tree carries no codes",
        ));
    }

    Ok(HuffTree::from_parts(nodes, 0))
}
