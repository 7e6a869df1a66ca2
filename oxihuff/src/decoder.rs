//! Stream decompression (single pass, tree-walking state machine).

use crate::END_MARKER;
use crate::bitstream::BitReader;
use crate::error::{HuffError, Result};
use crate::header;
use crate::tree::Node;
use std::io::{Read, Write};

/// Decompress `input` into `output`.
///
/// Verifies the magic constant, rebuilds the tree from the header, then
/// walks the tree one bit at a time: 0 steps left, 1 steps right, and every
/// leaf either emits its byte and restarts at the root or, for the end
/// marker, terminates decoding. Reaching end of input before the end marker
/// means the terminator was cut off and is reported as corruption.
///
/// The output is written byte-at-a-time through `W`; hand in a buffered
/// writer for file targets.
pub fn decompress_stream<R: Read, W: Write>(input: R, mut output: W) -> Result<()> {
    let mut reader = BitReader::new(input);

    header::check_magic(&mut reader)?;
    let tree = header::read_tree(&mut reader)?;

    let mut current = tree.root();
    loop {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(HuffError::UnexpectedEof { position }) => {
                return Err(HuffError::missing_end_marker(position));
            }
            Err(e) => return Err(e),
        };

        current = match tree.node(current) {
            Node::Internal { left, right } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
            Node::Leaf(_) => unreachable!("BUG: the walk restarts at the root, never at a leaf"),
        };

        if let Node::Leaf(symbol) = tree.node(current) {
            if *symbol == END_MARKER {
                break;
            }
            output.write_all(&[*symbol as u8])?;
            current = tree.root();
        }
    }

    output.flush()?;
    Ok(())
}
