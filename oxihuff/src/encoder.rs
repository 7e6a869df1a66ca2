//! Stream compression (two passes over a rewindable source).

use crate::bitstream::{BitReader, BitWriter};
use crate::code::{Code, CodeTable};
use crate::error::Result;
use crate::freq::FrequencyTable;
use crate::header;
use crate::tree::HuffTree;
use crate::{BITS_PER_WORD, END_MARKER};
use std::io::{Read, Seek, Write};

/// Compress `input` into `output`.
///
/// Pass one reads the source to the end to count frequencies; the source is
/// then rewound and pass two emits each byte's code. The stream is
/// terminated by the end-marker's code and zero-padded to a byte boundary,
/// so the decoder never depends on the container's length.
///
/// The pipeline is pure local state: frequency table, tree, and code table
/// are built per call and dropped with it.
pub fn compress_stream<R: Read + Seek, W: Write>(input: R, output: W) -> Result<()> {
    let mut reader = BitReader::new(input);
    let mut writer = BitWriter::new(output);

    let freqs = FrequencyTable::from_reader(&mut reader)?;
    let tree = HuffTree::from_frequencies(&freqs);
    let codes = CodeTable::from_tree(&tree);

    header::write_magic(&mut writer)?;
    header::write_tree(&tree, &mut writer)?;

    reader.reset()?;
    while !reader.is_eof()? {
        let byte = reader.read_bits(BITS_PER_WORD)? as u16;
        let code = codes
            .get(byte)
            .expect("BUG: every byte counted in pass one has a code");
        write_code(&mut writer, code)?;
    }

    let end = codes
        .get(END_MARKER)
        .expect("BUG: the end marker is always in the tree");
    write_code(&mut writer, end)?;

    writer.flush()?;
    Ok(())
}

fn write_code<W: Write>(writer: &mut BitWriter<W>, code: &Code) -> Result<()> {
    for bit in code.iter() {
        writer.write_bit(bit)?;
    }
    Ok(())
}
