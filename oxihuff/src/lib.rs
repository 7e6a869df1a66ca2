//! # OxiHuff: Pure Rust per-file Huffman compression
//!
//! This crate losslessly compresses an arbitrary byte stream with a Huffman
//! code trained on that stream alone, and decompresses it bit-exactly.
//!
//! ## Features
//!
//! - **Pure Rust**: no C dependencies, `#![forbid(unsafe_code)]`
//! - **Self-describing format**: the optimal prefix tree itself is the
//!   header; no frequency table is stored
//! - **Deterministic**: tree construction pins its tie-break order, so the
//!   same input always produces the same bytes
//! - **Robust decoding**: corrupt magic, truncated headers, and missing
//!   terminators are reported as structured errors, never panics
//!
//! ## Format
//!
//! MSB-first bit packing throughout:
//!
//! | Field | Width | Meaning |
//! |-------|-------|---------|
//! | Magic | 32 bits | `0xFACE8201`; anything else is rejected |
//! | Tree header | variable | preorder: `0` = internal (left then right), `1` + 9-bit value = leaf |
//! | Body | variable | one code per input byte, closed by the end-marker code |
//!
//! The alphabet is byte values 0..=255 plus a synthetic end-marker symbol
//! (256) whose code terminates the body, so decoding needs no external
//! length. Compression reads the source twice (count, then emit);
//! decompression is a single pass.
//!
//! ## Example
//!
//! ```rust
//! let original = b"go go gophers";
//!
//! let compressed = oxihuff::compress(original).unwrap();
//! let decompressed = oxihuff::decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! Files or other seekable sources go through the stream API:
//!
//! ```rust
//! use std::io::Cursor;
//!
//! let mut compressed = Vec::new();
//! oxihuff::compress_stream(Cursor::new(b"stream me".to_vec()), &mut compressed).unwrap();
//!
//! let mut restored = Vec::new();
//! oxihuff::decompress_stream(Cursor::new(compressed), &mut restored).unwrap();
//! assert_eq!(restored, b"stream me");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod code;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod freq;
pub mod header;
pub mod tree;

pub use bitstream::{BitReader, BitWriter};
pub use code::{Code, CodeTable};
pub use decoder::decompress_stream;
pub use encoder::compress_stream;
pub use error::{HuffError, Result};
pub use freq::FrequencyTable;
pub use tree::{HuffTree, Node, NodeId};

/// Bits per input symbol word (one byte).
pub const BITS_PER_WORD: u8 = 8;

/// Number of real byte values.
pub const ALPHABET_SIZE: usize = 256;

/// The synthetic end-of-data symbol; never occurs in real input.
pub const END_MARKER: u16 = ALPHABET_SIZE as u16;

/// Alphabet size including the end marker.
pub const SYMBOL_COUNT: usize = ALPHABET_SIZE + 1;

/// Width of a serialized leaf value: wide enough for 0..=256.
pub const SYMBOL_BITS: u8 = BITS_PER_WORD + 1;

/// Magic constant opening every compressed stream.
pub const MAGIC: u32 = 0xFACE_8201;

/// Compress a byte slice into a fresh `Vec`.
///
/// Convenience wrapper around [`compress_stream`] for in-memory data.
///
/// # Example
///
/// ```rust
/// let compressed = oxihuff::compress(b"aaaaaaaabbbbcc").unwrap();
/// assert_eq!(&compressed[..4], &[0xFA, 0xCE, 0x82, 0x01]);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    encoder::compress_stream(std::io::Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress a byte slice into a fresh `Vec`.
///
/// Convenience wrapper around [`decompress_stream`] for in-memory data.
///
/// # Example
///
/// ```rust
/// let compressed = oxihuff::compress(b"round and round").unwrap();
/// assert_eq!(oxihuff::decompress(&compressed).unwrap(), b"round and round");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decoder::decompress_stream(std::io::Cursor::new(data), &mut output)?;
    Ok(output)
}
