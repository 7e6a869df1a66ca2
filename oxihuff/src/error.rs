//! Error types for Huffman compression and decompression.

use std::io;
use thiserror::Error;

/// Huffman codec errors.
///
/// Every decode-side variant is terminal: a malformed stream is treated as
/// corruption, never as a condition to recover from.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream does not start with the Huffman magic constant.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u32,
        /// Value actually read from the stream.
        found: u32,
    },

    /// The stream ended while a tree node or leaf value was expected.
    #[error("Truncated tree header at bit position {bit_position}")]
    TruncatedHeader {
        /// Bit position where the header broke off.
        bit_position: u64,
    },

    /// The tree header decoded, but describes an impossible tree.
    #[error("Invalid tree header: {message}")]
    InvalidHeader {
        /// Description of the structural problem.
        message: String,
    },

    /// The compressed body ended before the end-marker code.
    #[error("Compressed body ended without end marker at bit position {bit_position}")]
    MissingEndMarker {
        /// Bit position where the body broke off.
        bit_position: u64,
    },

    /// Unexpected end of data in the bit stream.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },
}

/// Result type alias for Huffman operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create a truncated header error.
    pub fn truncated_header(bit_position: u64) -> Self {
        Self::TruncatedHeader { bit_position }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a missing end marker error.
    pub fn missing_end_marker(bit_position: u64) -> Self {
        Self::MissingEndMarker { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }
}
