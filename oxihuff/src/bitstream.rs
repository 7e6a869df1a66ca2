//! MSB-first bit stream operations.
//!
//! The `.hf` format packs bits MSB-first (Most Significant Bit first) within
//! bytes, so a 32-bit magic written through [`BitWriter`] lands in the file
//! as its big-endian byte sequence.
//!
//! `BitReader` and `BitWriter` are the two capabilities the codec consumes:
//! "read the next N bits or signal end of input" and "append the low N bits
//! of a value". Compression is two-pass, so the reader also supports
//! [`BitReader::reset`] when the underlying source is seekable.
//!
//! # Example
//!
//! ```
//! use oxihuff::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output);
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! writer.flush().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffError, Result};
use std::io::{Read, Seek, SeekFrom, Write};

/// An MSB-first bit reader wrapping any `Read` implementation.
///
/// Maintains an internal 64-bit buffer so reads can cross byte boundaries
/// without extra I/O calls.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer; valid bits occupy the low `bits_in_buffer` positions.
    buffer: u64,
    /// Number of valid bits in the buffer.
    bits_in_buffer: u8,
    /// Total bits consumed (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Get the current bit position (for error reporting).
    pub fn bit_position(&self) -> u64 {
        self.total_bits_read
    }

    /// Ensure at least `count` bits are buffered.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count {
            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(HuffError::unexpected_eof(self.total_bits_read)),
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer += 8;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Read up to 32 bits from the stream (MSB-first).
    ///
    /// Returns the bits as a `u32` with the first bit read in the most
    /// significant position of the result.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += count as u64;

        Ok(value as u32)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Check whether the reader is at end of stream.
    ///
    /// Only attempts one read when the buffer is empty; a fetched byte is
    /// kept for the next `read_bits` call. I/O errors are surfaced, not
    /// reported as end of stream.
    pub fn is_eof(&mut self) -> Result<bool> {
        if self.bits_in_buffer > 0 {
            return Ok(false);
        }

        loop {
            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(true),
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer = 8;
                    return Ok(false);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Rewind to the start of the source and discard buffered bits.
    ///
    /// Compression reads the source twice (count pass, then emit pass); this
    /// is the rewind between the passes.
    pub fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.total_bits_read = 0;
        Ok(())
    }
}

/// An MSB-first bit writer wrapping any `Write` implementation.
///
/// Accumulates bits and flushes complete bytes to the underlying writer.
/// Call [`BitWriter::flush`] when done to pad the final partial byte with
/// zeros and write it out.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer; pending bits occupy the low `bits_in_buffer` positions.
    buffer: u64,
    /// Number of pending bits in the buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Flush complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value` to the stream (MSB-first).
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };
        let value = value & mask;

        self.buffer = (self.buffer << count) | value as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad the final partial byte with zeros and flush everything through.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer % 8 != 0 {
            let padding = 8 - (self.bits_in_buffer % 8);
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
        }
        self.flush_bytes()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume this `BitWriter`, flushing padding, and return the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
