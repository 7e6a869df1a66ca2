//! Per-symbol frequency counting (the first compression pass).

use crate::bitstream::BitReader;
use crate::error::Result;
use crate::{BITS_PER_WORD, END_MARKER, SYMBOL_COUNT};
use std::io::Read;

/// Occurrence counts for every symbol in the Huffman alphabet.
///
/// The alphabet is byte values 0..=255 plus the synthetic end-marker symbol
/// 256. The end-marker never occurs in real input, so its count is pinned to
/// 1 at construction; that guarantees it always receives a code and the
/// decoder always has an unambiguous termination point.
///
/// The table is built once per compression and discarded after tree
/// construction.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count symbol frequencies by exhaustively reading the source.
    ///
    /// Consumes the reader to its end; the caller rewinds it before the
    /// emit pass.
    pub fn from_reader<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let mut counts = [0u64; SYMBOL_COUNT];
        counts[END_MARKER as usize] = 1;

        while !reader.is_eof()? {
            let byte = reader.read_bits(BITS_PER_WORD)?;
            counts[byte as usize] += 1;
        }

        Ok(Self { counts })
    }

    /// Occurrence count for a symbol.
    pub fn count(&self, symbol: u16) -> u64 {
        self.counts[symbol as usize]
    }

    /// Iterate over `(symbol, count)` pairs with nonzero counts, in symbol
    /// order.
    pub fn nonzero(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, count)| *count > 0)
            .map(|(symbol, count)| (symbol as u16, *count))
    }

    /// Number of distinct symbols with nonzero counts (end-marker included).
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_count_bytes() {
        let mut reader = BitReader::new(Cursor::new(b"aabbbz".to_vec()));
        let freqs = FrequencyTable::from_reader(&mut reader).unwrap();

        assert_eq!(freqs.count(b'a' as u16), 2);
        assert_eq!(freqs.count(b'b' as u16), 3);
        assert_eq!(freqs.count(b'z' as u16), 1);
        assert_eq!(freqs.count(b'q' as u16), 0);
        assert_eq!(freqs.count(END_MARKER), 1);
        assert_eq!(freqs.distinct_symbols(), 4);
    }

    #[test]
    fn test_empty_input_keeps_end_marker() {
        let mut reader = BitReader::new(Cursor::new(Vec::new()));
        let freqs = FrequencyTable::from_reader(&mut reader).unwrap();

        assert_eq!(freqs.count(END_MARKER), 1);
        assert_eq!(freqs.distinct_symbols(), 1);
        assert_eq!(freqs.nonzero().collect::<Vec<_>>(), vec![(END_MARKER, 1)]);
    }

    #[test]
    fn test_nonzero_in_symbol_order() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF, 0x00, 0xFF]));
        let freqs = FrequencyTable::from_reader(&mut reader).unwrap();

        let pairs: Vec<_> = freqs.nonzero().collect();
        assert_eq!(pairs, vec![(0x00, 1), (0xFF, 2), (END_MARKER, 1)]);
    }
}
