//! Encoding and decoding of a single 8-bit data block.
//!
//! A code word is systematic: positions 0..8 hold the data bits (most
//! significant bit first) and positions 8.. hold one parity bit per row of the
//! parity-check matrix, where
//!
//! ```text
//! parity[i] = XOR of data[j] over all j < 8 with H[i][j] = 1
//! ```
//!
//! Decoding computes the syndrome `H · r`, resolves a nonzero syndrome to one
//! or two positions and flips them in a copy of the received word. The input
//! slice is never modified.

use crate::ecc::locator::{locate, ErrorLocation};
use crate::ecc::matrix::{Syndrome, DATA_BITS};
use crate::ecc::Variant;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt;

/// Storage large enough for the longest code word
type WordBits = BitArr!(for 16, in u8, Msb0);

/// A 12-bit (SEC) or 16-bit (DEC) code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: WordBits,
    variant: Variant,
}

impl Codeword {
    /// Builds a code word from exactly `variant.codeword_bits()` bits.
    pub fn from_bits(bits: &BitSlice<u8, Msb0>, variant: Variant) -> Result<Self> {
        let width = variant.codeword_bits();
        if bits.len() != width {
            return Err(Error::BlockLength {
                expected: width,
                actual: bits.len(),
            });
        }
        Ok(Self::zero_padded(bits, variant))
    }

    /// Copies up to `variant.codeword_bits()` bits, filling the rest with zeros.
    fn zero_padded(bits: &BitSlice<u8, Msb0>, variant: Variant) -> Self {
        let mut word = WordBits::ZERO;
        let len = bits.len().min(variant.codeword_bits());
        word[..len].copy_from_bitslice(&bits[..len]);
        Codeword {
            bits: word,
            variant,
        }
    }

    /// Code variant this word belongs to
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of bits in the word
    pub fn width(&self) -> usize {
        self.variant.codeword_bits()
    }

    /// All bits of the word
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits[..self.width()]
    }

    /// The data byte carried in positions 0..8
    pub fn data(&self) -> u8 {
        self.bits.as_raw_slice()[0]
    }

    /// The parity bits in positions 8..
    pub fn parity(&self) -> &BitSlice<u8, Msb0> {
        &self.bits[DATA_BITS..self.width()]
    }

    /// Returns the bit at `position`, or `None` past the end of the word.
    pub fn bit(&self, position: usize) -> Option<bool> {
        self.as_bitslice().get(position).map(|bit| *bit)
    }

    /// Returns a copy of this word with the bit at `position` inverted.
    pub fn flipped(&self, position: usize) -> Result<Self> {
        let width = self.width();
        if position >= width {
            return Err(Error::PositionOutOfRange { position, width });
        }

        let mut word = *self;
        let bit = word.bits[position];
        word.bits.set(position, !bit);
        Ok(word)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.as_bitslice() {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}

/// What the decoder did to a received word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The syndrome was zero
    Clean,
    /// The located bits were flipped
    Corrected(ErrorLocation),
    /// The syndrome was nonzero but matched no error pattern; the word was
    /// passed through unchanged
    Uncorrectable(Syndrome),
}

/// Output of decoding one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Recovered data byte
    pub data: u8,
    /// Correction applied to the received word
    pub correction: Correction,
}

/// Encoder/decoder for one code variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockCodec {
    variant: Variant,
}

impl BlockCodec {
    /// Creates a codec for the given variant
    pub fn new(variant: Variant) -> Self {
        BlockCodec { variant }
    }

    /// Creates the single-error-correcting (12, 8) codec
    pub fn sec() -> Self {
        Self::new(Variant::Single)
    }

    /// Creates the double-error-correcting (16, 8) codec
    pub fn dec() -> Self {
        Self::new(Variant::Double)
    }

    /// Variant this codec works with
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Encodes one data byte into a systematic code word.
    pub fn encode(&self, data: u8) -> Codeword {
        let matrix = self.variant.matrix();
        let data_bits = data.view_bits::<Msb0>();

        let mut bits = WordBits::ZERO;
        bits.as_raw_mut_slice()[0] = data;
        for row in 0..matrix.rows() {
            let parity = data_bits
                .iter_ones()
                .filter(|&col| matrix.get(row, col))
                .count()
                % 2
                == 1;
            bits.set(DATA_BITS + row, parity);
        }

        Codeword {
            bits,
            variant: self.variant,
        }
    }

    /// Computes the syndrome of a received word. Missing trailing bits count
    /// as zeros.
    pub fn syndrome(&self, received: &BitSlice<u8, Msb0>) -> Syndrome {
        self.variant.matrix().syndrome(received)
    }

    /// Decodes a received word, correcting the errors the code can locate.
    ///
    /// A word shorter than the code word length is zero-padded on the right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlockLength`] if `received` is empty or longer than a
    /// code word.
    pub fn decode(&self, received: &BitSlice<u8, Msb0>) -> Result<Decoded> {
        let width = self.variant.codeword_bits();
        if received.is_empty() || received.len() > width {
            return Err(Error::BlockLength {
                expected: width,
                actual: received.len(),
            });
        }

        Ok(self.correct(Codeword::zero_padded(received, self.variant)))
    }

    /// Decodes a code word of this codec's variant.
    pub fn decode_word(&self, word: &Codeword) -> Result<Decoded> {
        if word.variant() != self.variant {
            return Err(Error::InvalidInput(format!(
                "{} code word given to a {} codec",
                word.variant(),
                self.variant
            )));
        }
        Ok(self.correct(*word))
    }

    fn correct(&self, mut word: Codeword) -> Decoded {
        let syndrome = self.syndrome(word.as_bitslice());
        if syndrome.is_zero() {
            return Decoded {
                data: word.data(),
                correction: Correction::Clean,
            };
        }

        let correction = match locate(self.variant, syndrome) {
            Some(location) => {
                for position in location.positions() {
                    let bit = word.bits[position];
                    word.bits.set(position, !bit);
                }
                Correction::Corrected(location)
            }
            None => Correction::Uncorrectable(syndrome),
        };

        Decoded {
            data: word.data(),
            correction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_bits(bits: [u8; 8]) -> u8 {
        bits.iter().fold(0u8, |acc, &b| (acc << 1) | b)
    }

    #[test]
    fn test_sec_encode_known_word() {
        let data = data_bits([1, 0, 0, 1, 1, 0, 1, 0]);
        let word = BlockCodec::sec().encode(data);
        assert_eq!(word.to_string(), "100110101000");
        assert_eq!(word.data(), data);
        assert_eq!(word.width(), 12);
    }

    #[test]
    fn test_dec_encode_known_word() {
        let data = data_bits([1, 0, 0, 1, 1, 0, 1, 0]);
        let word = BlockCodec::dec().encode(data);
        assert_eq!(word.to_string(), "1001101000100010");
        assert_eq!(word.parity().len(), 8);
    }

    #[test]
    fn test_parity_follows_matrix_rows() {
        // Data bit 7 alone toggles exactly the rows of column 7
        let word = BlockCodec::sec().encode(0b0000_0001);
        assert_eq!(word.to_string(), "000000011101");
        let word = BlockCodec::dec().encode(0b1000_0000);
        assert_eq!(word.to_string(), "1000000011101101");
    }

    #[test]
    fn test_code_words_have_zero_syndrome() {
        for variant in [Variant::Single, Variant::Double] {
            let codec = BlockCodec::new(variant);
            for data in 0..=u8::MAX {
                let word = codec.encode(data);
                assert!(codec.syndrome(word.as_bitslice()).is_zero());
            }
        }
    }

    #[test]
    fn test_sec_scenario_flip_position_3() {
        let codec = BlockCodec::sec();
        let data = data_bits([1, 0, 0, 1, 1, 0, 1, 0]);
        let corrupted = codec.encode(data).flipped(3).unwrap();
        let decoded = codec.decode(corrupted.as_bitslice()).unwrap();
        assert_eq!(decoded.data, data);
        assert_eq!(
            decoded.correction,
            Correction::Corrected(ErrorLocation::Single(3))
        );
    }

    #[test]
    fn test_dec_scenario_flip_positions_2_and_9() {
        let codec = BlockCodec::dec();
        let data = data_bits([1, 0, 0, 1, 1, 0, 1, 0]);
        let corrupted = codec.encode(data).flipped(2).unwrap().flipped(9).unwrap();
        let decoded = codec.decode_word(&corrupted).unwrap();
        assert_eq!(decoded.data, data);
        assert_eq!(
            decoded.correction,
            Correction::Corrected(ErrorLocation::Pair(2, 9))
        );
    }

    #[test]
    fn test_decode_does_not_modify_input() {
        let codec = BlockCodec::sec();
        let corrupted = codec.encode(0x5A).flipped(0).unwrap();
        let snapshot = corrupted;
        codec.decode_word(&corrupted).unwrap();
        assert_eq!(corrupted, snapshot);
    }

    #[test]
    fn test_short_word_is_zero_padded() {
        let codec = BlockCodec::sec();
        // 0x80 encodes with parity 1100; dropping the trailing zeros must not
        // change the outcome
        let word = codec.encode(0x80);
        assert_eq!(word.to_string(), "100000001100");
        let truncated = &word.as_bitslice()[..10];
        let decoded = codec.decode(truncated).unwrap();
        assert_eq!(decoded.data, 0x80);
        assert_eq!(decoded.correction, Correction::Clean);
    }

    #[test]
    fn test_block_length_errors() {
        let codec = BlockCodec::dec();
        assert!(matches!(
            codec.decode(BitSlice::empty()),
            Err(Error::BlockLength {
                expected: 16,
                actual: 0
            })
        ));
        let long = bitvec![u8, Msb0; 0; 17];
        assert!(matches!(
            codec.decode(&long),
            Err(Error::BlockLength { actual: 17, .. })
        ));
        assert!(Codeword::from_bits(&long[..12], Variant::Double).is_err());
        assert!(Codeword::from_bits(&long[..12], Variant::Single).is_ok());
    }

    #[test]
    fn test_variant_mismatch_is_rejected() {
        let word = BlockCodec::sec().encode(1);
        assert!(matches!(
            BlockCodec::dec().decode_word(&word),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_uncorrectable_word_passes_through() {
        let codec = BlockCodec::sec();
        // Flips at 0, 1 and 4 leave syndrome 0b1111, which matches no column
        let word = codec.encode(0x00);
        let corrupted = word.flipped(0).unwrap().flipped(1).unwrap().flipped(4).unwrap();
        let decoded = codec.decode_word(&corrupted).unwrap();
        assert_eq!(decoded.data, corrupted.data());
        assert!(matches!(decoded.correction, Correction::Uncorrectable(s) if s.mask() == 0b1111));
    }

    #[test]
    fn test_flipped_bounds() {
        let word = BlockCodec::sec().encode(0xFF);
        assert!(word.flipped(11).is_ok());
        assert!(matches!(
            word.flipped(12),
            Err(Error::PositionOutOfRange {
                position: 12,
                width: 12
            })
        ));
        assert_eq!(word.bit(0), Some(true));
        assert_eq!(word.bit(12), None);
    }
}
