//! Error injection for exercising the decoders.
//!
//! Positions are passed in directly, or drawn from a caller-supplied RNG so
//! that runs can be reproduced with a seeded generator.

use crate::ecc::bits::bytes_to_bits;
use crate::ecc::block::{BlockCodec, Codeword, Decoded};
use crate::ecc::Variant;
use crate::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Returns a copy of `word` with every bit in `positions` inverted.
///
/// Positions must be distinct and inside the word.
pub fn flip_bits(word: &Codeword, positions: &[usize]) -> Result<Codeword> {
    for (i, position) in positions.iter().enumerate() {
        if positions[..i].contains(position) {
            return Err(Error::InvalidInput(format!(
                "bit position {} given more than once",
                position
            )));
        }
    }

    positions
        .iter()
        .try_fold(*word, |word, &position| word.flipped(position))
}

/// Draws `count` distinct bit positions of a `variant` code word, in
/// ascending order.
pub fn random_positions<R: Rng + ?Sized>(
    rng: &mut R,
    variant: Variant,
    count: usize,
) -> Result<Vec<usize>> {
    let width = variant.codeword_bits();
    if count > width {
        return Err(Error::InvalidInput(format!(
            "cannot pick {} distinct positions in a {}-bit code word",
            count, width
        )));
    }

    let mut positions = index::sample(rng, width, count).into_vec();
    positions.sort_unstable();
    Ok(positions)
}

/// One encode / corrupt / decode run on a single data byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// Original data byte
    pub data: u8,
    /// Positions that were flipped
    pub positions: Vec<usize>,
    /// Code word as encoded
    pub encoded: Codeword,
    /// Code word after the flips
    pub corrupted: Codeword,
    /// Decoder output for the corrupted word
    pub decoded: Decoded,
}

impl Trial {
    /// Whether the decoder returned the original data byte
    pub fn recovered(&self) -> bool {
        self.decoded.data == self.data
    }
}

/// Encodes `data`, flips the bits at `positions` and decodes the result.
pub fn run_trial(data: u8, variant: Variant, positions: &[usize]) -> Result<Trial> {
    let codec = BlockCodec::new(variant);
    let encoded = codec.encode(data);
    let corrupted = flip_bits(&encoded, positions)?;
    let decoded = codec.decode_word(&corrupted)?;

    Ok(Trial {
        data,
        positions: positions.to_vec(),
        encoded,
        corrupted,
        decoded,
    })
}

/// Flips `flips_per_block` random distinct bits inside every complete code
/// word of an encoded stream. Trailing bits that do not form a complete word
/// are left alone.
pub fn corrupt_stream<R: Rng + ?Sized>(
    encoded: &[u8],
    variant: Variant,
    flips_per_block: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let width = variant.codeword_bits();
    let mut bits = bytes_to_bits(encoded);

    for block in 0..bits.len() / width {
        for position in random_positions(rng, variant, flips_per_block)? {
            let index = block * width + position;
            let bit = bits[index];
            bits.set(index, !bit);
        }
    }

    Ok(bits.into_vec())
}
