//! Splits byte streams into blocks and drives the block codec.
//!
//! Encoding turns every input byte into one code word and packs the
//! concatenated words into bytes. Decoding unpacks the stream, cuts it into
//! code-word-sized chunks and keeps the data byte of each.
//!
//! The last chunk of an encoded stream may be short:
//! - fewer than 8 bits: byte-alignment padding added by the encoder (SEC
//!   streams with an odd number of words); it carries no data and is dropped
//! - 8 bits or more: a truncated code word; it is zero-padded and decoded,
//!   which may corrupt the last output byte

use crate::ecc::bits::{bits_to_bytes, bytes_to_bits};
use crate::ecc::block::{BlockCodec, Codeword, Correction, Decoded};
use crate::ecc::matrix::DATA_BITS;
use crate::ecc::{ErrorCorrection, Variant};
use crate::error::Result;
use bitvec::prelude::*;
use log::{debug, trace, warn};
use rayon::prelude::*;

/// Framing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramerConfig {
    /// Code variant
    pub variant: Variant,
    /// Process blocks on the rayon thread pool
    pub parallel: bool,
}

impl FramerConfig {
    /// Sequential framing with the given variant
    pub fn new(variant: Variant) -> Self {
        FramerConfig {
            variant,
            parallel: false,
        }
    }

    /// Enables or disables parallel block processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Per-stream decoding counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Number of decoded blocks
    pub blocks: usize,
    /// Blocks with a zero syndrome
    pub clean: usize,
    /// Blocks in which bits were flipped
    pub corrected: usize,
    /// Total number of flipped bits
    pub corrected_bits: usize,
    /// Blocks with a nonzero syndrome that matched no error pattern
    pub uncorrectable: usize,
    /// Whether the last block was shorter than a code word and zero-padded
    pub truncated_tail: bool,
    /// Trailing alignment bits that were dropped
    pub padding_bits: usize,
}

impl DecodeStats {
    fn record(&mut self, index: usize, decoded: &Decoded) {
        self.blocks += 1;
        match decoded.correction {
            Correction::Clean => self.clean += 1,
            Correction::Corrected(location) => {
                trace!("block {}: flipped {:?}", index, location.positions());
                self.corrected += 1;
                self.corrected_bits += location.weight();
            }
            Correction::Uncorrectable(syndrome) => {
                trace!("block {}: uncorrectable syndrome {}", index, syndrome);
                self.uncorrectable += 1;
            }
        }
    }
}

/// Stream encoder/decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Framer {
    config: FramerConfig,
    codec: BlockCodec,
}

impl Framer {
    /// Creates a framer from its configuration
    pub fn new(config: FramerConfig) -> Self {
        Framer {
            config,
            codec: BlockCodec::new(config.variant),
        }
    }

    /// Framing options
    pub fn config(&self) -> FramerConfig {
        self.config
    }

    /// Size in bytes of the encoding of `input_bytes` bytes
    pub fn encoded_len(&self, input_bytes: usize) -> usize {
        (input_bytes * self.config.variant.codeword_bits()).div_ceil(8)
    }

    /// Encodes every byte of `data` into its own code word.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let words: Vec<Codeword> = if self.config.parallel {
            data.par_iter().map(|&byte| self.codec.encode(byte)).collect()
        } else {
            data.iter().map(|&byte| self.codec.encode(byte)).collect()
        };

        let width = self.config.variant.codeword_bits();
        let mut bits = BitVec::<u8, Msb0>::with_capacity(words.len() * width);
        for word in &words {
            bits.extend_from_bitslice(word.as_bitslice());
        }

        debug!(
            "encoded {} bytes into {} {} code words",
            data.len(),
            words.len(),
            self.config.variant
        );
        bits_to_bytes(&bits)
    }

    /// Decodes an encoded stream, correcting what the code can correct.
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        self.decode_with_stats(encoded).map(|(data, _)| data)
    }

    /// Decodes an encoded stream and reports what was corrected.
    pub fn decode_with_stats(&self, encoded: &[u8]) -> Result<(Vec<u8>, DecodeStats)> {
        let width = self.config.variant.codeword_bits();
        let bits = bytes_to_bits(encoded);
        let mut stats = DecodeStats::default();

        let tail = bits.len() % width;
        let usable = if tail > 0 && tail < DATA_BITS {
            stats.padding_bits = tail;
            bits.len() - tail
        } else {
            if tail > 0 {
                warn!(
                    "last {} code word has {} of {} bits, zero-padding it",
                    self.config.variant, tail, width
                );
                stats.truncated_tail = true;
            }
            bits.len()
        };
        let stream = &bits[..usable];

        let blocks: Vec<Decoded> = if self.config.parallel {
            let count = usable.div_ceil(width);
            (0..count)
                .into_par_iter()
                .map(|i| {
                    let start = i * width;
                    let end = (start + width).min(usable);
                    self.codec.decode(&stream[start..end])
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            stream
                .chunks(width)
                .map(|chunk| self.codec.decode(chunk))
                .collect::<Result<Vec<_>>>()?
        };

        // Each block carries exactly one data byte
        let mut data = Vec::with_capacity(blocks.len());
        for (index, decoded) in blocks.iter().enumerate() {
            stats.record(index, decoded);
            data.push(decoded.data);
        }

        debug!(
            "decoded {} {} blocks: {} corrected ({} bits), {} uncorrectable",
            stats.blocks,
            self.config.variant,
            stats.corrected,
            stats.corrected_bits,
            stats.uncorrectable
        );
        Ok((data, stats))
    }
}

impl ErrorCorrection for Framer {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(Framer::encode(self, data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Framer::decode(self, data)
    }
}

/// Encodes a byte buffer with the given variant
///
/// # Arguments
///
/// * `data` - Bytes to protect; every byte becomes one code word
/// * `variant` - Code to use
///
/// # Returns
///
/// The packed code words, zero-padded to a whole number of bytes
pub fn encode(data: &[u8], variant: Variant) -> Vec<u8> {
    Framer::new(FramerConfig::new(variant)).encode(data)
}

/// Decodes a byte buffer produced by [`encode`] with the same variant
///
/// # Arguments
///
/// * `encoded` - Packed code words, possibly corrupted
/// * `variant` - Code the buffer was encoded with
///
/// # Returns
///
/// The data bytes, with every error pattern the code can locate corrected.
/// Uncorrectable blocks are passed through without an error.
pub fn decode(encoded: &[u8], variant: Variant) -> Result<Vec<u8>> {
    Framer::new(FramerConfig::new(variant)).decode(encoded)
}
