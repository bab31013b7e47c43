//! Whole-file encoding and decoding.
//!
//! Both helpers read the complete input into memory, transform it with the
//! stream framer and write the complete result. Nothing is written when the
//! input cannot be read.

use crate::ecc::framer::{Framer, FramerConfig};
use crate::ecc::Variant;
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::Path;

/// Encodes the file at `input` and writes the code words to `output`.
pub fn encode_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    variant: Variant,
) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let data = fs::read(input)?;
    let encoded = Framer::new(FramerConfig::new(variant)).encode(&data);
    fs::write(output, &encoded)?;
    debug!(
        "{}: {} -> {} ({} -> {} bytes)",
        variant,
        input.display(),
        output.display(),
        data.len(),
        encoded.len()
    );
    Ok(())
}

/// Decodes the file at `input`, correcting errors, and writes the data to
/// `output`.
pub fn decode_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    variant: Variant,
) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let encoded = fs::read(input)?;
    let (data, stats) = Framer::new(FramerConfig::new(variant)).decode_with_stats(&encoded)?;
    fs::write(output, &data)?;
    debug!(
        "{}: {} -> {} ({} blocks, {} corrected, {} uncorrectable)",
        variant,
        input.display(),
        output.display(),
        stats.blocks,
        stats.corrected,
        stats.uncorrectable
    );
    Ok(())
}
