//! Conversion between byte buffers and MSB-first bit sequences.
//!
//! Bit `i` of byte `b` is bit `8 * b + i` of the flattened sequence, where bit
//! 0 of a byte is its most significant bit.

use bitvec::prelude::*;

/// Flattens bytes into a bit sequence, most significant bit first.
pub fn bytes_to_bits(bytes: &[u8]) -> BitVec<u8, Msb0> {
    BitVec::from_slice(bytes)
}

/// Packs a bit sequence into bytes, most significant bit first.
///
/// A trailing partial byte is filled up with zero bits.
pub fn bits_to_bytes(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    bytes.view_bits_mut::<Msb0>()[..bits.len()].copy_from_bitslice(bits);
    bytes
}
