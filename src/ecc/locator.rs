//! Syndrome decoding: maps a nonzero syndrome to the bit positions to flip.
//!
//! The search is exhaustive over the fixed matrix. For a single error the
//! syndrome equals one column of `H`; for a double error it equals the XOR of
//! two columns. Scanning 16 columns, or the 120 column pairs of the DEC
//! matrix, is cheap enough that no lookup table is built.

use crate::ecc::matrix::{ParityCheckMatrix, Syndrome};
use crate::ecc::Variant;

/// Bit positions of a located error, indexed into the code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLocation {
    /// One flipped bit
    Single(usize),
    /// Two flipped bits, first position lower than the second
    Pair(usize, usize),
}

impl ErrorLocation {
    /// Positions to flip, in ascending order
    pub fn positions(&self) -> Vec<usize> {
        match *self {
            ErrorLocation::Single(p) => vec![p],
            ErrorLocation::Pair(p, q) => vec![p, q],
        }
    }

    /// Number of flipped bits
    pub fn weight(&self) -> usize {
        match self {
            ErrorLocation::Single(_) => 1,
            ErrorLocation::Pair(..) => 2,
        }
    }
}

/// Returns the first column equal to the syndrome.
pub fn locate_single(matrix: &ParityCheckMatrix, syndrome: Syndrome) -> Option<ErrorLocation> {
    (0..matrix.cols())
        .find(|&col| matrix.column(col) == syndrome.mask())
        .map(ErrorLocation::Single)
}

/// Returns the first column pair `(i, j)`, `i < j`, in lexicographic order
/// whose XOR equals the syndrome.
pub fn locate_pair(matrix: &ParityCheckMatrix, syndrome: Syndrome) -> Option<ErrorLocation> {
    for i in 0..matrix.cols() {
        for j in i + 1..matrix.cols() {
            if matrix.column(i) ^ matrix.column(j) == syndrome.mask() {
                return Some(ErrorLocation::Pair(i, j));
            }
        }
    }
    None
}

/// Resolves a syndrome for the given variant.
///
/// SEC only looks for a single column. DEC looks for a column pair first and
/// falls back to a single column, so lone bit errors are corrected too.
/// Returns `None` for a zero syndrome or when nothing matches.
pub fn locate(variant: Variant, syndrome: Syndrome) -> Option<ErrorLocation> {
    if syndrome.is_zero() {
        return None;
    }

    let matrix = variant.matrix();
    match variant {
        Variant::Single => locate_single(matrix, syndrome),
        Variant::Double => {
            locate_pair(matrix, syndrome).or_else(|| locate_single(matrix, syndrome))
        }
    }
}
