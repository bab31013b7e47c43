//! Parity-check matrices of the two code variants.
//!
//! Both matrices have the shape `[P | I]`: the first [`DATA_BITS`] columns say
//! which data bits each parity bit covers, the remaining columns are the
//! identity over the parity bits. A received word `r` is a code word iff
//! `H · r = 0` over GF(2).
//!
//! Besides the tables this module answers structural questions about a
//! matrix (zero columns, repeated columns, colliding column pairs). These are
//! exactly the properties the decoders rely on, and the tests use them to
//! check the shipped tables.

use bitvec::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Number of data bits carried by every code word
pub const DATA_BITS: usize = 8;

/// A fixed binary parity-check matrix stored row-major as 0/1 entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityCheckMatrix {
    rows: usize,
    cols: usize,
    entries: &'static [u8],
}

/// Parity-check matrix of the (12, 8) single-error-correcting code.
///
/// Every column is distinct and nonzero, so every single-bit error has a
/// unique syndrome.
pub const H_SEC: ParityCheckMatrix = ParityCheckMatrix::new(
    4,
    12,
    &[
        1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 0, 0, //
        1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 0, //
        0, 1, 1, 1, 0, 0, 1, 0, 0, 0, 1, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1, //
    ],
);

/// Parity-check matrix of the (16, 8) double-error-correcting code.
///
/// The XOR of every unordered column pair is distinct, nonzero, and differs
/// from every single column.
pub const H_DEC: ParityCheckMatrix = ParityCheckMatrix::new(
    8,
    16,
    &[
        1, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, //
        1, 1, 0, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, //
        1, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, //
        0, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, //
        1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, //
        1, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
        0, 1, 1, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, //
        1, 1, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, //
    ],
);

impl ParityCheckMatrix {
    /// Creates a matrix from row-major 0/1 entries.
    ///
    /// Panics (at compile time when used in a `const`) if the entry count
    /// does not match the shape, if there are more than 8 rows, or if the
    /// matrix has no room for [`DATA_BITS`] data columns.
    pub const fn new(rows: usize, cols: usize, entries: &'static [u8]) -> Self {
        assert!(rows > 0 && rows <= 8, "a column must fit in a u8 mask");
        assert!(cols == DATA_BITS + rows, "matrix must be [P | I]");
        assert!(entries.len() == rows * cols, "entry count must match shape");
        ParityCheckMatrix {
            rows,
            cols,
            entries,
        }
    }

    /// Number of parity bits
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Code word length
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.entries[row * self.cols + col] == 1
    }

    /// Returns one row as 0/1 entries.
    pub fn row(&self, row: usize) -> &'static [u8] {
        let entries: &'static [u8] = self.entries;
        let start = row * self.cols;
        &entries[start..start + self.cols]
    }

    /// Returns column `col` as a mask with bit `r` set when `H[r][col] = 1`.
    pub fn column(&self, col: usize) -> u8 {
        (0..self.rows)
            .filter(|&row| self.get(row, col))
            .fold(0u8, |mask, row| mask | (1 << row))
    }

    /// Computes `H · word` over GF(2).
    ///
    /// Positions past the end of `word` count as zero bits, so a truncated
    /// word behaves as if it had been zero-padded. Bits past `cols` are
    /// ignored.
    pub fn syndrome(&self, word: &BitSlice<u8, Msb0>) -> Syndrome {
        let mask = word
            .iter_ones()
            .take_while(|&pos| pos < self.cols)
            .fold(0u8, |acc, pos| acc ^ self.column(pos));
        Syndrome::new(mask, self.rows)
    }

    /// Whether the trailing `rows` columns form the identity matrix.
    pub fn is_systematic(&self) -> bool {
        (0..self.rows).all(|row| self.column(DATA_BITS + row) == 1 << row)
    }

    /// Columns that are entirely zero. A flip at such a position would be
    /// invisible to the syndrome.
    pub fn zero_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&c| self.column(c) == 0).collect()
    }

    /// Pairs of columns `(i, j)`, `i < j`, that are identical.
    pub fn duplicate_columns(&self) -> Vec<(usize, usize)> {
        let mut duplicates = Vec::new();
        for i in 0..self.cols {
            for j in i + 1..self.cols {
                if self.column(i) == self.column(j) {
                    duplicates.push((i, j));
                }
            }
        }
        duplicates
    }

    /// Groups of column pairs whose XOR yields the same syndrome.
    ///
    /// Only groups with more than one pair are returned; an empty result means
    /// every double error has a unique syndrome.
    pub fn pair_collisions(&self) -> Vec<Vec<(usize, usize)>> {
        let mut by_syndrome: HashMap<u8, Vec<(usize, usize)>> = HashMap::new();
        for i in 0..self.cols {
            for j in i + 1..self.cols {
                by_syndrome
                    .entry(self.column(i) ^ self.column(j))
                    .or_default()
                    .push((i, j));
            }
        }

        let mut collisions: Vec<_> = by_syndrome
            .into_values()
            .filter(|pairs| pairs.len() > 1)
            .collect();
        collisions.sort();
        collisions
    }

    /// Columns whose syndrome equals the XOR of some column pair, as
    /// `(column, pair)`. Such single errors would be mistaken for double ones.
    pub fn columns_shadowed_by_pairs(&self) -> Vec<(usize, (usize, usize))> {
        let mut shadowed = Vec::new();
        for c in 0..self.cols {
            let target = self.column(c);
            'pairs: for i in 0..self.cols {
                for j in i + 1..self.cols {
                    if self.column(i) ^ self.column(j) == target {
                        shadowed.push((c, (i, j)));
                        break 'pairs;
                    }
                }
            }
        }
        shadowed
    }
}

/// Result of multiplying a parity-check matrix by a received word.
///
/// Bit `r` of the mask is the parity of row `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syndrome {
    mask: u8,
    len: usize,
}

impl Syndrome {
    /// Creates a syndrome of `len` bits from a row mask.
    pub fn new(mask: u8, len: usize) -> Self {
        let mask = if len >= 8 { mask } else { mask & ((1 << len) - 1) };
        Syndrome { mask, len }
    }

    /// The row mask
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Number of syndrome bits
    pub fn width(&self) -> usize {
        self.len
    }

    /// Whether the syndrome is the zero vector (no error detected).
    pub fn is_zero(&self) -> bool {
        self.mask == 0
    }

    /// Bit of row `row`
    pub fn bit(&self, row: usize) -> bool {
        (self.mask >> row) & 1 == 1
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.len {
            write!(f, "{}", u8::from(self.bit(row)))?;
        }
        Ok(())
    }
}
