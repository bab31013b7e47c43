//! Error types shared by the codec, framer and harness.

use thiserror::Error;

/// Errors returned by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Generic invalid argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A received block is empty or longer than one code word
    #[error("block length mismatch: expected 1..={expected} bits, got {actual}")]
    BlockLength { expected: usize, actual: usize },

    /// A bit position does not address a bit of the code word
    #[error("bit position {position} is out of range for a {width}-bit code word")]
    PositionOutOfRange { position: usize, width: usize },

    /// Reading or writing a file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
