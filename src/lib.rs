pub mod ecc;
pub mod error;

pub use ecc::{decode, encode, BlockCodec, Framer, FramerConfig, Variant};
pub use error::{Error, Result};
