//! Lossless byte-stream compression with static Huffman coding.
//!
//! The container is self-describing: it stores the original length, the
//! padding of the final byte and the symbol frequencies, from which the
//! decoder rebuilds the same tree the encoder used.

pub mod bit_stream;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod io;

pub use codec::{
    compress, compress_bytes, compress_file, decompress, decompress_bytes, decompress_file,
    inspect, Stats,
};
pub use config::{CodecConfig, OverflowPolicy};
pub use error::{Error, Result};
