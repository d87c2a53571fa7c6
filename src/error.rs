//! Error types for compression and decompression.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source contained no bytes, so there is nothing to build a tree from.
    #[error("input is empty")]
    EmptyInput,

    #[error("invalid frequency table: {0}")]
    InvalidFrequencyTable(String),

    /// The input does not fit the container's fixed-width fields.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("no code for symbol 0x{0:02x}")]
    MissingCode(u8),

    /// Bad magic, truncated header or a malformed frequency table.
    #[error("invalid container format: {0}")]
    Format(String),

    /// The payload does not decode against the tree rebuilt from the header.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Error::CorruptStream(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    pub fn capacity(message: impl Into<String>) -> Self {
        Error::CapacityExceeded(message.into())
    }
}
