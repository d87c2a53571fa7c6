use std::path::Path;

use tracing::{debug, info};

use crate::bit_stream;
use crate::config::CodecConfig;
use crate::container::{self, Header};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::huffman::{CodeTable, HuffmanTree};
use crate::io::{ByteSink, ByteSource, FileSink, FileSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub input_size: u64,
    pub output_size: u64,
}

impl Stats {
    /// Output size as a percentage of the input size.
    pub fn ratio(&self) -> f64 {
        match self.input_size {
            0 => 0.0,
            input => self.output_size as f64 / input as f64 * 100.0,
        }
    }
}

pub fn compress_bytes(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    container::checked_size(data.len())?;
    let counted = FrequencyTable::from_bytes(data)?;
    // The tree is built from the table as it will be stored, so the decoder
    // rebuilds exactly the same one.
    let table = container::fit_table(&counted, config.overflow)?;
    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&tree);
    debug!(symbols = codes.len(), depth = tree.depth(), "generated codes");

    let packed = bit_stream::pack(data, &codes)?;
    let header = Header::new(data.len(), packed.padding_bits, table)?;
    container::write(&header, &packed.bytes)
}

pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = container::read(data)?;
    debug!(
        original_size = header.original_size,
        padding_bits = header.padding_bits,
        symbols = header.table.len(),
        payload = payload.len(),
        "read header"
    );

    let tree = HuffmanTree::build(&header.table)?;
    bit_stream::unpack(
        payload,
        &tree,
        header.original_size as usize,
        header.padding_bits,
    )
}

/// Parses a container's header and derives the code table it implies,
/// without decoding the payload.
pub fn inspect(data: &[u8]) -> Result<(Header, CodeTable)> {
    let (header, _) = container::read(data)?;
    let tree = HuffmanTree::build(&header.table)?;
    let codes = CodeTable::from_tree(&tree);
    Ok((header, codes))
}

pub fn compress<S: ByteSource, K: ByteSink>(
    source: &mut S,
    mut sink: K,
    config: &CodecConfig,
) -> Result<Stats> {
    let data = source.read_all()?;
    let output = compress_bytes(&data, config)?;
    sink.write_bytes(&output)?;
    sink.commit()?;

    Ok(Stats {
        input_size: data.len() as u64,
        output_size: output.len() as u64,
    })
}

pub fn decompress<S: ByteSource, K: ByteSink>(source: &mut S, mut sink: K) -> Result<Stats> {
    let data = source.read_all()?;
    let output = decompress_bytes(&data)?;
    sink.write_bytes(&output)?;
    sink.commit()?;

    Ok(Stats {
        input_size: data.len() as u64,
        output_size: output.len() as u64,
    })
}

/// Compresses `input` into `output`. On failure `output` is left untouched.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &CodecConfig,
) -> Result<Stats> {
    let mut source = FileSource::open(input.as_ref())?;
    let sink = FileSink::create(output.as_ref())?;
    let stats = compress(&mut source, sink, config)?;

    info!(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        input_size = stats.input_size,
        output_size = stats.output_size,
        "compressed file"
    );
    Ok(stats)
}

/// Decompresses `input` into `output`. On failure `output` is left untouched.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Stats> {
    let mut source = FileSource::open(input.as_ref())?;
    let sink = FileSink::create(output.as_ref())?;
    let stats = decompress(&mut source, sink)?;

    info!(
        input = %input.as_ref().display(),
        output = %output.as_ref().display(),
        input_size = stats.input_size,
        output_size = stats.output_size,
        "decompressed file"
    );
    Ok(stats)
}
