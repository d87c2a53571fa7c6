use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter, HuffmanWrite};
use tracing::debug;

use crate::error::{Error, Result};
use crate::huffman::{CodeTable, HuffmanTree, Node};

/// An MSB-first bit stream along with the number of zero bits appended to
/// reach a byte boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    pub bytes: Vec<u8>,
    pub padding_bits: u8,
}

pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Packed> {
    let total_bits = codes.encoded_bits(data)?;
    let padding_bits = ((8 - total_bits % 8) % 8) as u8;
    let tree = codes.to_write_tree()?;

    let mut bytes = Vec::with_capacity(((total_bits + 7) / 8) as usize);
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        for &byte in data {
            writer.write_huffman(&tree, byte)?;
        }
        writer.byte_align()?;
    }

    debug!(total_bits, padding_bits, bytes = bytes.len(), "packed payload");
    Ok(Packed {
        bytes,
        padding_bits,
    })
}

/// Decodes `original_size` symbols from `payload` by walking `tree`.
///
/// The payload must hold exactly the bits the symbols need: running out
/// early, or leaving meaningful bits over, is reported as a corrupt stream.
/// Trailing bytes after the last symbol are rejected rather than ignored.
pub fn unpack(
    payload: &[u8],
    tree: &HuffmanTree,
    original_size: usize,
    padding_bits: u8,
) -> Result<Vec<u8>> {
    let total_bits = payload.len() as u64 * 8;
    if padding_bits > 7 || u64::from(padding_bits) > total_bits {
        return Err(Error::corrupt(format!(
            "{padding_bits} padding bits in a {total_bits}-bit payload"
        )));
    }
    let meaningful_bits = total_bits - u64::from(padding_bits);

    let root = tree.root();
    if let Node::Leaf { symbol, .. } = root {
        // Every symbol was written as a single bit that carries nothing.
        if meaningful_bits != original_size as u64 {
            return Err(Error::corrupt(format!(
                "expected {original_size} payload bits, found {meaningful_bits}"
            )));
        }
        return Ok(vec![*symbol; original_size]);
    }

    let capacity = original_size.min(meaningful_bits as usize);
    let mut output = Vec::with_capacity(capacity);
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    let mut consumed = 0u64;
    let mut node = root;

    while output.len() < original_size {
        if consumed == meaningful_bits {
            return Err(Error::corrupt(format!(
                "payload ended after {} of {original_size} bytes",
                output.len()
            )));
        }

        let bit = reader.read_bit()?;
        consumed += 1;

        node = match node {
            Node::Internal { left, right, .. } => match bit {
                false => &**left,
                true => &**right,
            },
            Node::Leaf { .. } => {
                return Err(Error::corrupt(format!(
                    "no branch to follow at bit {}",
                    consumed - 1
                )))
            }
        };

        if let Node::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = root;
        }
    }

    if consumed != meaningful_bits {
        return Err(Error::corrupt(format!(
            "{} bits left over after {original_size} bytes",
            meaningful_bits - consumed
        )));
    }

    debug!(bits = consumed, bytes = output.len(), "unpacked payload");
    Ok(output)
}
