use std::collections::BTreeMap;

use bitstream_io::{
    huffman::{compile_write_tree, WriteHuffmanTree},
    BigEndian,
};

use super::tree::{HuffmanTree, Node};
use crate::error::{Error, Result};

/// Per-symbol codes as sequences of 0/1 values, the layout `bitstream_io`
/// compiles its write trees from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Vec<u8>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            // One symbol carries no information, but it still needs a concrete
            // bit so both sides agree on the payload length.
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, vec![0]);
            }
            root => collect_codes(root, &mut Vec::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&[u8]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, bits)| (symbol, bits.as_slice()))
    }

    /// Total number of payload bits needed to encode `data`.
    pub fn encoded_bits(&self, data: &[u8]) -> Result<u64> {
        data.iter().try_fold(0u64, |total, &byte| {
            self.get(byte)
                .map(|bits| total + bits.len() as u64)
                .ok_or(Error::MissingCode(byte))
        })
    }

    pub fn to_write_tree(&self) -> Result<WriteHuffmanTree<BigEndian, u8>> {
        let entries = self
            .codes
            .iter()
            .map(|(&symbol, bits)| (symbol, bits.clone()))
            .collect::<Vec<_>>();

        compile_write_tree::<BigEndian, _>(entries)
            .map_err(|e| Error::InvalidFrequencyTable(format!("unusable code table: {e}")))
    }

    pub fn describe(&self) -> String {
        self.iter()
            .map(|(symbol, bits)| {
                let bits = bits.iter().map(|v| v.to_string()).collect::<String>();
                format!("\t{}\t{bits}", describe_symbol(symbol))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn collect_codes(node: &Node, prefix: &mut Vec<u8>, codes: &mut BTreeMap<u8, Vec<u8>>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix.clone());
        }
        Node::Internal { left, right, .. } => {
            prefix.push(0);
            collect_codes(left, prefix, codes);
            prefix.pop();

            prefix.push(1);
            collect_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}

fn describe_symbol(symbol: u8) -> String {
    match symbol {
        b'!'..=b'~' => format!("{:?}", symbol as char),
        _ => format!("0x{symbol:02x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes(data: &str) -> CodeTable {
        let table = FrequencyTable::from_bytes(data).unwrap();
        CodeTable::from_tree(&HuffmanTree::build(&table).unwrap())
    }

    fn is_prefix_free(table: &CodeTable) -> bool {
        let codes = table.iter().map(|(_, bits)| bits).collect::<Vec<_>>();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    #[test]
    fn test_from_tree() {
        let table = codes("aaabbc");
        assert_eq!(table.get(b'a'), Some(&[0][..]));
        assert_eq!(table.get(b'c'), Some(&[1, 0][..]));
        assert_eq!(table.get(b'b'), Some(&[1, 1][..]));
        assert_eq!(table.get(b'd'), None);
        assert!(is_prefix_free(&table));
    }

    #[test]
    fn test_code_lengths_follow_frequency() {
        let table = codes("aaabbc");
        let len = |s| table.get(s).unwrap().len();
        assert!(len(b'a') <= len(b'b'));
        assert!(len(b'b') <= len(b'c'));
    }

    #[test]
    fn test_single_symbol_code() {
        let table = codes("zzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'z'), Some(&[0][..]));
    }

    #[test]
    fn test_prefix_free() {
        let table = codes("the quick brown fox jumps over the lazy dog");
        assert_eq!(table.len(), 27);
        assert!(is_prefix_free(&table));
    }

    #[test]
    fn test_encoded_bits() {
        let table = codes("aaabbc");
        assert_eq!(table.encoded_bits(b"aaabbc").unwrap(), 9);
        assert!(matches!(
            table.encoded_bits(b"abd"),
            Err(Error::MissingCode(b'd'))
        ));
    }

    #[test]
    fn test_describe() {
        let table = codes("aaabbc");
        assert_eq!(table.describe(), "\t'a'\t0\n\t'b'\t11\n\t'c'\t10");
        assert_eq!(codes(" ").describe(), "\t0x20\t0");
    }

    #[test]
    fn test_to_write_tree() {
        assert!(codes("aaabbc").to_write_tree().is_ok());
        assert!(codes("q").to_write_tree().is_ok());
    }
}
