use std::collections::BTreeMap;
use std::io::{BufReader, Read};

use tracing::debug;

use crate::error::{Error, Result};

/// Occurrence count per byte value. Iterates in ascending symbol order, which
/// the tree builder relies on for its tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_bytes<T: AsRef<[u8]>>(data: T) -> Result<Self> {
        let data = data.as_ref();
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut histogram = [0u64; 256];
        for &byte in data {
            histogram[byte as usize] += 1;
        }

        let table = Self::from_histogram(&histogram);
        debug!(symbols = table.len(), bytes = data.len(), "counted frequencies");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut histogram = [0u64; 256];
        let mut total = 0usize;
        let mut buffer = [0u8; 8192];
        let mut reader = BufReader::new(reader);

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            for &byte in &buffer[..read] {
                histogram[byte as usize] += 1;
            }
            total += read;
        }

        if total == 0 {
            return Err(Error::EmptyInput);
        }

        Ok(Self::from_histogram(&histogram))
    }

    /// Builds a table from explicit `(symbol, count)` pairs. Zero counts and
    /// repeated symbols are rejected.
    pub fn from_counts<I: IntoIterator<Item = (u8, u64)>>(counts: I) -> Result<Self> {
        let mut table = BTreeMap::new();
        for (symbol, count) in counts {
            if count == 0 {
                return Err(Error::InvalidFrequencyTable(format!(
                    "symbol 0x{symbol:02x} has a zero count"
                )));
            }
            if table.insert(symbol, count).is_some() {
                return Err(Error::InvalidFrequencyTable(format!(
                    "symbol 0x{symbol:02x} appears twice"
                )));
            }
        }
        Ok(Self { counts: table })
    }

    fn from_histogram(histogram: &[u64; 256]) -> Self {
        let counts = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect();
        Self { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or_default()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Rescales every count into `1..=limit`, keeping their relative order.
    /// Tables already within the limit come back unchanged.
    pub fn scaled_to(&self, limit: u64) -> Self {
        let max = self.max_count();
        if max <= limit {
            return self.clone();
        }

        let counts = self
            .iter()
            .map(|(symbol, count)| {
                let scaled = (count as u128 * limit as u128 / max as u128) as u64;
                (symbol, scaled.max(1))
            })
            .collect();
        Self { counts }
    }
}
