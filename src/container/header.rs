use binary_rw::{BinaryReader, BinaryWriter, Endian, MemoryStream};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

pub const MAGIC: u8 = 0x48; // 'H'

/// Largest number of table entries the 5-bit size field can hold.
pub const MAX_SYMBOLS: usize = 0x1F;
/// Largest count a single table entry can record.
pub const MAX_COUNT: u64 = u8::MAX as u64;

const FIXED_LEN: usize = 6;

/// Converts an input length to the width of the size field.
pub fn checked_size(len: usize) -> Result<u32> {
    u32::try_from(len)
        .map_err(|_| Error::capacity(format!("{len} bytes exceeds the {} byte limit", u32::MAX)))
}

/// Everything needed to rebuild the tree and bound the payload.
///
/// ```text
/// magic:u8 | original_size:u32be | padding:3 table_len:5 | (symbol:u8 count:u8) * table_len
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub original_size: u32,
    pub padding_bits: u8,
    pub table: FrequencyTable,
}

impl Header {
    /// Checks every field against its width in the layout.
    pub fn new(original_size: usize, padding_bits: u8, table: FrequencyTable) -> Result<Self> {
        let original_size = checked_size(original_size)?;

        if table.is_empty() {
            return Err(Error::InvalidFrequencyTable("table is empty".into()));
        }
        if table.len() > MAX_SYMBOLS {
            return Err(Error::capacity(format!(
                "{} distinct symbols, the format holds at most {MAX_SYMBOLS}",
                table.len()
            )));
        }
        if let Some((symbol, count)) = table.iter().find(|&(_, count)| count > MAX_COUNT) {
            return Err(Error::capacity(format!(
                "symbol 0x{symbol:02x} occurs {count} times, the format records at most {MAX_COUNT}"
            )));
        }
        if padding_bits > 7 {
            return Err(Error::format(format!(
                "{padding_bits} padding bits do not fit in three bits"
            )));
        }

        Ok(Self {
            original_size,
            padding_bits,
            table,
        })
    }

    pub fn encoded_len(&self) -> usize {
        FIXED_LEN + 2 * self.table.len()
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut stream = MemoryStream::new();
        {
            let mut writer = BinaryWriter::new(&mut stream, Endian::Big);
            let packed = (self.padding_bits << 5) | (self.table.len() as u8 & 0x1F);

            writer.write_u8(MAGIC).map_err(write_error)?;
            writer.write_u32(self.original_size).map_err(write_error)?;
            writer.write_u8(packed).map_err(write_error)?;
            for (symbol, count) in self.table.iter() {
                writer.write_u8(symbol).map_err(write_error)?;
                writer.write_u8(count as u8).map_err(write_error)?;
            }
        }

        Ok(stream.into())
    }
}

impl TryFrom<&[u8]> for Header {
    type Error = Error;

    fn try_from(data: &[u8]) -> Result<Self> {
        if data.len() < FIXED_LEN {
            return Err(Error::format(format!(
                "header needs {FIXED_LEN} bytes, found {}",
                data.len()
            )));
        }
        if data[0] != MAGIC {
            return Err(Error::format(format!("bad magic byte 0x{:02x}", data[0])));
        }

        let table_len = (data[5] & 0x1F) as usize;
        let total_len = FIXED_LEN + 2 * table_len;
        if data.len() < total_len {
            return Err(Error::format(format!(
                "frequency table needs {total_len} header bytes, found {}",
                data.len()
            )));
        }
        if table_len == 0 {
            return Err(Error::format("frequency table is empty"));
        }

        let mut stream = MemoryStream::from(data[..total_len].to_vec());
        let mut reader = BinaryReader::new(&mut stream, Endian::Big);

        reader.read_u8().map_err(read_error)?;
        let original_size = reader.read_u32().map_err(read_error)?;
        let packed = reader.read_u8().map_err(read_error)?;

        let mut entries = Vec::with_capacity(table_len);
        for _ in 0..table_len {
            let symbol = reader.read_u8().map_err(read_error)?;
            let count = reader.read_u8().map_err(read_error)?;
            entries.push((symbol, count as u64));
        }

        let table = FrequencyTable::from_counts(entries).map_err(|e| match e {
            Error::InvalidFrequencyTable(message) => Error::Format(message),
            e => e,
        })?;

        Ok(Self {
            original_size,
            padding_bits: packed >> 5,
            table,
        })
    }
}

fn write_error(e: binary_rw::BinaryError) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn read_error(e: binary_rw::BinaryError) -> Error {
    Error::format(format!("truncated header: {e}"))
}
