mod header;

pub use header::{checked_size, Header, MAGIC, MAX_COUNT, MAX_SYMBOLS};

use tracing::warn;

use crate::config::OverflowPolicy;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Brings `table` within the counts a header entry can record.
///
/// The alphabet limit is never relaxed: more than [`MAX_SYMBOLS`] distinct
/// symbols is always a capacity error.
pub fn fit_table(table: &FrequencyTable, policy: OverflowPolicy) -> Result<FrequencyTable> {
    if table.len() > MAX_SYMBOLS {
        return Err(Error::capacity(format!(
            "{} distinct symbols, the format holds at most {MAX_SYMBOLS}",
            table.len()
        )));
    }

    let max = table.max_count();
    if max <= MAX_COUNT {
        return Ok(table.clone());
    }

    match policy {
        OverflowPolicy::Strict => Err(Error::capacity(format!(
            "a symbol occurs {max} times, the format records at most {MAX_COUNT}"
        ))),
        OverflowPolicy::Scale => {
            warn!(max, limit = MAX_COUNT, "rescaling symbol counts to fit the header");
            Ok(table.scaled_to(MAX_COUNT))
        }
    }
}

/// Serializes the header followed by the payload.
pub fn write(header: &Header, payload: &[u8]) -> Result<Vec<u8>> {
    let mut output = header.to_vec()?;
    output.extend_from_slice(payload);
    Ok(output)
}

/// Splits container bytes into their header and payload.
pub fn read(data: &[u8]) -> Result<(Header, &[u8])> {
    let header = Header::try_from(data)?;
    let payload = &data[header.encoded_len()..];
    Ok((header, payload))
}
