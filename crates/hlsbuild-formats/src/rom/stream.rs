//! Canonical byte stream serialization
//!
//! Records are rendered as `key=value` in ascending key order, joined by a
//! single line feed, and the last record is followed by a single null byte:
//!
//! ```text
//! a=1\nb=2\0
//! ```
//!
//! The stream never contains a null byte before the terminator, which makes
//! unpacking unambiguous.

use crate::rom::error::{Result, RomError};
use crate::rom::record::{Record, RecordSet, is_printable};

/// Byte between consecutive records
pub const SEPARATOR: u8 = b'\n';

/// Byte after the last record
pub const TERMINATOR: u8 = 0x00;

/// Serialize a record set into its canonical byte stream
pub fn serialize(records: &RecordSet) -> Vec<u8> {
    let mut stream = Vec::with_capacity(serialized_len(records));

    for (index, (key, value)) in records.iter().enumerate() {
        if index > 0 {
            stream.push(SEPARATOR);
        }
        stream.extend_from_slice(key.as_bytes());
        stream.push(b'=');
        stream.extend_from_slice(value.as_bytes());
    }
    stream.push(TERMINATOR);

    stream
}

/// Length of the stream a record set serializes to, without building it
pub fn serialized_len(records: &RecordSet) -> usize {
    let text: usize = records.iter().map(|(k, v)| k.len() + 1 + v.len()).sum();
    let separators = records.len().saturating_sub(1);
    text + separators + 1
}

/// Decode a canonical byte stream back into its record set
///
/// `stream` must end with the terminator and contain no other null byte.
pub fn deserialize(stream: &[u8]) -> Result<RecordSet> {
    let Some(end) = stream.iter().position(|&b| b == TERMINATOR) else {
        return Err(RomError::Truncated {
            expected: stream.len() + 1,
            actual: stream.len(),
        });
    };
    if end + 1 != stream.len() {
        return Err(RomError::InvalidStream(format!(
            "terminator at offset {end}, expected at {}",
            stream.len() - 1
        )));
    }

    let mut records = RecordSet::new();
    let body = &stream[..end];
    if body.is_empty() {
        return Ok(records);
    }

    for (index, segment) in body.split(|&b| b == SEPARATOR).enumerate() {
        if !segment.iter().copied().all(is_printable) {
            return Err(RomError::InvalidStream(format!(
                "record {index} contains non-printable bytes"
            )));
        }
        let text = String::from_utf8_lossy(segment);
        let record = Record::parse(&text).ok_or_else(|| {
            RomError::InvalidStream(format!("record {index} is not a key=value pair: '{text}'"))
        })?;
        records
            .insert(record)
            .map_err(|e| RomError::InvalidStream(format!("record {index}: {e}")))?;
    }

    Ok(records)
}
