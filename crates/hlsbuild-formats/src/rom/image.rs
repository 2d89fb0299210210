//! Padded ROM image and its 32-bit word view

use crate::rom::error::{Result, RomError};
use crate::rom::record::RecordSet;
use crate::rom::stream::{TERMINATOR, deserialize, serialize};
use crate::rom::width::{AddressWidth, SizingMode, WORD_BYTES, used_words};
use binrw::{BinRead, BinWrite, Endian, VecArgs};
use std::io::Cursor;
use tracing::debug;

/// Largest address width accepted when parsing raw images
pub const MAX_PARSE_WIDTH: u32 = 12;

/// Encoded ROM image
///
/// Holds the canonical stream zero-padded to `4 * 2^w` bytes together with
/// its little-endian word view and the records it was built from. Word 0 is
/// the first four stream bytes, least significant byte first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    records: RecordSet,
    width: AddressWidth,
    used_bytes: usize,
    data: Vec<u8>,
    words: Vec<u32>,
}

impl RomImage {
    /// Serialize, size and pack a record set
    pub fn encode(records: RecordSet, mode: SizingMode) -> Result<Self> {
        let stream = serialize(&records);
        let width = mode.plan(stream.len())?;
        let image = Self::pack(records, stream, width)?;

        debug!(
            "Packed {} records: {} bytes, {} words, address width {}",
            image.records.len(),
            image.used_bytes,
            image.used_words(),
            image.width
        );
        Ok(image)
    }

    /// Pad a serialized stream to the width's capacity and split it into words
    fn pack(records: RecordSet, stream: Vec<u8>, width: AddressWidth) -> Result<Self> {
        let used_bytes = stream.len();
        if used_bytes > width.bytes() {
            return Err(RomError::CapacityExceeded {
                used_bytes,
                capacity_bytes: width.bytes(),
                required_width: crate::rom::width::required_width(used_words(used_bytes)),
                allowed_width: width.get(),
            });
        }

        let mut data = stream;
        data.resize(width.bytes(), 0);

        let words = Vec::<u32>::read_options(
            &mut Cursor::new(&data),
            Endian::Little,
            VecArgs {
                count: width.words(),
                inner: (),
            },
        )?;

        Ok(Self {
            records,
            width,
            used_bytes,
            data,
            words,
        })
    }

    /// Rebuild an image from its word sequence and known used byte count
    ///
    /// The word count must be a power of two. The stream within `used_bytes`
    /// must decode back to records and every padding byte must be zero.
    pub fn from_words(words: &[u32], used_bytes: usize) -> Result<Self> {
        let width = width_for_words(words.len())?;

        let mut data = Vec::with_capacity(width.bytes());
        words.to_vec().write_options(&mut Cursor::new(&mut data), Endian::Little, ())?;

        if used_bytes > data.len() {
            return Err(RomError::Truncated {
                expected: used_bytes,
                actual: data.len(),
            });
        }
        if let Some(offset) = data[used_bytes..].iter().position(|&b| b != 0) {
            return Err(RomError::InvalidStream(format!(
                "non-zero padding byte at offset {}",
                used_bytes + offset
            )));
        }

        let records = deserialize(&data[..used_bytes])?;
        debug!(
            "Unpacked {} records from {} words",
            records.len(),
            words.len()
        );

        Ok(Self {
            records,
            width,
            used_bytes,
            data,
            words: words.to_vec(),
        })
    }

    /// Rebuild an image from its word sequence alone
    ///
    /// The used byte count is recovered from the position of the first
    /// terminator byte.
    pub fn unpack(words: &[u32]) -> Result<Self> {
        let used_bytes = words
            .iter()
            .flat_map(|word| word.to_le_bytes())
            .position(|b| b == TERMINATOR)
            .map(|pos| pos + 1)
            .ok_or(RomError::Truncated {
                expected: words.len() * WORD_BYTES + 1,
                actual: words.len() * WORD_BYTES,
            })?;
        Self::from_words(words, used_bytes)
    }

    /// Rebuild an image from its padded little-endian bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() % WORD_BYTES != 0 {
            return Err(RomError::InvalidStream(format!(
                "image length {} is not a multiple of {WORD_BYTES}",
                data.len()
            )));
        }
        let words = Vec::<u32>::read_options(
            &mut Cursor::new(data),
            Endian::Little,
            VecArgs {
                count: data.len() / WORD_BYTES,
                inner: (),
            },
        )?;
        Self::unpack(&words)
    }

    /// Records encoded in the image, in canonical order
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Chosen address width
    pub fn width(&self) -> AddressWidth {
        self.width
    }

    /// Stream length including the terminator
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Words touched by the stream
    pub fn used_words(&self) -> usize {
        used_words(self.used_bytes)
    }

    /// The canonical stream, without padding
    pub fn stream(&self) -> &[u8] {
        &self.data[..self.used_bytes]
    }

    /// The full padded image
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Little-endian 32-bit words, `2^w` of them
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Iterate `(index, word, raw bytes)` for every word of the image
    pub fn chunks(&self) -> impl Iterator<Item = (usize, u32, &[u8])> {
        self.words
            .iter()
            .zip(self.data.chunks_exact(WORD_BYTES))
            .enumerate()
            .map(|(index, (&word, chunk))| (index, word, chunk))
    }
}

fn width_for_words(count: usize) -> Result<AddressWidth> {
    if !count.is_power_of_two() {
        return Err(RomError::InvalidStream(format!(
            "word count {count} is not a power of two"
        )));
    }
    let width = count.trailing_zeros();
    if width > MAX_PARSE_WIDTH {
        return Err(RomError::InvalidStream(format!(
            "address width {width} exceeds {MAX_PARSE_WIDTH}"
        )));
    }
    Ok(AddressWidth::new(width))
}

impl crate::HwFormat for RomImage {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::from_bytes(data)?)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(self.data.clone())
    }
}
