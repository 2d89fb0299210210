//! Metadata records and the line-oriented input collector
//!
//! Input is one `key=value` pair per line. Blank lines and lines starting
//! with `#` are skipped. Keys consist of word characters `[0-9A-Za-z_]`,
//! values are the rest of the line and may be empty or contain `=`.

use crate::rom::error::{Result, RomError};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Read;
use tracing::debug;

/// Single validated `key=value` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Word-character key
    pub key: String,
    /// Printable ASCII value
    pub value: String,
}

impl Record {
    /// Create a record, validating key and value
    ///
    /// Errors report line 0 as the record does not come from an input line.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        let text = format!("{key}={value}");

        if !text.bytes().all(is_printable) {
            return Err(RomError::InvalidCharacter {
                line: 0,
                text: text.escape_debug().to_string(),
            });
        }
        if !is_word_key(&key) {
            return Err(RomError::MalformedRecord { line: 0, text });
        }

        Ok(Self { key, value })
    }

    /// Split a `key=value` text into a record
    ///
    /// The key is everything before the first `=`. Returns `None` when there
    /// is no `=`, the key is empty or the key has non-word characters. The
    /// text must already be known to be printable ASCII.
    pub fn parse(text: &str) -> Option<Self> {
        let (key, value) = text.split_once('=')?;
        if !is_word_key(key) {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Check that a key is one or more word characters
pub fn is_word_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Printable ASCII, code points in [32, 128)
pub(crate) const fn is_printable(byte: u8) -> bool {
    byte >= 0x20 && byte < 0x80
}

/// Deduplicated record set, always iterated in ascending key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    entries: BTreeMap<String, String>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record set from a reader, consuming all input
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        RecordReader::new(reader).read_records()
    }

    /// Parse a record set from a string
    pub fn parse_str(content: &str) -> Result<Self> {
        Self::parse(content.as_bytes())
    }

    /// Insert a record, rejecting keys that are already present
    ///
    /// Duplicate errors report the 1-based insertion position as line.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let position = self.entries.len() + 1;
        self.insert_at(record, position)
    }

    fn insert_at(&mut self, record: Record, line: usize) -> Result<()> {
        match self.entries.entry(record.key) {
            Entry::Occupied(entry) => Err(RomError::DuplicateKey {
                line,
                key: entry.key().clone(),
                text: format!("{}={}", entry.key(), record.value),
            }),
            Entry::Vacant(entry) => {
                entry.insert(record.value);
                Ok(())
            }
        }
    }

    /// Look up the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying ordered map
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// Line-oriented collector for `key=value` input
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. The whole input is consumed
/// before a record set is returned, so a failure on a late line never leaves
/// partial results behind.
pub struct RecordReader<R> {
    reader: R,
}

impl<R: Read> RecordReader<R> {
    /// Create a new reader from any `Read` source
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read, validate and collect every record
    pub fn read_records(&mut self) -> Result<RecordSet> {
        let mut input = Vec::new();
        self.reader.read_to_end(&mut input)?;

        let mut records = RecordSet::new();
        let mut line_count = 0;
        for (index, raw) in split_lines(&input).enumerate() {
            let line_number = index + 1;
            line_count = line_number;
            if let Some(record) = validate_line(raw, line_number)? {
                records.insert_at(record, line_number)?;
            }
        }

        debug!(
            "Collected {} records from {} input lines",
            records.len(),
            line_count
        );
        Ok(records)
    }
}

/// Split input at `\n`, `\r\n` and lone `\r`, dropping the line ends
fn split_lines(input: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.iter().position(|&b| b == b'\n' || b == b'\r') else {
            let line = rest;
            rest = &[];
            return Some(line);
        };
        let line = &rest[..end];
        let crlf = rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n');
        rest = &rest[end + if crlf { 2 } else { 1 }..];
        Some(line)
    })
}

/// Whitespace removed from both ends of a line
///
/// Unicode whitespace plus the ASCII information separators 0x1C to 0x1F.
fn is_line_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Validate one raw input line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn validate_line(raw: &[u8], line: usize) -> Result<Option<Record>> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim_matches(is_line_space);
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    if !trimmed.bytes().all(is_printable) {
        return Err(RomError::InvalidCharacter {
            line,
            text: trimmed.escape_debug().to_string(),
        });
    }

    Record::parse(trimmed)
        .map(Some)
        .ok_or_else(|| RomError::MalformedRecord {
            line,
            text: trimmed.to_string(),
        })
}
