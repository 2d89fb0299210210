//! JSON summary of a ROM image
//!
//! Intended for scripts that want the packed words without parsing HDL. The
//! summary carries enough to rebuild the image exactly.

use crate::rom::error::{Result, RomError};
use crate::rom::image::RomImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable view of a `RomImage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomSummary {
    /// Cosmetic label shared with the HDL renderer
    pub name_prefix: String,
    /// ROM address width `w`
    pub address_width: u32,
    /// Stream length including the terminator
    pub used_bytes: usize,
    /// Words touched by the stream
    pub used_words: usize,
    /// All `2^w` words as eight hex digits
    pub words: Vec<String>,
    /// Encoded records in canonical order
    pub records: BTreeMap<String, String>,
}

impl RomSummary {
    /// Summarize an image
    pub fn from_image(image: &RomImage, name_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            address_width: image.width().get(),
            used_bytes: image.used_bytes(),
            used_words: image.used_words(),
            words: image
                .words()
                .iter()
                .map(|w| hex::encode(w.to_be_bytes()))
                .collect(),
            records: image.records().as_map().clone(),
        }
    }

    /// Rebuild the image the summary describes
    ///
    /// Fails if the words do not decode to the listed records or the width
    /// does not match the word count.
    pub fn to_image(&self) -> Result<RomImage> {
        let words = self
            .words
            .iter()
            .map(|text| -> Result<u32> {
                let mut bytes = [0u8; 4];
                hex::decode_to_slice(text, &mut bytes)
                    .map_err(|e| RomError::InvalidStream(format!("bad hex word '{text}': {e}")))?;
                Ok(u32::from_be_bytes(bytes))
            })
            .collect::<Result<Vec<_>>>()?;

        let image = RomImage::from_words(&words, self.used_bytes)?;
        if image.width().get() != self.address_width {
            return Err(RomError::InvalidStream(format!(
                "address width {} does not match {} words",
                self.address_width,
                words.len()
            )));
        }
        if image.records().as_map() != &self.records {
            return Err(RomError::InvalidStream(
                "records do not match the encoded words".to_string(),
            ));
        }
        Ok(image)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
