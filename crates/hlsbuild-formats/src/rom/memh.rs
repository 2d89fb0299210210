//! Memory initialisation text (`$readmemh` style)
//!
//! One word per line as eight lowercase hex digits, word 0 first.

use crate::rom::error::{Result, RomError};
use crate::rom::image::RomImage;

/// Render every image word as a hex line
pub fn render_memh(image: &RomImage) -> String {
    let mut out = String::with_capacity(image.words().len() * 9);
    for word in image.words() {
        out.push_str(&hex::encode(word.to_be_bytes()));
        out.push('\n');
    }
    out
}

/// Parse hex lines back into words
///
/// Blank lines and `//` comments are skipped. Each remaining line must be
/// exactly eight hex digits.
pub fn parse_memh(text: &str) -> Result<Vec<u32>> {
    let mut words = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let mut bytes = [0u8; 4];
        hex::decode_to_slice(line, &mut bytes).map_err(|e| {
            RomError::InvalidStream(format!("line {}: bad hex word '{line}': {e}", index + 1))
        })?;
        words.push(u32::from_be_bytes(bytes));
    }

    Ok(words)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rom::builder::RomImageBuilder;

    #[test]
    fn test_render_memh() {
        let image = RomImageBuilder::new()
            .add_record("b", "2")
            .add_record("a", "1")
            .build()
            .unwrap();
        let text = render_memh(&image);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "0a313d61");
        assert_eq!(lines[1], "00323d62");
        assert!(lines[2..].iter().all(|l| *l == "00000000"));
    }

    #[test]
    fn test_parse_memh_back_to_image() {
        let image = RomImageBuilder::new()
            .add_record("rev", "deadbeef")
            .build()
            .unwrap();
        let words = parse_memh(&render_memh(&image)).unwrap();
        let unpacked = RomImage::unpack(&words).unwrap();
        assert_eq!(unpacked.records(), image.records());
    }

    #[test]
    fn test_parse_memh_skips_comments() {
        let words = parse_memh("// rom\n\n0A313D61\n").unwrap();
        assert_eq!(words, vec![0x0A31_3D61]);
    }

    #[test]
    fn test_parse_memh_rejects_bad_lines() {
        assert!(matches!(
            parse_memh("0a313d6\n"),
            Err(RomError::InvalidStream(_))
        ));
        assert!(matches!(
            parse_memh("zz313d61\n"),
            Err(RomError::InvalidStream(_))
        ));
    }
}
