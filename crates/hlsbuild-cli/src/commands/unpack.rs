//! `unpack`: recover records from a raw ROM image.

use crate::config::{UnpackArgs, UnpackFormat};
use anyhow::{Context, Result};
use hlsbuild_formats::rom::RomImage;
use std::fmt::Write as _;
use tracing::info;

/// Decode the image and print its records to stdout.
pub fn run(args: &UnpackArgs) -> Result<()> {
    let output = render(args)?;
    crate::commands::write_output(None, &output)
}

/// Decode the image and render its records.
pub fn render(args: &UnpackArgs) -> Result<Vec<u8>> {
    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let image = RomImage::from_bytes(&data)
        .with_context(|| format!("Failed to unpack {}", args.input.display()))?;

    info!(
        "Recovered {} records from {} bytes (address width {})",
        image.records().len(),
        image.used_bytes(),
        image.width()
    );

    render_records(&image, args.format)
}

/// Render the records of a decoded image.
pub fn render_records(image: &RomImage, format: UnpackFormat) -> Result<Vec<u8>> {
    let text = match format {
        UnpackFormat::Keys => {
            let mut out = String::new();
            for (key, value) in image.records().iter() {
                let _ = writeln!(out, "{key}={value}");
            }
            out
        }
        UnpackFormat::Json => {
            let mut json = serde_json::to_string_pretty(image.records().as_map())?;
            json.push('\n');
            json
        }
    };
    Ok(text.into_bytes())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use hlsbuild_formats::rom::RomImageBuilder;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_image() -> RomImage {
        RomImageBuilder::new()
            .add_record("proj", "demo")
            .add_record("rtag", "v1.0=final")
            .add_record("empty", "")
            .build()
            .unwrap()
    }

    #[test]
    fn test_keys_output() {
        let out = render_records(&sample_image(), UnpackFormat::Keys).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "empty=\nproj=demo\nrtag=v1.0=final\n"
        );
    }

    #[test]
    fn test_json_output() {
        let out = render_records(&sample_image(), UnpackFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rtag"], "v1.0=final");
        assert_eq!(value["empty"], "");
    }

    #[test]
    fn test_render_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rom.bin");
        std::fs::write(&path, sample_image().as_bytes()).unwrap();

        let args = UnpackArgs {
            input: path,
            format: UnpackFormat::Keys,
        };
        let out = render(&args).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("proj=demo\n"));
    }

    #[test]
    fn test_render_rejects_bad_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rom.bin");
        std::fs::write(&path, [0x61u8; 6]).unwrap();

        let args = UnpackArgs {
            input: path,
            format: UnpackFormat::Keys,
        };
        let err = render(&args).unwrap_err();
        assert!(err.to_string().starts_with("Failed to unpack "));

        let args = UnpackArgs {
            input: PathBuf::from("/nonexistent/rom.bin"),
            format: UnpackFormat::Keys,
        };
        assert!(render(&args).unwrap_err().to_string().starts_with("Failed to read "));
    }
}
