//! `rom`: encode build metadata into a ROM image.

use crate::commands::write_output;
use crate::config::{RomArgs, RomFormat};
use anyhow::{Context, Result};
use hlsbuild_formats::rom::{RomImage, RomImageBuilder, RomSummary, VhdlPackage, render_memh};
use std::fs::File;
use std::io::BufReader;
use tracing::info;

/// Encode the input and write the rendered image.
pub fn run(args: &RomArgs, invocation: &str) -> Result<()> {
    let output = render(args, invocation)?;
    write_output(args.output.as_deref(), &output)
}

/// Encode the input and render it in the requested format.
///
/// Options are validated before the input is opened.
pub fn render(args: &RomArgs, invocation: &str) -> Result<Vec<u8>> {
    args.validate()?;

    let mut builder = RomImageBuilder::new();
    if let Some(width) = args.max_width {
        builder = builder.max_width(width);
    }
    if let Some(width) = args.fixed_width {
        builder = builder.fixed_width(width);
    }

    let image = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            builder
                .build_from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to encode {}", path.display()))?
        }
        None => builder
            .build_from_reader(std::io::stdin().lock())
            .context("Failed to encode stdin")?,
    };

    info!(
        "Encoded {} records into {} words (address width {})",
        image.records().len(),
        image.words().len(),
        image.width()
    );

    render_image(&image, args.format, &args.name_prefix, invocation)
}

/// Render an encoded image.
pub fn render_image(
    image: &RomImage,
    format: RomFormat,
    name_prefix: &str,
    invocation: &str,
) -> Result<Vec<u8>> {
    let bytes = match format {
        RomFormat::Vhdl => VhdlPackage::new(image)
            .name_prefix(name_prefix)
            .invocation(invocation)
            .render()?
            .into_bytes(),
        RomFormat::Memh => render_memh(image).into_bytes(),
        RomFormat::Json => {
            let mut json = RomSummary::from_image(image, name_prefix).to_json()?;
            json.push('\n');
            json.into_bytes()
        }
        RomFormat::Bin => image.as_bytes().to_vec(),
    };
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use hlsbuild_formats::rom::SizingMode;
    use pretty_assertions::assert_eq;

    fn sample_image() -> RomImage {
        RomImageBuilder::new()
            .add_record("b", "2")
            .add_record("a", "1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_memh() {
        let out = render_image(&sample_image(), RomFormat::Memh, "buildinfo", "").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 16);
        assert_eq!(text.lines().next(), Some("0a313d61"));
    }

    #[test]
    fn test_render_bin() {
        let image = sample_image();
        let out = render_image(&image, RomFormat::Bin, "buildinfo", "").unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(&out[..8], b"a=1\nb=2\0");
        assert_eq!(RomImage::from_bytes(&out).unwrap(), image);
    }

    #[test]
    fn test_render_json() {
        let out = render_image(&sample_image(), RomFormat::Json, "sysinfo", "").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        let summary = RomSummary::from_json(&text).unwrap();
        assert_eq!(summary.name_prefix, "sysinfo");
        assert_eq!(summary.address_width, 4);
    }

    #[test]
    fn test_render_vhdl_records_invocation() {
        let out = render_image(&sample_image(), RomFormat::Vhdl, "buildinfo", "rom -m 8").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--   called with: rom -m 8\n"));
        assert!(text.contains("package zeropage_buildinfo_pkg is"));
    }

    #[test]
    fn test_fixed_width_output_size() {
        let image = RomImageBuilder::new()
            .fixed_width(6)
            .add_record("a", "1")
            .build()
            .unwrap();
        assert_eq!(image.width().get(), 6);
        let out = render_image(&image, RomFormat::Bin, "buildinfo", "").unwrap();
        assert_eq!(out.len(), 256);
        assert_eq!(
            SizingMode::from_options(None, Some(6)).unwrap(),
            SizingMode::Fixed { width: 6 }
        );
    }
}
