//! FuseSoC CAPI=2 core descriptors
//!
//! A build emits its generated VHDL into a build directory. The descriptor
//! lists those files in a single `rtl` fileset so the directory can be used
//! as a FuseSoC core.
//!
//! # Usage
//!
//! ```rust
//! use hlsbuild_formats::fusesoc::{CoreFile, CoreFileBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let core = CoreFileBuilder::new("demo", "blinky")
//!     .add_file("blinky.vhd")
//!     .build()?;
//!
//! let text = core.render();
//! assert!(text.starts_with("CAPI=2:\n\nname: cri:demo:blinky\n"));
//! assert_eq!(CoreFile::parse_str(&text)?, core);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core_file;
pub mod error;

pub use builder::{CoreFileBuilder, DEFAULT_SOURCE_EXTENSION};
pub use core_file::CoreFile;
pub use error::{CoreError, Result};

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_layout() {
        let core = CoreFileBuilder::new("myproj", "mycore")
            .add_file("zeropage_buildinfo_pkg.vhd")
            .add_file("top.vhd")
            .build()
            .unwrap();

        let expected = "CAPI=2:

name: cri:myproj:mycore
filesets:
    rtl:
        file_type: vhdlSource-2008
        files:
            - top.vhd
            - zeropage_buildinfo_pkg.vhd

targets:
    default:
        filesets:
           - rtl
";
        assert_eq!(core.render(), expected);
    }

    #[test]
    fn test_round_trip() {
        let core = CoreFileBuilder::new("p", "c")
            .vendor("acme")
            .add_file("a.vhd")
            .build()
            .unwrap();
        crate::test_utils::test_round_trip(&core).unwrap();

        let empty = CoreFileBuilder::new("p", "c").build().unwrap();
        assert_eq!(CoreFile::parse_str(&empty.render()).unwrap(), empty);
    }

    #[test]
    fn test_parse_rejects_bad_layout() {
        assert!(matches!(
            CoreFile::parse_str("CAPI=1:\n"),
            Err(CoreError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            CoreFile::parse_str("CAPI=2:\n\nname: a:b\n"),
            Err(CoreError::Parse { line: 3, .. })
        ));
        let truncated = "CAPI=2:\n\nname: a:b:c\nfilesets:\n    rtl:\n        file_type: x\n        files:\n            - a.vhd\n";
        assert!(matches!(
            CoreFile::parse_str(truncated),
            Err(CoreError::Parse { line: 9, .. })
        ));
        crate::test_utils::test_invalid_data_rejected::<CoreFile>(b"\xff\xfe").unwrap();
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let core = CoreFileBuilder::new("p", "blinky").build().unwrap();
        let path = core.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("blinky.core"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), core.render());
    }
}
