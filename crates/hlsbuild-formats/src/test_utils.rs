//! Test utilities for format round-trip testing
//!
//! Shared helpers for the format test modules.

use crate::HwFormat;
use std::fmt::Debug;

/// Test round-trip serialization for a format instance
///
/// Builds the binary representation, parses it back and compares the result
/// with the original.
pub fn test_round_trip<T>(original: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: HwFormat + PartialEq + Debug,
{
    let data = original.build()?;
    let parsed = T::parse(&data)?;

    if original != &parsed {
        return Err(format!(
            "Round-trip verification failed:\nOriginal: {:?}\nParsed: {:?}",
            original, parsed
        )
        .into());
    }

    Ok(())
}

/// Test that parsing invalid data fails
///
/// Returns `Err` if parsing unexpectedly succeeds.
pub fn test_invalid_data_rejected<T>(invalid_data: &[u8]) -> Result<(), Box<dyn std::error::Error>>
where
    T: HwFormat,
{
    match T::parse(invalid_data) {
        Ok(_) => Err("Expected parsing to fail for invalid data, but it succeeded".into()),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct TestFormat {
        value: u32,
    }

    impl HwFormat for TestFormat {
        fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
            let bytes: [u8; 4] = data.try_into().map_err(|_| "Invalid data length")?;
            Ok(Self {
                value: u32::from_le_bytes(bytes),
            })
        }

        fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
            Ok(self.value.to_le_bytes().to_vec())
        }
    }

    #[test]
    fn test_round_trip_utility() {
        test_round_trip(&TestFormat { value: 42 }).expect("Round-trip should succeed");
    }

    #[test]
    fn test_invalid_data_rejected_utility() {
        test_invalid_data_rejected::<TestFormat>(&[1, 2]).expect("Should reject invalid data");
    }

    #[test]
    fn test_verify_round_trip_default() {
        TestFormat::verify_round_trip(&7u32.to_le_bytes()).expect("Should verify");
    }
}
