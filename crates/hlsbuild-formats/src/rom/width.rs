//! ROM address width planning
//!
//! The consumer is a memory addressed by a binary bus, so the image always
//! holds `2^w` 32-bit words. The planner picks `w` either automatically,
//! bounded by a maximum, or takes a fixed value and checks the data fits.

use crate::rom::error::{Result, RomError};
use std::ops::RangeInclusive;

/// Smallest address width an image is ever emitted with
pub const MIN_ADDRESS_WIDTH: u32 = 4;

/// Auto-sizing ceiling when none is configured
pub const DEFAULT_MAX_WIDTH: u32 = 8;

/// Allowed range for the auto-sizing ceiling
pub const MAX_WIDTH_RANGE: RangeInclusive<u32> = 4..=12;

/// Allowed range for a fixed address width
pub const FIXED_WIDTH_RANGE: RangeInclusive<u32> = 4..=10;

/// Bytes per ROM word
pub const WORD_BYTES: usize = 4;

/// ROM address width `w`; the image holds `2^w` words
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressWidth(u32);

impl AddressWidth {
    /// Wrap a raw width
    pub const fn new(width: u32) -> Self {
        Self(width)
    }

    /// Raw width value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Number of words, `2^w`
    pub const fn words(self) -> usize {
        1 << self.0
    }

    /// Number of bytes, `4 * 2^w`
    pub const fn bytes(self) -> usize {
        WORD_BYTES << self.0
    }
}

impl std::fmt::Display for AddressWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of 32-bit words needed for `used_bytes`
pub const fn used_words(used_bytes: usize) -> usize {
    used_bytes.div_ceil(WORD_BYTES)
}

/// Minimal width whose `2^w` words hold `used_words`
///
/// This is `ceil(log2(used_words))`, with both 0 and 1 words giving 0.
pub const fn required_width(used_words: usize) -> u32 {
    if used_words <= 1 {
        0
    } else {
        usize::BITS - (used_words - 1).leading_zeros()
    }
}

/// How the address width is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Smallest width >= 4 that fits, failing above `max_width`
    Auto {
        /// Auto-sizing ceiling
        max_width: u32,
    },
    /// Exactly this width, failing if the data needs more
    Fixed {
        /// Fixed address width
        width: u32,
    },
}

impl Default for SizingMode {
    fn default() -> Self {
        Self::Auto {
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl SizingMode {
    /// Resolve the mode from optional user-supplied widths
    ///
    /// The two options are mutually exclusive. The maximum width is range
    /// checked first, then the combination, then the fixed width.
    pub fn from_options(max_width: Option<u32>, fixed_width: Option<u32>) -> Result<Self> {
        if let Some(max_width) = max_width {
            check_range("maximum address width", max_width, &MAX_WIDTH_RANGE)?;
        }

        match (max_width, fixed_width) {
            (Some(max_width), Some(fixed_width)) => Err(RomError::ConflictingOptions {
                max_width,
                fixed_width,
            }),
            (None, Some(width)) => {
                check_range("fixed address width", width, &FIXED_WIDTH_RANGE)?;
                Ok(Self::Fixed { width })
            }
            (Some(max_width), None) => Ok(Self::Auto { max_width }),
            (None, None) => Ok(Self::default()),
        }
    }

    /// Check the configured width against its allowed range
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Auto { max_width } => {
                check_range("maximum address width", max_width, &MAX_WIDTH_RANGE)
            }
            Self::Fixed { width } => check_range("fixed address width", width, &FIXED_WIDTH_RANGE),
        }
    }

    /// Largest width this mode accepts
    pub const fn allowed_width(&self) -> u32 {
        match *self {
            Self::Auto { max_width } => max_width,
            Self::Fixed { width } => width,
        }
    }

    /// Choose the address width for a stream of `used_bytes`
    pub fn plan(&self, used_bytes: usize) -> Result<AddressWidth> {
        self.validate()?;

        let required = required_width(used_words(used_bytes));
        let allowed = self.allowed_width();
        if required > allowed {
            return Err(RomError::CapacityExceeded {
                used_bytes,
                capacity_bytes: AddressWidth::new(allowed).bytes(),
                required_width: required,
                allowed_width: allowed,
            });
        }

        let width = match *self {
            Self::Auto { .. } => required.max(MIN_ADDRESS_WIDTH),
            Self::Fixed { width } => width,
        };
        Ok(AddressWidth::new(width))
    }
}

fn check_range(option: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(RomError::InvalidWidthRange {
            option,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
