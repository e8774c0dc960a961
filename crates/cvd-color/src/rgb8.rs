//! 8-bit sRGB colors and their hex text form.

use std::fmt;
use std::str::FromStr;

use cvd_math::Vec3;

use crate::error::{ColorError, ColorResult};
use crate::transfer::eotf;

/// Number of distinct 8-bit RGB values.
pub const RGB8_COUNT: u32 = 1 << 24;

/// An 8-bit sRGB color.
///
/// Ordering is lexicographic over (r, g, b), which is the canonical order
/// of colors within a generated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// White, `ffffff`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into `r + 256 g + 65536 b`.
    ///
    /// This is the catalog enumeration index: red varies fastest, so white
    /// is the last of all 2^24 values.
    #[inline]
    pub const fn packed(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    /// Inverse of [`packed`](Self::packed). Bits above 24 are ignored.
    #[inline]
    pub const fn from_packed(v: u32) -> Self {
        Self::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
    }

    /// Channels as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Decodes to linear sRGB in [0, 1].
    #[inline]
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            eotf(f64::from(self.r) / 255.0),
            eotf(f64::from(self.g) / 255.0),
            eotf(f64::from(self.b) / 255.0),
        )
    }

    /// Lowercase 6-digit hex, e.g. `"a1b2c3"`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Parses 6 hex digits, with or without a leading `#`.
    ///
    /// ```rust
    /// use cvd_color::Rgb8;
    ///
    /// assert_eq!(Rgb8::from_hex("#1f77b4").unwrap(), Rgb8::new(0x1f, 0x77, 0xb4));
    /// assert_eq!(Rgb8::from_hex("FFFFFF").unwrap(), Rgb8::WHITE);
    /// assert!(Rgb8::from_hex("fff").is_err());
    /// ```
    pub fn from_hex(s: &str) -> ColorResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::ParseError(format!(
                "expected 6 hex digits, got {s:?}"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ColorError::ParseError(format!("{s:?}: {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for Rgb8 {
    #[inline]
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}
