//! RGB triples and their conversions
//!
//! Provides the integer RGB value type used by the leaf chart along with:
//! - `palette` interop (`Srgb<u8>`, normalized `Srgb`)
//! - Hex color representation and parsing
//! - Euclidean distance in RGB space

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{AnalysisError, Result};

/// An 8-bit RGB color
///
/// Serializes as a three-element array `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbTriple {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbTriple {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Euclidean distance in 0-255 RGB space
    pub fn distance(&self, other: &RgbTriple) -> f64 {
        let dr = self.red as f64 - other.red as f64;
        let dg = self.green as f64 - other.green as f64;
        let db = self.blue as f64 - other.blue as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Convert to a normalized (0.0-1.0) sRGB color
    pub fn to_srgb(&self) -> Srgb {
        Srgb::<u8>::from(*self).into_format()
    }

    /// Hexadecimal color string (e.g., "#9FC765")
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Parse hexadecimal color string
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "#9FC765" or "9fc765")
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` if the string is not six hex digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || AnalysisError::InvalidParameter {
            parameter: "hex".to_string(),
            value: hex.to_string(),
        };

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for RgbTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.red, self.green, self.blue)
    }
}

impl From<[u8; 3]> for RgbTriple {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<RgbTriple> for [u8; 3] {
    fn from(rgb: RgbTriple) -> Self {
        [rgb.red, rgb.green, rgb.blue]
    }
}

impl From<RgbTriple> for Srgb<u8> {
    fn from(rgb: RgbTriple) -> Self {
        Srgb::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl From<Srgb<u8>> for RgbTriple {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}
