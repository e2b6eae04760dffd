//! Unit conversion utilities.
//!
//! Presentation formats describe geometry in several units: EMUs in the
//! binary and OOXML formats, master units (576 per inch) in older binary
//! atoms, and free-form CSS-like lengths ("2.5cm", "18pt") in ODF. Everything
//! ends up in device-independent pixels at 96 DPI.

use crate::Result;
use std::fmt;
use std::str::FromStr;

pub const EMUS_PER_INCH: i64 = 914_400;
/// EMUs per pixel at 96 DPI.
pub const EMUS_PER_PX: i64 = 9_525;
pub const PPT_MASTER_UNITS_PER_INCH: i64 = 576;
pub const DEFAULT_DPI: u32 = 96;

/// Convert EMUs to pixels, rounding to the nearest pixel.
///
/// ```
/// use deckread::common::unit::emu_to_px;
/// assert_eq!(emu_to_px(9_144_000), 960);
/// assert_eq!(emu_to_px(9_525), 1);
/// assert_eq!(emu_to_px(4_762), 0);
/// ```
#[inline]
pub fn emu_to_px(emu: i64) -> i64 {
    (emu as f64 / EMUS_PER_PX as f64).round() as i64
}

/// Convert PowerPoint master units (576 per inch) to EMUs.
#[inline]
pub fn ppt_master_to_emu(master: i64) -> i64 {
    master.saturating_mul(EMUS_PER_INCH) / PPT_MASTER_UNITS_PER_INCH
}

/// Supported length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Millimeter
    Millimeter,
    /// Centimeter
    Centimeter,
    /// Point (1/72 inch)
    Point,
    /// Pica (1/6 inch)
    Pica,
    /// Inch
    Inch,
    /// Pixel
    Pixel,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Inch => "in",
            Self::Pixel => "px",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Self::Millimeter),
            "cm" => Some(Self::Centimeter),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            "in" | "inch" => Some(Self::Inch),
            "px" => Some(Self::Pixel),
            _ => None,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_suffix(s)
            .ok_or_else(|| crate::Error::InvalidFormat(format!("Unknown length unit '{}'", s)))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length value with unit
///
/// Supports parsing from strings such as "2.5cm" or "10pt" and conversion to
/// pixels.
///
/// # Examples
///
/// ```
/// use deckread::common::unit::{Length, LengthUnit};
///
/// let length = "2.54cm".parse::<Length>().unwrap();
/// assert_eq!(length.unit(), LengthUnit::Centimeter);
/// assert_eq!(length.to_pixels(96).round(), 96.0);
///
/// let length = Length::new(10.0, LengthUnit::Point);
/// assert_eq!(length.to_string(), "10pt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    /// Create a new length measurement
    #[inline]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Get the numeric value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the unit
    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Convert to pixels at the given DPI.
    pub fn to_pixels(&self, dpi: u32) -> f64 {
        let dpi = dpi as f64;
        match self.unit {
            LengthUnit::Pixel => self.value,
            LengthUnit::Inch => self.value * dpi,
            LengthUnit::Centimeter => self.value / 2.54 * dpi,
            LengthUnit::Millimeter => self.value / 25.4 * dpi,
            LengthUnit::Point => self.value / 72.0 * dpi,
            LengthUnit::Pica => self.value / 6.0 * dpi,
        }
    }

    /// Convert to points.
    pub fn to_points(&self) -> f64 {
        match self.unit {
            LengthUnit::Point => self.value,
            _ => self.to_pixels(72),
        }
    }
}

impl FromStr for Length {
    type Err = crate::Error;

    /// Parse a length such as "2.5cm", "-0.3in" or "18pt".
    ///
    /// A bare number is treated as centimeters, the ODF default.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (value, consumed) = fast_float2::parse_partial::<f64, _>(s).map_err(|_| {
            crate::Error::InvalidFormat(format!("No numeric value found in '{}'", s))
        })?;

        let suffix = s[consumed..].trim();
        let unit = if suffix.is_empty() {
            LengthUnit::Centimeter
        } else {
            LengthUnit::from_str(suffix)?
        };

        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

/// Parse a length string straight to pixels at 96 DPI.
///
/// Returns `None` when the string is not a recognisable length.
///
/// ```
/// use deckread::common::unit::length_to_px;
/// assert_eq!(length_to_px("1in"), Some(96.0));
/// assert_eq!(length_to_px("auto"), None);
/// ```
pub fn length_to_px(s: &str) -> Option<f64> {
    s.parse::<Length>().ok().map(|l| l.to_pixels(DEFAULT_DPI))
}

/// Parse a length string to points.
///
/// ```
/// use deckread::common::unit::length_to_pt;
/// assert_eq!(length_to_pt("18pt"), Some(18.0));
/// assert_eq!(length_to_pt("1in"), Some(72.0));
/// ```
pub fn length_to_pt(s: &str) -> Option<f64> {
    s.parse::<Length>().ok().map(|l| l.to_points())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_to_px_rounds() {
        assert_eq!(emu_to_px(0), 0);
        assert_eq!(emu_to_px(914_400), 96);
        assert_eq!(emu_to_px(6_858_000), 720);
        assert_eq!(emu_to_px(14_288), 2);
        assert_eq!(emu_to_px(-9_525), -1);
    }

    #[test]
    fn test_master_units() {
        assert_eq!(ppt_master_to_emu(576), EMUS_PER_INCH);
        assert_eq!(emu_to_px(ppt_master_to_emu(5760)), 960);
    }

    #[test]
    fn test_parse_lengths() {
        let l: Length = "25.4mm".parse().unwrap();
        assert!((l.to_pixels(96) - 96.0).abs() < 1e-9);

        let l: Length = " 12 pt ".parse().unwrap();
        assert_eq!(l.unit(), LengthUnit::Point);
        assert_eq!(l.to_pixels(96), 16.0);

        let l: Length = "-0.5in".parse().unwrap();
        assert_eq!(l.to_pixels(96), -48.0);

        assert!("12furlong".parse::<Length>().is_err());
        assert!("cm".parse::<Length>().is_err());
    }

    #[test]
    fn test_bare_number_is_centimeters() {
        let l: Length = "2.54".parse().unwrap();
        assert_eq!(l.unit(), LengthUnit::Centimeter);
    }
}
