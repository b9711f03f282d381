//! This module defines the two plain color types everything else is built on: [`RGBColor`], an
//! 8-bit sRGB color that is read from and written to hex codes, and [`XYZColor`], a point in the CIE
//! 1931 XYZ space that sits between linear RGB and CIELAB.
//!
//! Hex codes are accepted in the forms people actually type: `"#e6c9b3"`, `"E6C9B3"`, `"#abc"`, or
//! `"abc"`, with surrounding whitespace ignored. Output is always the long, lowercase form.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::consts::SRGB_TO_XYZ_MAT;
use crate::error::UndertoneError;
use crate::transfer::LinearRGBColor;

lazy_static! {
    static ref HEX_CODE: Regex = Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// A color in the sRGB space with 8 bits per channel, the kind of color a pixel sampled out of a
/// photo gives you.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red channel, 0-255.
    pub r: u8,
    /// The green channel, 0-255.
    pub g: u8,
    /// The blue channel, 0-255.
    pub b: u8,
}

impl RGBColor {
    /// Parses a hex code. Whitespace and a single leading `#` are ignored and case doesn't matter;
    /// what is left has to be exactly 3 or 6 hex digits. The short form doubles every digit, so
    /// `"abc"` is the same color as `"aabbcc"`.
    /// # Errors
    /// Returns [`UndertoneError::InvalidFormat`] for anything else, including the empty string.
    /// # Example
    /// ```
    /// # use undertone::color::RGBColor;
    /// let skin = RGBColor::from_hex_code("#E6C9B3").unwrap();
    /// assert_eq!((skin.r, skin.g, skin.b), (230, 201, 179));
    /// let short = RGBColor::from_hex_code("abc").unwrap();
    /// assert_eq!((short.r, short.g, short.b), (0xaa, 0xbb, 0xcc));
    /// ```
    pub fn from_hex_code(hex: &str) -> Result<RGBColor, UndertoneError> {
        let trimmed = hex.trim();
        let digits = match HEX_CODE.captures(trimmed).and_then(|caps| caps.get(1)) {
            Some(m) => m.as_str(),
            None => return Err(UndertoneError::InvalidFormat(hex.to_string())),
        };
        // the regex guarantees every byte is an ASCII hex digit
        let nibbles: Vec<u8> = digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        let (r, g, b) = if nibbles.len() == 3 {
            (nibbles[0] * 17, nibbles[1] * 17, nibbles[2] * 17)
        } else {
            (
                nibbles[0] * 16 + nibbles[1],
                nibbles[2] * 16 + nibbles[3],
                nibbles[4] * 16 + nibbles[5],
            )
        };
        Ok(RGBColor { r, g, b })
    }

    /// Builds a color out of fractional channels on the 0-255 scale, rounding each to the nearest
    /// integer and clamping it into range. NaN becomes 0.
    pub fn from_channels(r: f64, g: f64, b: f64) -> RGBColor {
        let to_u8 = |v: f64| {
            let rounded = v.round();
            if rounded >= 255.0 {
                255u8
            } else if rounded > 0.0 {
                rounded as u8
            } else {
                0u8
            }
        };
        RGBColor {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    /// Gives the long, lowercase hex code of the color, such as `"#e6c9b3"`.
    pub fn to_hex_code(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The sRGB channels scaled into the range 0-1, still gamma-encoded.
    pub fn to_unit(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for RGBColor {
    type Err = UndertoneError;

    fn from_str(s: &str) -> Result<RGBColor, UndertoneError> {
        RGBColor::from_hex_code(s)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex_code())
    }
}

impl From<(u8, u8, u8)> for RGBColor {
    fn from(rgb: (u8, u8, u8)) -> RGBColor {
        RGBColor {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }
    }
}

/// Parses a hex code into its three 8-bit channels. See [`RGBColor::from_hex_code`] for exactly what
/// is accepted.
pub fn hex_to_rgb(hex: &str) -> Result<RGBColor, UndertoneError> {
    RGBColor::from_hex_code(hex)
}

/// Formats three channels on the 0-255 scale as a lowercase hex code, rounding and clamping each
/// channel first.
/// # Example
/// ```
/// # use undertone::color::rgb_to_hex;
/// assert_eq!(rgb_to_hex(230.0, 201.4, 178.6), "#e6c9b3");
/// assert_eq!(rgb_to_hex(-20.0, 300.0, 9.0), "#00ff09");
/// ```
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    RGBColor::from_channels(r, g, b).to_hex_code()
}

/// A point in the CIE 1931 XYZ color space relative to D65, scaled so that the reference white has
/// a Y of 100.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis.
    pub x: f64,
    /// The Y axis: relative luminance, 0-100.
    pub y: f64,
    /// The Z axis.
    pub z: f64,
}

impl XYZColor {
    /// Converts linear sRGB into XYZ with the sRGB primaries and a D65 white.
    pub fn from_linear(lin: LinearRGBColor) -> XYZColor {
        let m = SRGB_TO_XYZ_MAT;
        let rgb = [lin.r, lin.g, lin.b];
        let row = |i: usize| (m[i][0] * rgb[0] + m[i][1] * rgb[1] + m[i][2] * rgb[2]) * 100.0;
        XYZColor {
            x: row(0),
            y: row(1),
            z: row(2),
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex_to_rgb("#e6c9b3").unwrap(), RGBColor::from((230, 201, 179)));
        assert_eq!(hex_to_rgb("E6C9B3").unwrap(), RGBColor::from((230, 201, 179)));
        assert_eq!(hex_to_rgb("  #5a3d2b\n").unwrap(), RGBColor::from((90, 61, 43)));
        // shorthand doubles each nibble
        assert_eq!(hex_to_rgb("#abc").unwrap(), RGBColor::from((0xaa, 0xbb, 0xcc)));
        assert_eq!(hex_to_rgb("f0a").unwrap(), RGBColor::from((255, 0, 170)));
        assert_eq!("#2f241f".parse::<RGBColor>().unwrap(), RGBColor::from((47, 36, 31)));
    }

    #[test]
    fn test_hex_parsing_errors() {
        for bad in &["", "#", "#ab", "#abcd", "#abcde", "#abcdef0", "#zz11ff", "##abc", "ab c", "#12345g"] {
            assert_eq!(
                hex_to_rgb(bad),
                Err(UndertoneError::InvalidFormat(bad.to_string())),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_hex_round_trip() {
        // every value of every channel, in every position
        for v in 0..=255u8 {
            for &rgb in &[(v, 0, 0), (0, v, 0), (0, 0, v), (v, v / 2, 255 - v)] {
                let hex = RGBColor::from(rgb).to_hex_code();
                assert_eq!(hex_to_rgb(&hex).unwrap().to_hex_code(), hex);
            }
        }
    }

    #[test]
    fn test_rgb_to_hex_clamping() {
        assert_eq!(rgb_to_hex(0.0, 0.0, 0.0), "#000000");
        assert_eq!(rgb_to_hex(255.0, 255.0, 255.0), "#ffffff");
        assert_eq!(rgb_to_hex(-1.0, 255.6, 1000.0), "#00ffff");
        assert_eq!(rgb_to_hex(9.5, 10.49, 15.0), "#0a0a0f");
        assert_eq!(rgb_to_hex(std::f64::NAN, 1.0, 2.0), "#000102");
        assert_eq!(RGBColor::from((1, 2, 3)).to_string(), "#010203");
    }

    #[test]
    fn test_xyz_of_white_and_black() {
        let white = XYZColor::from_linear(LinearRGBColor { r: 1.0, g: 1.0, b: 1.0 });
        assert!((white.x - 95.047).abs() <= 1e-6);
        assert!((white.y - 100.00001).abs() <= 1e-6);
        assert!((white.z - 108.883).abs() <= 1e-6);
        let black = XYZColor::from_linear(LinearRGBColor { r: 0.0, g: 0.0, b: 0.0 });
        assert_eq!(black, XYZColor { x: 0.0, y: 0.0, z: 0.0 });
    }
}
