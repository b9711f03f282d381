//! A module that implements the [CIELAB color
//! space](https://en.wikipedia.org/wiki/Lab_color_space#CIELAB). The CIELAB color space is used as a
//! device-independent color space that has an L value for lightness and two opponent color axes for
//! chromaticity (loosely, hue). Formally, the three values that define a CIELAB color are called
//! L\*, a\*, and b\* to distinguish them from [generic
//! Lab](https://en.wikipedia.org/wiki/Lab_color_space), but for convenience they are just `l`, `a`,
//! and `b` in this module.
//!
//! For skin, the b\* axis carries most of what people mean by undertone: yellow-leaning skin reads
//! as warm, pink- or blue-leaning skin as cool. L\* carries how light or deep the skin is.

use crate::color::{RGBColor, XYZColor};
use crate::consts::{CIE_EPSILON, CIE_KAPPA};
use crate::error::UndertoneError;
use crate::illuminants::D65_WHITE_POINT;
use crate::transfer::LinearRGBColor;

/// A color in the CIELAB color space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELABColor {
    /// The lightness of a given color. 0 is black, whereas 100 is the value of diffuse white.
    #[serde(rename = "L")]
    pub l: f64,
    /// The green (negative) to red (positive) opponent axis.
    pub a: f64,
    /// The blue (negative) to yellow (positive) opponent axis. Most skin sits between 0 and 30.
    pub b: f64,
}

impl CIELABColor {
    /// Converts a given CIE XYZ color to CIELAB, relative to the D65 white point.
    pub fn from_xyz(xyz: XYZColor) -> CIELABColor {
        // https://en.wikipedia.org/wiki/Lab_color_space#CIELAB-CIEXYZ_conversions
        let f = |t: f64| {
            if t > CIE_EPSILON {
                t.cbrt()
            } else {
                (CIE_KAPPA * t + 16.0) / 116.0
            }
        };
        let fx = f(xyz.x / D65_WHITE_POINT[0]);
        let fy = f(xyz.y / D65_WHITE_POINT[1]);
        let fz = f(xyz.z / D65_WHITE_POINT[2]);

        // the nonlinearity above accounts for human perception, so the rest is linear
        // note how a and b are opponent color axes
        CIELABColor {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<RGBColor> for CIELABColor {
    /// Goes through linear sRGB and XYZ (D65).
    fn from(rgb: RGBColor) -> CIELABColor {
        CIELABColor::from_xyz(XYZColor::from_linear(LinearRGBColor::from(rgb)))
    }
}

/// Parses a hex code and converts it to CIELAB with a D65 white.
/// # Errors
/// Returns [`UndertoneError::InvalidFormat`] if the hex code is malformed.
/// # Example
/// ```
/// # use undertone::colors::hex_to_lab;
/// let white = hex_to_lab("#ffffff").unwrap();
/// assert!((white.l - 100.0).abs() <= 0.5);
/// assert!(white.a.abs() <= 0.5 && white.b.abs() <= 0.5);
/// ```
pub fn hex_to_lab(hex: &str) -> Result<CIELABColor, UndertoneError> {
    Ok(CIELABColor::from(RGBColor::from_hex_code(hex)?))
}
