//! The sRGB transfer function, which maps between gamma-encoded sRGB channels and linear light. All
//! white balancing happens on linear values: multiplying gamma-encoded channels by a gain would
//! change the color's lightness as well as its cast.
//!
//! Both directions follow IEC 61966-2-1 exactly: a short linear segment near black and a 2.4 power
//! curve for the rest.

use crate::color::RGBColor;

/// Decodes one sRGB channel in the range 0-1 to linear light in the range 0-1.
/// # Example
/// ```
/// # use undertone::transfer::srgb_to_linear;
/// assert!((srgb_to_linear(0.5) - 0.21404).abs() <= 1e-5);
/// assert_eq!(srgb_to_linear(0.0), 0.0);
/// ```
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encodes one linear channel in the range 0-1 back to sRGB, the exact inverse of
/// [`srgb_to_linear`].
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// A color as linear light in the sRGB primaries. Channels are normally between 0 and 1, but can
/// leave that range after a gain is applied: [`clamp`](LinearRGBColor::clamp) brings them back.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRGBColor {
    /// Linear red.
    pub r: f64,
    /// Linear green.
    pub g: f64,
    /// Linear blue.
    pub b: f64,
}

impl LinearRGBColor {
    /// Clamps every channel into the range 0-1.
    pub fn clamp(self) -> LinearRGBColor {
        let clamp = |x: f64| {
            if x > 1.0 {
                1.0
            } else if x < 0.0 {
                0.0
            } else {
                x
            }
        };
        LinearRGBColor {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
        }
    }

    /// Re-encodes with the sRGB curve and quantizes to 8 bits. Channels outside 0-1 saturate.
    pub fn to_rgb(&self) -> RGBColor {
        RGBColor::from_channels(
            255.0 * linear_to_srgb(self.r),
            255.0 * linear_to_srgb(self.g),
            255.0 * linear_to_srgb(self.b),
        )
    }
}

impl From<RGBColor> for LinearRGBColor {
    fn from(rgb: RGBColor) -> LinearRGBColor {
        let [r, g, b] = rgb.to_unit();
        LinearRGBColor {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }
}
