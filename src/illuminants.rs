//! The reference white used for CIELAB. Photos are white balanced towards daylight, so everything in
//! this crate is relative to CIE D65, normalized so that the Y (luminance) value is 100.

/// The D65 white point, X, Y and Z, with Y normalized to 100.
pub static D65_WHITE_POINT: [f64; 3] = [95.047, 100.000, 108.883];
