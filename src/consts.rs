//! Fixed constants for the conversion from linear sRGB to CIELAB. The matrix is kept as plain
//! arrays rather than as computed values so that every coefficient can be checked against the
//! published sRGB/D65 figures by eye.

/// Linear sRGB to CIE XYZ, D65 white, for channels in the range 0-1. Rows give X, Y and Z.
pub const SRGB_TO_XYZ_MAT: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// The CIE epsilon: below this normalized value the CIELAB nonlinearity switches to a line.
pub const CIE_EPSILON: f64 = 216.0 / 24389.0;

/// The CIE kappa: the slope of the linear segment of the CIELAB nonlinearity, times 116.
pub const CIE_KAPPA: f64 = 24389.0 / 27.0;
