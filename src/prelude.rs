//! This module simply brings the most common functionality under a single namespace, to prevent
//! excessive imports: the detection entry points and their options and result, the two
//! classification enums, [`RGBColor`], [`CIELABColor`] and the error type. The individual steps of
//! the pipeline are not included.

pub use crate::classify::{Classification, SkinTone, Undertone};
pub use crate::color::RGBColor;
pub use crate::colors::CIELABColor;
pub use crate::detect::{
    detect_undertone, detect_undertone_with_calibration, DetectionOptions, DetectionResult,
};
pub use crate::error::UndertoneError;
