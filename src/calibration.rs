//! White balance under the gray-world assumption. The idea is that the skin, hair and eye colors
//! sampled from one photo, averaged together in linear light, should come out a neutral gray: if the
//! average leans red, the light in the photo was probably warm, and dividing the cast back out gives
//! colors closer to what they'd look like in daylight.
//!
//! This is a heuristic with a very small sample. It holds up because skin, hair and eyes together
//! tend to average out near neutral; it is not a general-purpose white balance.

use crate::color::RGBColor;
use crate::error::UndertoneError;
use crate::transfer::LinearRGBColor;

/// Means below this are treated as zero when computing gains.
const MEAN_EPSILON: f64 = 1e-9;

/// The default margin for [`is_warm_illuminant`]: each channel has to beat the next by 3%.
pub const DEFAULT_WARM_THRESHOLD: f64 = 1.03;

/// Per-channel multipliers applied in linear light.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    /// Gain on linear red.
    pub r: f64,
    /// Gain on linear green.
    pub g: f64,
    /// Gain on linear blue.
    pub b: f64,
}

impl Gains {
    /// Gains that leave every color as it is.
    pub fn identity() -> Gains {
        Gains {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }

    /// Multiplies each channel by its gain and clamps the result back into 0-1.
    pub fn apply(&self, lin: LinearRGBColor) -> LinearRGBColor {
        LinearRGBColor {
            r: lin.r * self.r,
            g: lin.g * self.g,
            b: lin.b * self.b,
        }
        .clamp()
    }
}

impl Default for Gains {
    fn default() -> Gains {
        Gains::identity()
    }
}

/// The average linear value of each channel over a set of samples.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMeans {
    /// Mean linear red.
    pub mean_r: f64,
    /// Mean linear green.
    pub mean_g: f64,
    /// Mean linear blue.
    pub mean_b: f64,
}

impl ChannelMeans {
    /// Same as [`is_warm_illuminant`].
    pub fn is_warm(&self, threshold: f64) -> bool {
        is_warm_illuminant(self, threshold)
    }
}

/// The outcome of gray-world estimation: the gains, the channel means they were derived from, and
/// the gray level the means were pulled towards.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainEstimate {
    /// Gains that take each channel mean to `target`.
    pub gains: Gains,
    /// Per-channel means over the samples, in linear light.
    pub means: ChannelMeans,
    /// The mean of the three channel means, floored at a tiny positive value.
    pub target: f64,
}

/// Estimates white balance gains from a set of sampled colors. Every sample is converted to linear
/// light and each channel is averaged; the gray target is the mean of those three averages, and
/// each gain is `target / mean`. A channel whose mean is effectively zero gets a gain of 1 instead.
/// # Errors
/// Returns [`UndertoneError::MissingRequiredInput`] if `samples` is empty, and
/// [`UndertoneError::InvalidFormat`] if any sample is not a valid hex code. Every sample is parsed
/// before any averaging is done.
/// # Example
/// ```
/// # use undertone::calibration::estimate_gains;
/// let est = estimate_gains(&["#808080"]).unwrap();
/// assert!((est.gains.r - 1.0).abs() <= 1e-12);
/// assert!((est.target - est.means.mean_g).abs() <= 1e-12);
/// ```
pub fn estimate_gains<S: AsRef<str>>(samples: &[S]) -> Result<GainEstimate, UndertoneError> {
    if samples.is_empty() {
        return Err(UndertoneError::MissingRequiredInput("samples"));
    }
    let linear = samples
        .iter()
        .map(|hex| RGBColor::from_hex_code(hex.as_ref()).map(LinearRGBColor::from))
        .collect::<Result<Vec<LinearRGBColor>, UndertoneError>>()?;
    Ok(gains_from_linear(&linear))
}

/// The numeric half of [`estimate_gains`], for samples that have already been parsed. `linear`
/// must not be empty.
pub(crate) fn gains_from_linear(linear: &[LinearRGBColor]) -> GainEstimate {
    let n = linear.len() as f64;
    let means = ChannelMeans {
        mean_r: linear.iter().map(|c| c.r).sum::<f64>() / n,
        mean_g: linear.iter().map(|c| c.g).sum::<f64>() / n,
        mean_b: linear.iter().map(|c| c.b).sum::<f64>() / n,
    };
    let target = ((means.mean_r + means.mean_g + means.mean_b) / 3.0).max(MEAN_EPSILON);
    let gain = |mean: f64| {
        if mean > MEAN_EPSILON {
            target / mean
        } else {
            1.0
        }
    };
    GainEstimate {
        gains: Gains {
            r: gain(means.mean_r),
            g: gain(means.mean_g),
            b: gain(means.mean_b),
        },
        means,
        target,
    }
}

/// Guesses whether the samples were lit by a warm (tungsten-like) light: true only when red beats
/// green and green beats blue, each by the factor `threshold`. This is purely a diagnostic and
/// plays no part in computing gains.
/// # Example
/// ```
/// # use undertone::calibration::{is_warm_illuminant, ChannelMeans};
/// let means = ChannelMeans { mean_r: 0.6, mean_g: 0.5, mean_b: 0.4 };
/// assert!(is_warm_illuminant(&means, 1.03));
/// assert!(!is_warm_illuminant(&means, 1.3));
/// ```
pub fn is_warm_illuminant(means: &ChannelMeans, threshold: f64) -> bool {
    means.mean_r > means.mean_g * threshold && means.mean_g > means.mean_b * threshold
}

/// Applies gains to a hex color in linear light, clamping the result, and gives back the hex code
/// of the corrected color. With [`Gains::identity`] this returns the input in long lowercase form.
/// # Errors
/// Returns [`UndertoneError::InvalidFormat`] if `hex` is malformed.
/// # Example
/// ```
/// # use undertone::calibration::{apply_gains, Gains};
/// assert_eq!(apply_gains("#E6C9B3", &Gains::identity()).unwrap(), "#e6c9b3");
/// let doubled = Gains { r: 2.0, g: 2.0, b: 2.0 };
/// assert_eq!(apply_gains("#808080", &doubled).unwrap(), "#b0b0b0");
/// ```
pub fn apply_gains(hex: &str, gains: &Gains) -> Result<String, UndertoneError> {
    let rgb = RGBColor::from_hex_code(hex)?;
    Ok(apply_gains_to_rgb(rgb, gains).to_hex_code())
}

/// [`apply_gains`] for a color that has already been parsed.
pub(crate) fn apply_gains_to_rgb(rgb: RGBColor, gains: &Gains) -> RGBColor {
    gains.apply(LinearRGBColor::from(rgb)).to_rgb()
}
