//! Turning CIELAB numbers into the two labels people actually use for skin: the undertone, read off
//! the b\* (blue-yellow) axis, and the skin tone, read off L\* (lightness).
//!
//! Both label sets are ordered. Undertones go cool < neutral < warm, following b\*; skin tones go
//! deep < tan < medium < light < very light, following L\*.

use std::fmt;

/// The undertone of a skin color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    /// Pink, red or blue-leaning: low b\*.
    Cool,
    /// Between the two thresholds.
    Neutral,
    /// Yellow, peach or golden-leaning: high b\*.
    Warm,
}

impl Undertone {
    /// The lowercase name, as used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Undertone::Cool => "cool",
            Undertone::Neutral => "neutral",
            Undertone::Warm => "warm",
        }
    }
}

impl fmt::Display for Undertone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The b\* cutoffs between undertones.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndertoneThresholds {
    /// A score at or above this is warm.
    pub warm: f64,
    /// A score at or below this is cool.
    pub cool: f64,
}

impl Default for UndertoneThresholds {
    fn default() -> UndertoneThresholds {
        UndertoneThresholds {
            warm: 6.0,
            cool: 0.5,
        }
    }
}

/// Classifies a b\* score. Warm is checked first, so if the thresholds overlap a score that meets
/// both is warm.
/// # Example
/// ```
/// # use undertone::classify::{classify_undertone, Undertone, UndertoneThresholds};
/// let th = UndertoneThresholds::default();
/// assert_eq!(classify_undertone(14.7, &th), Undertone::Warm);
/// assert_eq!(classify_undertone(3.0, &th), Undertone::Neutral);
/// assert_eq!(classify_undertone(0.5, &th), Undertone::Cool);
/// ```
pub fn classify_undertone(score: f64, thresholds: &UndertoneThresholds) -> Undertone {
    if score >= thresholds.warm {
        Undertone::Warm
    } else if score <= thresholds.cool {
        Undertone::Cool
    } else {
        Undertone::Neutral
    }
}

/// A band of skin lightness.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkinTone {
    /// L\* below 35.
    #[serde(rename = "deep")]
    Deep,
    /// L\* from 35 up to 50.
    #[serde(rename = "tan")]
    Tan,
    /// L\* from 50 up to 65.
    #[serde(rename = "medium")]
    Medium,
    /// L\* from 65 up to 80.
    #[serde(rename = "light")]
    Light,
    /// L\* of 80 and above.
    #[serde(rename = "very light")]
    VeryLight,
}

/// The lower L\* bound of each band, lightest first. Anything below the last bound is deep.
static SKIN_TONE_BANDS: [(f64, SkinTone); 4] = [
    (80.0, SkinTone::VeryLight),
    (65.0, SkinTone::Light),
    (50.0, SkinTone::Medium),
    (35.0, SkinTone::Tan),
];

impl SkinTone {
    /// The name of the band, as used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match *self {
            SkinTone::Deep => "deep",
            SkinTone::Tan => "tan",
            SkinTone::Medium => "medium",
            SkinTone::Light => "light",
            SkinTone::VeryLight => "very light",
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Puts an L\* value into one of the five skin tone bands. Each band includes its lower bound.
/// # Example
/// ```
/// # use undertone::classify::{classify_by_l, SkinTone};
/// assert_eq!(classify_by_l(82.5), SkinTone::VeryLight);
/// assert_eq!(classify_by_l(65.0), SkinTone::Light);
/// assert_eq!(classify_by_l(34.99), SkinTone::Deep);
/// ```
pub fn classify_by_l(l: f64) -> SkinTone {
    SKIN_TONE_BANDS
        .iter()
        .find(|&&(lower, _)| l >= lower)
        .map(|&(_, tone)| tone)
        .unwrap_or(SkinTone::Deep)
}

/// An undertone and a skin tone together. [`DetectionResult::classification`] gives the computed
/// one; a caller that lets users override the detection builds its own and picks between the two.
///
/// [`DetectionResult::classification`]: ../detect/struct.DetectionResult.html#method.classification
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// The undertone.
    pub undertone: Undertone,
    /// The skin tone band.
    pub skin_tone: SkinTone,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {} undertone", self.skin_tone, self.undertone)
    }
}
