//! The full undertone detection pipeline: white balance the sampled skin, hair and eye colors with
//! the gray-world gains, convert them to CIELAB, and classify. Everything the classification was
//! based on is returned with it, so a result can always be traced back to the numbers behind it.
//!
//! Detection is a pure function of its arguments: the same colors and options always give the same
//! result, and nothing is cached between calls.

use crate::calibration::{self, ChannelMeans, Gains, DEFAULT_WARM_THRESHOLD};
use crate::classify::{self, Classification, SkinTone, Undertone, UndertoneThresholds};
use crate::color::RGBColor;
use crate::colors::CIELABColor;
use crate::error::UndertoneError;
use crate::transfer::LinearRGBColor;

/// How much each sample counts towards the undertone score. The weights are only summed over the
/// samples that were actually given, so they don't have to add up to 1: with skin alone, skin
/// decides the score by itself whatever its weight.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleWeights {
    /// Weight of the skin sample.
    pub skin: f64,
    /// Weight of the hair sample, if there is one.
    pub hair: f64,
    /// Weight of the eye sample, if there is one.
    pub eye: f64,
}

impl Default for SampleWeights {
    fn default() -> SampleWeights {
        SampleWeights {
            skin: 0.8,
            hair: 0.12,
            eye: 0.08,
        }
    }
}

/// Settings for [`detect_undertone_with_calibration`]. Every field has a default, and when read
/// from JSON any field can be left out:
///
/// ```
/// # use undertone::detect::DetectionOptions;
/// let opts: DetectionOptions = serde_json::from_str(r#"{"autoCalibrate": false}"#).unwrap();
/// assert!(!opts.auto_calibrate);
/// assert_eq!(opts.warm_detect_threshold, 1.03);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionOptions {
    /// Whether to apply the estimated white balance gains. When off, the samples are used as they
    /// are, but the gains and means are still estimated and reported.
    pub auto_calibrate: bool,
    /// The margin used to flag a warm illuminant. Reported only; it never changes the colors.
    pub warm_detect_threshold: f64,
    /// The b\* cutoffs for warm and cool.
    pub undertone_thresholds: UndertoneThresholds,
    /// The weight of each sample in the undertone score.
    pub weights: SampleWeights,
}

impl Default for DetectionOptions {
    fn default() -> DetectionOptions {
        DetectionOptions {
            auto_calibrate: true,
            warm_detect_threshold: DEFAULT_WARM_THRESHOLD,
            undertone_thresholds: UndertoneThresholds::default(),
            weights: SampleWeights::default(),
        }
    }
}

impl DetectionOptions {
    /// Turns white balancing on or off.
    pub fn with_auto_calibrate(mut self, auto_calibrate: bool) -> DetectionOptions {
        self.auto_calibrate = auto_calibrate;
        self
    }

    /// Sets the margin for flagging a warm illuminant.
    pub fn with_warm_detect_threshold(mut self, threshold: f64) -> DetectionOptions {
        self.warm_detect_threshold = threshold;
        self
    }

    /// Sets the b\* cutoffs for warm and cool.
    pub fn with_undertone_thresholds(mut self, warm: f64, cool: f64) -> DetectionOptions {
        self.undertone_thresholds = UndertoneThresholds { warm, cool };
        self
    }

    /// Sets the per-sample weights.
    pub fn with_weights(mut self, skin: f64, hair: f64, eye: f64) -> DetectionOptions {
        self.weights = SampleWeights { skin, hair, eye };
        self
    }
}

/// The white balanced samples, as hex codes. Samples that weren't given are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibratedColors {
    /// The calibrated skin color.
    pub skin_hex: String,
    /// The calibrated hair color.
    pub hair_hex: Option<String>,
    /// The calibrated eye color.
    pub eye_hex: Option<String>,
}

/// The CIELAB values of the calibrated samples.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleLabs {
    /// Skin.
    pub skin: CIELABColor,
    /// Hair.
    pub hair: Option<CIELABColor>,
    /// Eyes.
    pub eye: Option<CIELABColor>,
}

/// Everything [`detect_undertone_with_calibration`] works out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// The samples after white balancing.
    pub calibrated: CalibratedColors,
    /// The gains that were applied: the estimated ones, or identity when calibration is off.
    pub gains: Gains,
    /// The gray-world gains for these samples, whether or not they were applied.
    pub estimated_gains: Gains,
    /// Whether the channel means look like a warm light source.
    pub is_warm_illuminant: bool,
    /// Linear channel means over the uncalibrated samples.
    pub means: ChannelMeans,
    /// The gray level the gains pull towards.
    pub target: f64,
    /// The undertone.
    pub undertone: Undertone,
    /// The weighted b\* the undertone was decided on.
    pub score: f64,
    /// The skin tone band, from the calibrated skin's L\*.
    pub skin_tone: SkinTone,
    /// CIELAB values of every calibrated sample.
    pub labs: SampleLabs,
    /// The options in effect.
    pub settings: DetectionOptions,
}

impl DetectionResult {
    /// The undertone and skin tone, without the diagnostics.
    pub fn classification(&self) -> Classification {
        Classification {
            undertone: self.undertone,
            skin_tone: self.skin_tone,
        }
    }
}

/// Treats a missing or empty optional sample the same way.
fn present(hex: Option<&str>) -> Option<&str> {
    hex.filter(|h| !h.is_empty())
}

/// Detects the undertone and skin tone of a person from colors sampled from a photo of them. Only
/// `skin_hex` is required; hair and eye colors help the white balance and add a little to the
/// undertone score.
///
/// The samples are first white balanced with gray-world gains estimated from all of them (see
/// [`calibration::estimate_gains`]), unless `options.auto_calibrate` is off. The calibrated
/// samples go to CIELAB; the weighted mean of their b\* values decides the undertone, and the
/// skin's L\* alone decides the skin tone.
/// # Errors
/// Returns [`UndertoneError::MissingRequiredInput`] if `skin_hex` is empty, and
/// [`UndertoneError::InvalidFormat`] if any given sample is not a valid hex code. Empty hair or eye
/// strings count as not given.
/// # Example
/// ```
/// # use undertone::detect::{detect_undertone_with_calibration, DetectionOptions};
/// # use undertone::classify::SkinTone;
/// let res = detect_undertone_with_calibration(
///     "#e6c9b3",
///     Some("#5a3d2b"),
///     Some("#2f241f"),
///     DetectionOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(res.skin_tone, SkinTone::VeryLight);
/// assert!(res.is_warm_illuminant);
/// ```
pub fn detect_undertone_with_calibration(
    skin_hex: &str,
    hair_hex: Option<&str>,
    eye_hex: Option<&str>,
    options: DetectionOptions,
) -> Result<DetectionResult, UndertoneError> {
    if skin_hex.is_empty() {
        return Err(UndertoneError::MissingRequiredInput("skin"));
    }
    // parse everything up front so a bad sample fails before any math is done
    let skin = RGBColor::from_hex_code(skin_hex)?;
    let hair = match present(hair_hex) {
        Some(hex) => Some(RGBColor::from_hex_code(hex)?),
        None => None,
    };
    let eye = match present(eye_hex) {
        Some(hex) => Some(RGBColor::from_hex_code(hex)?),
        None => None,
    };

    let samples: Vec<LinearRGBColor> = Some(skin)
        .into_iter()
        .chain(hair)
        .chain(eye)
        .map(LinearRGBColor::from)
        .collect();
    let estimate = calibration::gains_from_linear(&samples);
    let is_warm = estimate.means.is_warm(options.warm_detect_threshold);
    let applied = if options.auto_calibrate {
        estimate.gains
    } else {
        Gains::identity()
    };
    debug!(
        samples = samples.len(),
        gain_r = estimate.gains.r,
        gain_g = estimate.gains.g,
        gain_b = estimate.gains.b,
        warm_illuminant = is_warm,
        auto_calibrate = options.auto_calibrate,
        "estimated gray-world gains"
    );

    let skin_cal = calibration::apply_gains_to_rgb(skin, &applied);
    let hair_cal = hair.map(|c| calibration::apply_gains_to_rgb(c, &applied));
    let eye_cal = eye.map(|c| calibration::apply_gains_to_rgb(c, &applied));

    let labs = SampleLabs {
        skin: CIELABColor::from(skin_cal),
        hair: hair_cal.map(CIELABColor::from),
        eye: eye_cal.map(CIELABColor::from),
    };
    trace!(skin = ?labs.skin, hair = ?labs.hair, eye = ?labs.eye, "calibrated CIELAB");

    let weights = options.weights;
    let weighted = [
        Some((weights.skin, labs.skin.b)),
        labs.hair.map(|lab| (weights.hair, lab.b)),
        labs.eye.map(|lab| (weights.eye, lab.b)),
    ];
    let (total_weight, weighted_b) = weighted
        .iter()
        .flatten()
        .fold((0.0, 0.0), |(tw, wb), &(w, b)| (tw + w, wb + w * b));
    let score = if total_weight == 0.0 {
        weighted_b
    } else {
        weighted_b / total_weight
    };

    let undertone = classify::classify_undertone(score, &options.undertone_thresholds);
    let skin_tone = classify::classify_by_l(labs.skin.l);
    debug!(score, %undertone, %skin_tone, lightness = labs.skin.l, "classified sample");

    Ok(DetectionResult {
        calibrated: CalibratedColors {
            skin_hex: skin_cal.to_hex_code(),
            hair_hex: hair_cal.map(|c| c.to_hex_code()),
            eye_hex: eye_cal.map(|c| c.to_hex_code()),
        },
        gains: applied,
        estimated_gains: estimate.gains,
        is_warm_illuminant: is_warm,
        means: estimate.means,
        target: estimate.target,
        undertone,
        score,
        skin_tone,
        labs,
        settings: options,
    })
}

/// The older name of [`detect_undertone_with_calibration`].
pub fn detect_undertone(
    skin_hex: &str,
    hair_hex: Option<&str>,
    eye_hex: Option<&str>,
    options: DetectionOptions,
) -> Result<DetectionResult, UndertoneError> {
    detect_undertone_with_calibration(skin_hex, hair_hex, eye_hex, options)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn detect(skin: &str, hair: Option<&str>, eye: Option<&str>) -> DetectionResult {
        detect_undertone_with_calibration(skin, hair, eye, DetectionOptions::default()).unwrap()
    }

    #[test]
    fn test_full_sample_set() {
        let res = detect("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"));
        assert_eq!(res.calibrated.skin_hex, "#caced0");
        assert_eq!(res.calibrated.hair_hex.as_ref().map(String::as_str), Some("#4e3f34"));
        assert_eq!(res.calibrated.eye_hex.as_ref().map(String::as_str), Some("#282526"));
        assert!(res.is_warm_illuminant);
        assert_eq!(res.gains, res.estimated_gains);
        assert!((res.gains.r - 0.7444227).abs() <= 1e-6);
        assert!((res.target - 0.2287774).abs() <= 1e-6);
        assert!((res.labs.skin.l - 82.5146).abs() <= 1e-3);
        assert!((res.score - -0.0844661).abs() <= 1e-5);
        assert_eq!(res.undertone, Undertone::Cool);
        assert_eq!(res.skin_tone, SkinTone::VeryLight);
        assert_eq!(res.settings, DetectionOptions::default());
    }

    #[test]
    fn test_deterministic() {
        let first = detect("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"));
        for _ in 0..10 {
            assert_eq!(detect("#e6c9b3", Some("#5a3d2b"), Some("#2f241f")), first);
        }
    }

    #[test]
    fn test_without_calibration() {
        let opts = DetectionOptions::default().with_auto_calibrate(false);
        let res =
            detect_undertone_with_calibration("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"), opts)
                .unwrap();
        assert_eq!(res.calibrated.skin_hex, "#e6c9b3");
        assert_eq!(res.calibrated.hair_hex.as_ref().map(String::as_str), Some("#5a3d2b"));
        assert_eq!(res.calibrated.eye_hex.as_ref().map(String::as_str), Some("#2f241f"));
        assert_eq!(res.gains, Gains::identity());
        // the diagnostics are still the calibrated ones
        let calibrated = detect("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"));
        assert_eq!(res.estimated_gains, calibrated.estimated_gains);
        assert_eq!(res.means, calibrated.means);
        assert_eq!(res.is_warm_illuminant, calibrated.is_warm_illuminant);
        assert!((res.score - 14.1649777).abs() <= 1e-5);
        assert_eq!(res.undertone, Undertone::Warm);
        assert_eq!(res.skin_tone, SkinTone::VeryLight);
        assert!(!res.settings.auto_calibrate);
    }

    #[test]
    fn test_skin_only() {
        // one sample calibrates to a gray, so its b* is nil
        let res = detect("#e6c9b3", None, None);
        assert_eq!(res.calibrated.skin_hex, "#cdcdcd");
        assert_eq!(res.calibrated.hair_hex, None);
        assert_eq!(res.labs.hair, None);
        assert!(res.score.abs() <= 1e-4);
        assert_eq!(res.undertone, Undertone::Cool);
        // the skin weight is renormalized to 1
        let raw = detect_undertone_with_calibration(
            "#f7efe6",
            None,
            None,
            DetectionOptions::default().with_auto_calibrate(false),
        )
        .unwrap();
        assert!((raw.score - raw.labs.skin.b).abs() <= 1e-12);
        assert!((raw.score - 5.3000980).abs() <= 1e-5);
        assert_eq!(raw.undertone, Undertone::Neutral);
    }

    #[test]
    fn test_empty_optional_samples_are_absent() {
        let with_empty = detect("#e6c9b3", Some(""), Some(""));
        assert_eq!(with_empty, detect("#e6c9b3", None, None));
    }

    #[test]
    fn test_tuned_thresholds() {
        let opts = DetectionOptions::default()
            .with_auto_calibrate(false)
            .with_undertone_thresholds(20.0, 0.0);
        let res = detect_undertone_with_calibration("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"), opts)
            .unwrap();
        assert_eq!(res.undertone, Undertone::Neutral);
        assert_eq!(res.settings.undertone_thresholds.warm, 20.0);
    }

    #[test]
    fn test_zero_weights() {
        let opts = DetectionOptions::default().with_weights(0.0, 0.0, 0.0);
        let res = detect_undertone_with_calibration("#e6c9b3", Some("#5a3d2b"), None, opts).unwrap();
        assert_eq!(res.score, 0.0);
    }

    #[test]
    fn test_weight_normalization() {
        // only the weights of present samples count
        let opts = DetectionOptions::default()
            .with_auto_calibrate(false)
            .with_weights(0.5, 0.5, 100.0);
        let res = detect_undertone_with_calibration("#e6c9b3", Some("#5a3d2b"), None, opts).unwrap();
        let expected = (res.labs.skin.b + res.labs.hair.unwrap().b) / 2.0;
        assert!((res.score - expected).abs() <= 1e-12);
    }

    #[test]
    fn test_score_monotonic_in_skin_yellowness() {
        // same hair and eyes, skin getting steadily more yellow; the raw colors are only what gets
        // scored when calibration is off
        let opts = DetectionOptions::default().with_auto_calibrate(false);
        let mut last_score = std::f64::NEG_INFINITY;
        let mut last_undertone = Undertone::Cool;
        for blue in (100..=230u8).rev().step_by(10) {
            let skin = RGBColor::from((230, 201, blue)).to_hex_code();
            let res =
                detect_undertone_with_calibration(&skin, Some("#5a3d2b"), Some("#2f241f"), opts)
                    .unwrap();
            assert!(res.score >= last_score);
            assert!(res.undertone >= last_undertone);
            last_score = res.score;
            last_undertone = res.undertone;
        }
        assert_eq!(last_undertone, Undertone::Warm);
    }

    #[test]
    fn test_calibrated_score_follows_calibrated_b() {
        // with calibration on, the gains move with the skin sample, so the score tracks the
        // calibrated b* values: always their weighted mean, rising with the calibrated skin b*
        let weights = SampleWeights::default();
        for blue in (100..=230u8).rev().step_by(10) {
            let skin = RGBColor::from((230, 201, blue)).to_hex_code();
            let res = detect(&skin, Some("#5a3d2b"), Some("#2f241f"));
            let (hair, eye) = (res.labs.hair.unwrap(), res.labs.eye.unwrap());
            let total = weights.skin + weights.hair + weights.eye;
            let mean = (weights.skin * res.labs.skin.b
                + weights.hair * hair.b
                + weights.eye * eye.b)
                / total;
            assert!((res.score - mean).abs() <= 1e-9, "{}: {} != {}", skin, res.score, mean);
            let lowest = res.labs.skin.b.min(hair.b).min(eye.b);
            let highest = res.labs.skin.b.max(hair.b).max(eye.b);
            assert!(lowest <= res.score && res.score <= highest);
            // a yellower calibrated skin, everything else held, raises the score by its weight
            let shifted = (weights.skin * (res.labs.skin.b + 1.0)
                + weights.hair * hair.b
                + weights.eye * eye.b)
                / total;
            assert!((shifted - res.score - weights.skin / total).abs() <= 1e-9);
        }
    }

    #[test]
    fn test_validation() {
        let opts = DetectionOptions::default();
        assert_eq!(
            detect_undertone_with_calibration("", None, None, opts),
            Err(UndertoneError::MissingRequiredInput("skin"))
        );
        assert_eq!(
            detect_undertone_with_calibration("#zz11ff", None, None, opts),
            Err(UndertoneError::InvalidFormat("#zz11ff".to_string()))
        );
        assert_eq!(
            detect_undertone_with_calibration("#e6c9b3", Some("#5a3d2b"), Some("#2f24"), opts),
            Err(UndertoneError::InvalidFormat("#2f24".to_string()))
        );
        assert_eq!(
            detect_undertone("   ", None, None, opts),
            Err(UndertoneError::InvalidFormat("   ".to_string()))
        );
    }

    #[test]
    fn test_alias_matches() {
        let opts = DetectionOptions::default();
        assert_eq!(
            detect_undertone("#f7efe6", Some("#abc"), None, opts),
            detect_undertone_with_calibration("#f7efe6", Some("#abc"), None, opts)
        );
    }

    #[test]
    fn test_manual_override() {
        // a hand-entered classification has the same shape as a computed one
        let res = detect("#e6c9b3", Some("#5a3d2b"), Some("#2f241f"));
        let computed = res.classification();
        assert_eq!(
            computed,
            Classification {
                undertone: Undertone::Cool,
                skin_tone: SkinTone::VeryLight,
            }
        );
        let manual = Classification {
            undertone: Undertone::Warm,
            skin_tone: SkinTone::Light,
        };
        let json = serde_json::to_value(&manual).unwrap();
        assert_eq!(json, serde_json::json!({"undertone": "warm", "skinTone": "light"}));
        let back: Classification = serde_json::from_value(json).unwrap();
        assert_eq!(back, manual);
        // and the computed one serializes with the same names as the full result
        let full = serde_json::to_value(&res).unwrap();
        let short = serde_json::to_value(&computed).unwrap();
        assert_eq!(short["undertone"], full["undertone"]);
        assert_eq!(short["skinTone"], full["skinTone"]);
    }

    #[test]
    fn test_result_serialization() {
        let res = detect("#e6c9b3", None, Some("#2f241f"));
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["calibrated"]["hairHex"], serde_json::Value::Null);
        assert!(json["calibrated"]["skinHex"].is_string());
        assert!(json["means"]["meanR"].is_number());
        assert!(json["labs"]["skin"]["L"].is_number());
        assert_eq!(json["skinTone"], res.skin_tone.as_str());
        assert_eq!(json["undertone"], res.undertone.as_str());
        assert_eq!(json["settings"]["undertoneThresholds"]["warm"], 6.0);
        let back: DetectionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.classification(), res.classification());
    }

    #[test]
    fn test_partial_options() {
        let opts: DetectionOptions =
            serde_json::from_str(r#"{"weights": {"skin": 1.0, "hair": 0.0, "eye": 0.0}}"#).unwrap();
        assert!(opts.auto_calibrate);
        assert_eq!(opts.weights.skin, 1.0);
        assert_eq!(opts.undertone_thresholds, UndertoneThresholds::default());
    }
}
