//! Undertone is a small library for telling the undertone (warm, neutral or cool) and the skin tone
//! (very light to deep) of a person from a handful of colors sampled from a photo of them: their
//! skin, and optionally their hair and eyes.
//!
//! Photos are rarely taken under neutral light, and a tungsten bulb makes everyone look warm. So
//! before anything is classified, the samples are white balanced under the gray-world assumption,
//! in linear light. The balanced colors are then converted to CIELAB, where the b\* axis gives the
//! undertone and L\* gives the skin tone.
//!
//! ```
//! use undertone::prelude::*;
//!
//! let res = detect_undertone_with_calibration(
//!     "#e6c9b3",
//!     Some("#5a3d2b"),
//!     None,
//!     DetectionOptions::default(),
//! )
//! .unwrap();
//! println!("{} (b* score {:.2})", res.classification(), res.score);
//! ```
//!
//! Every step is available on its own as well: hex parsing in [`color`], the sRGB transfer function
//! in [`transfer`], the white balance in [`calibration`], CIELAB in [`colors`], and the two
//! classifiers in [`classify`].

#![doc(html_root_url = "https://docs.rs/undertone/0.1.0")]
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare 0.4124564 with 0.412_456_4
#![allow(clippy::unreadable_literal)]

extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate tracing;

pub mod calibration;
pub mod classify;
pub mod color;
pub mod colors;
mod consts;
pub mod detect;
pub mod error;
pub mod illuminants;
pub mod prelude;
pub mod transfer;
