//! The errors that can come out of undertone detection. There are only two ways for a call to fail,
//! and both are caught while validating input, before any color math is done: a hex code that
//! doesn't parse, or a required color that was never given.

use std::error::Error;
use std::fmt;

/// An error in detecting an undertone or in any of the conversions leading up to it.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum UndertoneError {
    /// A hex code was malformed: after trimming whitespace and an optional leading `#`, it was not
    /// exactly 3 or 6 hexadecimal digits. Carries the input as given.
    InvalidFormat(String),
    /// A required input was missing. Carries the name of what was missing: `"skin"` when no skin
    /// color was given, `"samples"` when gains were requested for an empty list of colors.
    MissingRequiredInput(&'static str),
}

impl fmt::Display for UndertoneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UndertoneError::InvalidFormat(ref hex) => {
                write!(f, "invalid hex color {:?}: expected 3 or 6 hex digits", hex)
            }
            UndertoneError::MissingRequiredInput(what) => write!(f, "missing required input: {}", what),
        }
    }
}

impl Error for UndertoneError {}
