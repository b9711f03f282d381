//! Device-independent color spaces. For convenience, each main type is imported into this module's
//! namespace directly.
pub mod cielabcolor;

pub use self::cielabcolor::{hex_to_lab, CIELABColor};
