//! Text codecs behind the share fragment.

pub mod hex;
pub mod points;
