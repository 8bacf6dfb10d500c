//! Stealth-character scanning engine for Unveil.
//!
//! The pipeline is leaf-first:
//!
//! ```text
//! tables -> classify -> decode (tag / sneaky bits / bidi / VS / regional)
//!                          \-> process::scan -> Segment list + cleaned text + stats
//! ```
//!
//! [`scan`] is the main entry point. The classifier, the five run decoders
//! and the cleaner are public as well so callers can build alternative
//! pipelines on top of them.

mod classify;
mod clean;
mod decode;
mod process;
pub mod report;
mod stats;
mod tables;

pub use classify::{classify, classify_char, is_stealth_char};
pub use clean::{clean, strip_stealth};
pub use decode::{
    Decoder, decode_bidi, decode_regional, decode_sneaky_bits, decode_tags,
    decode_variation_selectors, decoder_for,
};
pub use process::scan;
pub use stats::{density, shannon_entropy};
