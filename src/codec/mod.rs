//! # Encoding and decoding
//!
//! A hand history travels as a single JSON object. [`encode`] writes one;
//! [`Decoder`] reads one back in two stages: a structural pass that names
//! the offending field when something is missing or mistyped, then typed
//! materialisation with serde. The [`DecodeMode`] decides whether unknown
//! enumeration strings are an error or are carried through.
mod decoder;
mod encoder;
mod errors;
mod structure;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
