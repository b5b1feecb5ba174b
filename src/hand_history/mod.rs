//! # Standardized Hand History schema
//!
//! Rust types for every object of the Standardized Hand History format,
//! a JSON format describing one played poker hand per document.
//!
//! ## Features
//!
//! - **Data Model**: One struct per JSON object, public fields, wire names as
//!   serde field names
//! - **Open enumerations**: Known variants plus an `Unrecognized` fallback
//!   that round-trips unknown strings
//! - **Builder**: [`HandHistoryBuilder`] fills in the version constants
//! - **File Writing**: Append hands to a file in JSON Lines format and read
//!   them back with [`HandHistoryReader`]
//!
//! ## Wire compatibility
//!
//! The format's published field names are written. On read, `size_name` is
//! accepted for `site_name` and `curency` for `currency`, the spellings some
//! existing producers emit.
mod builder;
mod schema;
mod serde_utils;
mod wire_enum;
mod writer;

#[cfg(any(test, feature = "test-util"))]
mod test_util;

pub use builder::*;
pub use schema::*;
pub use wire_enum::*;
pub use writer::*;

#[cfg(any(test, feature = "test-util"))]
pub use test_util::*;

pub(crate) use serde_utils::parse_timestamp;
