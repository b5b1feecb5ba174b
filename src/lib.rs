//! Standardized Hand History is a library for reading, writing and
//! checking poker hand histories in the Standardized Hand History JSON
//! format.
//!
//! A hand moves through three stages:
//!
//! 1. [`hand_history`] holds the data model, built directly or with
//!    [`HandHistoryBuilder`](hand_history::HandHistoryBuilder).
//! 2. [`codec`] encodes a hand to JSON and decodes it back, reporting the
//!    exact field when input is malformed.
//! 3. [`validation`] checks the cross references and pot arithmetic that a
//!    well formed document can still get wrong.
//!
//! ```
//! use standardized_hand_history::codec::{decode, encode};
//! use standardized_hand_history::validation::validate;
//!
//! # fn run(bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let hand = decode(bytes)?;
//! assert!(validate(&hand).is_empty());
//! let again = encode(&hand)?;
//! assert_eq!(decode(&again)?, hand);
//! # Ok(())
//! # }
//! ```

/// Amounts and field paths. Everything in core is independent of the
/// document layout.
pub mod core;
/// The hand history data model.
pub mod hand_history;
/// JSON encoding and decoding.
pub mod codec;
/// Referential and arithmetic checks on decoded hands.
pub mod validation;
