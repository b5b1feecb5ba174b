//! # Validation
//!
//! Decoding only proves a document has the right shape. The [`Validator`]
//! checks what the shape cannot express: ids that must resolve to a
//! player, rounds and actions in order, pots that add up, and tournament
//! data that agrees with the rest of the hand.
//!
//! ```
//! use standardized_hand_history::codec::decode_lenient;
//! use standardized_hand_history::validation::validate;
//!
//! # fn check(bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let hand = decode_lenient(bytes)?;
//! for violation in validate(&hand) {
//!     println!("{violation}");
//! }
//! # Ok(())
//! # }
//! ```
mod config;
mod validator;
mod violation;

pub use config::*;
pub use validator::*;
pub use violation::*;
