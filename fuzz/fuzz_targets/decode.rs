#![no_main]

extern crate libfuzzer_sys;
extern crate standardized_hand_history;

use libfuzzer_sys::fuzz_target;
use standardized_hand_history::codec::{decode_lenient, encode, unrecognized_values, Decoder};
use standardized_hand_history::validation::validate;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input may fail to decode but must never panic.
    let Ok(hand) = decode_lenient(data) else {
        return;
    };

    // Whatever decodes must encode and decode again.
    let bytes = encode(&hand).expect("decoded hands always encode");
    let again = decode_lenient(&bytes).expect("encoded hands always decode");
    assert_eq!(hand.players.len(), again.players.len());
    assert_eq!(hand.rounds.len(), again.rounds.len());

    // Strict decoding fails exactly when something was unrecognized.
    let strict = Decoder::strict().decode_slice(&bytes);
    assert_eq!(strict.is_ok(), unrecognized_values(&hand).is_empty());

    let _ = validate(&hand);
});
