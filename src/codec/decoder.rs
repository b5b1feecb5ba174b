use std::io::Read;

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::core::FieldPath;
use crate::hand_history::{HandHistory, WireEnum};

use super::structure::{check_hand_history, drop_shadowed_aliases};
use super::{DecodeError, StructureProblem};

/// How enumeration strings are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DecodeMode {
    /// Only the canonical spellings are accepted. Anything else, including a
    /// known value in different case, fails decoding.
    #[default]
    Strict,
    /// Known values match ignoring ASCII case; unknown values are kept as
    /// `Unrecognized` variants.
    Lenient,
}

/// Configuration for the [`Decoder`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
}

/// An enumeration value outside the known set, and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedValue {
    pub path: FieldPath,
    pub kind: &'static str,
    pub value: String,
}

/// Turns wire bytes into a [`HandHistory`].
///
/// Decoding checks shape only. Dangling player ids, out of order rounds and
/// unbalanced pots all decode fine so that questionable real world input can
/// still be inspected; run the [validator](crate::validation) for those.
///
/// ```
/// use standardized_hand_history::codec::{DecodeError, Decoder};
///
/// let err = Decoder::strict().decode_str("{}").unwrap_err();
/// assert!(matches!(err, DecodeError::Structure { .. }));
/// assert_eq!(err.path().unwrap().to_string(), "spec_version");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn strict() -> Self {
        Self::new(DecodeOptions {
            mode: DecodeMode::Strict,
        })
    }

    pub fn lenient() -> Self {
        Self::new(DecodeOptions {
            mode: DecodeMode::Lenient,
        })
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    #[instrument(level = "trace", skip_all, fields(mode = ?self.options.mode, len = bytes.len()))]
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<HandHistory, DecodeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::from_json)?;
        self.decode_value(value)
    }

    pub fn decode_str(&self, text: &str) -> Result<HandHistory, DecodeError> {
        self.decode_slice(text.as_bytes())
    }

    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<HandHistory, DecodeError> {
        let value: Value = serde_json::from_reader(reader).map_err(DecodeError::from_json)?;
        self.decode_value(value)
    }

    /// Decode an already parsed JSON tree.
    pub fn decode_value(&self, mut value: Value) -> Result<HandHistory, DecodeError> {
        check_hand_history(&value, self.options.mode)?;
        drop_shadowed_aliases(&mut value);
        trace!("Structural pass complete");

        let hand: HandHistory =
            serde_json::from_value(value).map_err(|e| DecodeError::Structure {
                path: FieldPath::root(),
                problem: StructureProblem::Rejected(e.to_string()),
            })?;

        debug!(
            game_number = %hand.game_number,
            players = hand.players.len(),
            rounds = hand.rounds.len(),
            "Decoded hand history"
        );
        Ok(hand)
    }
}

/// Decode in [`DecodeMode::Strict`].
pub fn decode(bytes: &[u8]) -> Result<HandHistory, DecodeError> {
    Decoder::strict().decode_slice(bytes)
}

/// Decode in [`DecodeMode::Lenient`].
pub fn decode_lenient(bytes: &[u8]) -> Result<HandHistory, DecodeError> {
    Decoder::lenient().decode_slice(bytes)
}

/// Every unrecognized enumeration value in the hand, in document order.
pub fn unrecognized_values(hand: &HandHistory) -> Vec<UnrecognizedValue> {
    let mut found = Vec::new();
    let root = FieldPath::root();

    note(&mut found, &hand.game_type, || root.field("game_type"));
    note(&mut found, &hand.bet_limit.bet_type, || {
        root.field("bet_limit").field("bet_type")
    });
    for (idx, flag) in hand.flags.iter().enumerate() {
        note(&mut found, flag, || root.field("flags").index(idx));
    }
    for (r_idx, round) in hand.rounds.iter().enumerate() {
        let round_path = root.field("rounds").index(r_idx);
        note(&mut found, &round.street, || round_path.field("street"));
        for (a_idx, action) in round.actions.iter().enumerate() {
            note(&mut found, &action.action, || {
                round_path.field("actions").index(a_idx).field("action")
            });
        }
    }
    if let Some(info) = &hand.tournament_info {
        let info_path = root.field("tournament_info");
        note(&mut found, &info.tournament_type, || info_path.field("type"));
        for (idx, flag) in info.flags.iter().enumerate() {
            note(&mut found, flag, || info_path.field("flags").index(idx));
        }
        for (idx, speed) in info.speed.iter().enumerate() {
            note(&mut found, &speed.speed_type, || {
                info_path.field("speed").index(idx).field("type")
            });
        }
    }
    for (idx, rebuy) in hand.tournament_rebuys.iter().enumerate() {
        note(&mut found, &rebuy.rebuy_action, || {
            root.field("tournament_rebuys").index(idx).field("rebuy_action")
        });
    }
    found
}

fn note<E, F>(found: &mut Vec<UnrecognizedValue>, value: &E, path: F)
where
    E: WireEnum,
    F: FnOnce() -> FieldPath,
{
    if let Some(raw) = value.unrecognized() {
        found.push(UnrecognizedValue {
            path: path(),
            kind: E::KIND,
            value: raw.to_string(),
        });
    }
}
