use std::io::Write;

use tracing::{instrument, trace};

use crate::hand_history::HandHistory;

use super::EncodeError;

/// Encode a hand as compact JSON.
///
/// Field names and nesting follow the published format. Optional amounts
/// that are not applicable are omitted, as are empty flag, rebuy and bounty
/// lists and a missing `tournament_info`.
pub fn encode(hand: &HandHistory) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(hand)?)
}

pub fn encode_pretty(hand: &HandHistory) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec_pretty(hand)?)
}

pub fn encode_to_string(hand: &HandHistory) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(hand)?)
}

/// Encode a hand straight into `writer` and flush it.
#[instrument(level = "trace", skip_all, fields(game_number = %hand.game_number))]
pub fn encode_to_writer<W: Write>(hand: &HandHistory, mut writer: W) -> Result<(), EncodeError> {
    serde_json::to_writer(&mut writer, hand)?;
    writer.flush()?;
    trace!("Encoded hand history");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use approx::assert_relative_eq;
    use serde_json::Value;

    use super::*;
    use crate::codec::decode;
    use crate::core::Amount;
    use crate::hand_history::{sample_cash_hand, sample_tournament_hand};

    #[test]
    fn test_round_trip() {
        for hand in [sample_cash_hand(), sample_tournament_hand()] {
            let bytes = encode(&hand).unwrap();
            assert_eq!(decode(&bytes).unwrap(), hand);

            let pretty = encode_pretty(&hand).unwrap();
            assert_eq!(decode(&pretty).unwrap(), hand);
        }
    }

    #[test]
    fn test_round_trip_keeps_every_micro_unit() {
        let mut hand = sample_tournament_hand();
        hand.players[0].starting_stack = Amount::MAX;
        hand.players[1].starting_stack = Amount::from_micros(123_456_789_123_457).unwrap();
        hand.players[2].starting_stack = Amount::MIN;
        let back = decode(&encode(&hand).unwrap()).unwrap();
        assert_eq!(back, hand);
    }

    #[test]
    fn test_wire_names() {
        let json: Value = serde_json::from_slice(&encode(&sample_tournament_hand()).unwrap()).unwrap();

        assert_eq!(json["spec_version"], "1.0.0");
        assert_eq!(json["internal_version"], "1.0.5");
        assert_eq!(json["site_name"], "PokerStars");
        assert_eq!(json["currency"], "USD");
        assert!(json.get("size_name").is_none());
        assert!(json.get("curency").is_none());
        assert_eq!(json["start_date_utc"], "2019-03-28T08:16:05Z");
        assert_eq!(json["bet_limit"]["bet_type"], "NL");
        assert_eq!(json["rounds"][0]["street"], "preflop");
        assert_eq!(json["rounds"][0]["actions"][0]["action"], "Post SB");
        assert_eq!(json["rounds"][1]["cards"][0], "2s");
        assert_eq!(json["tournament_info"]["type"], "STT");
        assert_eq!(json["tournament_info"]["speed"][0]["type"], "TURBO");
        assert_eq!(json["tournament_info"]["flags"][1], "BOUNTY");
        assert_eq!(json["tournament_rebuys"][0]["rebuy_action"], "ADDON");
        assert_eq!(json["tournament_bounties"][0]["defeated_player_id"], 1);
        assert_relative_eq!(json["players"][0]["player_bounty"].as_f64().unwrap(), 2.5);
        assert_relative_eq!(json["tournament_info"]["buyin_amount"].as_f64().unwrap(), 4.5);
    }

    #[test]
    fn test_cash_hand_omits_tournament_fields() {
        let json: Value = serde_json::from_slice(&encode(&sample_cash_hand()).unwrap()).unwrap();
        for absent in [
            "ante_amount",
            "flags",
            "tournament_info",
            "tournament_rebuys",
            "tournament_bounties",
        ] {
            assert!(json.get(absent).is_none(), "{absent} should be omitted");
        }
        assert!(json["bet_limit"].get("bet_cap").is_none());
        assert_eq!(json["rounds"][0]["cards"], Value::Array(vec![]));
        assert_relative_eq!(json["small_blind_amount"].as_f64().unwrap(), 0.5);
    }

    #[test]
    fn test_writer_receives_same_bytes() {
        let hand = sample_cash_hand();
        let mut buffer = Vec::new();
        encode_to_writer(&hand, &mut buffer).unwrap();
        assert_eq!(buffer, encode(&hand).unwrap());
        assert_eq!(encode_to_string(&hand).unwrap().as_bytes(), buffer.as_slice());
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_io_error() {
        let err = encode_to_writer(&sample_cash_hand(), FailingSink).unwrap_err();
        assert!(matches!(err, EncodeError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
