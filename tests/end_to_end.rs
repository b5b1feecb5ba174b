use chrono::{TimeZone, Utc};
use standardized_hand_history::codec::{decode, decode_lenient, encode, DecodeError};
use standardized_hand_history::core::Amount;
use standardized_hand_history::hand_history::{
    ActionKind, ActionObj, BetLimitObj, GameType, HandHistory, HandHistoryBuilder, PlayerObj,
    PlayerWinsObj, PotObj, RoundObj, Street,
};
use standardized_hand_history::validation::{validate, ViolationKind};

fn heads_up_hand() -> HandHistory {
    HandHistoryBuilder::new()
        .site_name("ExampleSite")
        .network_name("ExampleNetwork")
        .game_number("1001")
        .game_type(GameType::Holdem)
        .bet_limit(BetLimitObj::no_limit())
        .start_date_utc(Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 0).unwrap())
        .table_name("Table 1")
        .table_size(2)
        .dealer_seat(1)
        .currency("USD")
        .blinds(Amount::from_cents(50), Amount::from_units(1).unwrap())
        .hero_player_id(0)
        .player(PlayerObj::new(0, 1, "Hero", Amount::from_units(100).unwrap(), None))
        .player(PlayerObj::new(1, 2, "Villain", Amount::from_units(100).unwrap(), None))
        .round(RoundObj::new(
            0,
            Street::Preflop,
            vec![],
            vec![
                ActionObj::new(
                    0,
                    0,
                    ActionKind::PostSmallBlind,
                    Amount::from_cents(50),
                    false,
                ),
                ActionObj::new(1, 1, ActionKind::PostBigBlind, Amount::from_units(1).unwrap(), false),
            ],
        ))
        .pot(PotObj::new(
            0,
            Amount::from_cents(150),
            Amount::ZERO,
            vec![PlayerWinsObj::new(
                1,
                Amount::from_cents(150),
                Amount::ZERO,
            )],
        ))
        .build()
        .unwrap()
}

#[test_log::test]
fn heads_up_hand_encodes_decodes_and_validates() {
    let hand = heads_up_hand();
    let bytes = encode(&hand).unwrap();
    let decoded = decode(&bytes).unwrap();

    assert_eq!(decoded, hand);
    assert_eq!(decoded.spec_version, "1.0.0");
    assert_eq!(decoded.hero().map(|p| p.name.as_str()), Some("Hero"));
    assert!(validate(&decoded).is_empty());
}

/// A document as an older producer writes it: misspelled keys, a naive
/// timestamp, a zero bet cap and a string amount.
const PRODUCER_DOCUMENT: &str = r#"{
    "spec_version": "1.0.0",
    "internal_version": "1.0.5",
    "hero_player_id": 0,
    "size_name": "ExampleSite",
    "network_name": "ExampleNetwork",
    "game_number": "1001",
    "game_type": "Holdem",
    "bet_limit": {"bet_type": "NL", "bet_cap": 0},
    "start_date_utc": "2024-01-15T20:30:00",
    "table_name": "Table 1",
    "table_size": 2,
    "dealer_seat": 1,
    "curency": "USD",
    "small_blind_amount": "0.5",
    "big_blind_amount": 1,
    "ante_amount": 0,
    "players": [
        {"id": 0, "seat": 1, "name": "Hero", "starting_stack": 100},
        {"id": 1, "seat": 2, "name": "Villain", "starting_stack": 100}
    ],
    "rounds": [
        {
            "id": 0,
            "street": "preflop",
            "cards": "",
            "actions": [
                {"action_number": 0, "player_id": 0, "action": "Post SB", "amount": 0.5, "is_allin": false},
                {"action_number": 1, "player_id": 1, "action": "Post BB", "amount": 1, "is_allin": false}
            ]
        }
    ],
    "pots": [
        {"number": 0, "amount": 1.5, "rake": 0, "player_wins": [{"player_id": 1, "win_amount": 1.5}]}
    ]
}"#;

#[test]
fn producer_document_normalises_to_builder_hand() {
    let hand = decode(PRODUCER_DOCUMENT.as_bytes()).unwrap();
    assert_eq!(hand, heads_up_hand());
}

#[test]
fn miscased_street_needs_lenient_mode() {
    let text = PRODUCER_DOCUMENT.replace("\"preflop\"", "\"PREFLOP\"");

    let err = decode(text.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownVariant { .. }));
    assert_eq!(decode_lenient(text.as_bytes()).unwrap(), heads_up_hand());
}

#[test]
fn dangling_winner_is_a_violation_not_a_decode_error() {
    let text = PRODUCER_DOCUMENT.replace(
        r#""player_wins": [{"player_id": 1,"#,
        r#""player_wins": [{"player_id": 99,"#,
    );
    let hand = decode(text.as_bytes()).unwrap();
    let violations = validate(&hand);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::UnknownPlayer(99));
    assert_eq!(
        violations[0].path.to_string(),
        "pots[0].player_wins[0].player_id"
    );
}

#[test]
fn unknown_action_depends_on_mode() {
    let text = PRODUCER_DOCUMENT.replace("\"Post BB\"", "\"Post Bounty\"");

    let err = decode(text.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownVariant { .. }));
    assert_eq!(
        err.path().map(ToString::to_string).as_deref(),
        Some("rounds[0].actions[1].action")
    );

    let hand = decode_lenient(text.as_bytes()).unwrap();
    assert_eq!(
        hand.rounds[0].actions[1].action,
        ActionKind::Unrecognized("Post Bounty".to_string())
    );
    let again = decode_lenient(&encode(&hand).unwrap()).unwrap();
    assert_eq!(again, hand);
}
