//! Canonical hands for tests, benchmarks and fuzzing.
//!
//! Both samples validate with zero violations under the default
//! [`ValidatorConfig`](crate::validation::ValidatorConfig).

use chrono::{TimeZone, Utc};

use crate::core::Amount;
use crate::validation::validate;

use super::{
    ActionKind, ActionObj, BetLimitObj, GameType, HandHistory, HandHistoryBuilder, PlayerObj,
    PlayerWinsObj, PotObj, RebuyAction, RoundObj, SpeedObj, SpeedType, Street,
    TournamentBountyObj, TournamentFlag, TournamentInfoObj, TournamentRebuyObj, TournamentType,
};

fn amount(value: &str) -> Amount {
    value
        .parse()
        .unwrap_or_else(|e| panic!("bad test amount {value:?}: {e}"))
}

fn cards(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

/// Assert that a hand history passes validation.
///
/// Panics with every violation listed, one per line.
pub fn assert_valid_hand_history(hand_history: &HandHistory) {
    let violations = validate(hand_history);
    assert!(
        violations.is_empty(),
        "Hand {game} has {count} violation(s):\n{list}",
        game = hand_history.game_number,
        count = violations.len(),
        list = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// A heads up cash hand: blinds are posted and the big blind takes the pot.
pub fn sample_cash_hand() -> HandHistory {
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
        .blinds(amount("0.5"), amount("1"))
        .hero_player_id(0)
        .player(PlayerObj::new(0, 1, "Hero", amount("100"), None))
        .player(PlayerObj::new(1, 2, "Villain", amount("100"), None))
        .round(RoundObj::new(
            0,
            Street::Preflop,
            vec![],
            vec![
                ActionObj::new(0, 0, ActionKind::PostSmallBlind, amount("0.5"), false),
                ActionObj::new(1, 1, ActionKind::PostBigBlind, amount("1"), false),
            ],
        ))
        .pot(PotObj::new(
            0,
            amount("1.5"),
            Amount::ZERO,
            vec![PlayerWinsObj::new(1, amount("1.5"), Amount::ZERO)],
        ))
        .build()
        .unwrap()
}

/// A three handed bounty sit and go hand that runs out to showdown.
///
/// Player 1 shoves, player 2 calls and wins the pot plus player 1's bounty.
pub fn sample_tournament_hand() -> HandHistory {
    let preflop = RoundObj::new(
        0,
        Street::Preflop,
        vec![],
        vec![
            ActionObj::new(0, 2, ActionKind::PostSmallBlind, amount("10"), false),
            ActionObj::new(1, 0, ActionKind::PostBigBlind, amount("20"), false),
            ActionObj::new(2, 0, ActionKind::DealtCards, Amount::ZERO, false)
                .with_cards(["4d", "9h"]),
            ActionObj::new(3, 1, ActionKind::Raise, amount("490"), true),
            ActionObj::new(4, 2, ActionKind::Call, amount("480"), false),
            ActionObj::new(5, 0, ActionKind::Fold, Amount::ZERO, false),
        ],
    );
    let showdown = RoundObj::new(
        4,
        Street::Showdown,
        vec![],
        vec![
            ActionObj::new(0, 1, ActionKind::ShowsCards, Amount::ZERO, false)
                .with_cards(["Kc", "Kh"]),
            ActionObj::new(1, 2, ActionKind::ShowsCards, Amount::ZERO, false)
                .with_cards(["As", "Ad"]),
        ],
    );

    let tournament = TournamentInfoObj {
        tournament_number: "2572001822".to_string(),
        name: "Sunday Bounty".to_string(),
        start_date_utc: Utc.with_ymd_and_hms(2019, 3, 28, 8, 0, 0).unwrap(),
        currency: "USD".to_string(),
        buyin_amount: amount("4.5"),
        fee_amount: amount("0.5"),
        bounty_fee_amount: amount("2.5"),
        initial_stack: 500,
        tournament_type: TournamentType::SingleTable,
        flags: vec![TournamentFlag::SitNGo, TournamentFlag::Bounty],
        speed: vec![SpeedObj::new(SpeedType::Turbo, 300)],
    };

    HandHistoryBuilder::new()
        .site_name("PokerStars")
        .network_name("PokerStars")
        .game_number("198636399064")
        .game_type(GameType::Holdem)
        .bet_limit(BetLimitObj::no_limit())
        .start_date_utc(Utc.with_ymd_and_hms(2019, 3, 28, 8, 16, 5).unwrap())
        .table_name("2572001822 1")
        .table_size(3)
        .dealer_seat(2)
        .currency("USD")
        .blinds(amount("10"), amount("20"))
        .hero_player_id(0)
        .player(PlayerObj::new(0, 1, "Hero", amount("500"), Some(amount("2.5"))))
        .player(PlayerObj::new(1, 2, "Player2", amount("490"), Some(amount("2.5"))))
        .player(PlayerObj::new(2, 3, "Player3", amount("510"), Some(amount("2.5"))))
        .round(preflop)
        .round(RoundObj::new(1, Street::Flop, cards(&["2s", "Ac", "Js"]), vec![]))
        .round(RoundObj::new(2, Street::Turn, cards(&["7h"]), vec![]))
        .round(RoundObj::new(3, Street::River, cards(&["Qd"]), vec![]))
        .round(showdown)
        .pot(PotObj::new(
            0,
            amount("1000"),
            Amount::ZERO,
            vec![PlayerWinsObj::new(2, amount("1000"), Amount::ZERO)],
        ))
        .tournament_info(tournament)
        .tournament_rebuy(TournamentRebuyObj::new(
            0,
            RebuyAction::Addon,
            amount("1"),
            500,
        ))
        .tournament_bounty(TournamentBountyObj::new(2, amount("2.5"), 1))
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_valid() {
        assert_valid_hand_history(&sample_cash_hand());
        assert_valid_hand_history(&sample_tournament_hand());
    }

    #[test]
    #[should_panic(expected = "violation")]
    fn dangling_hero_panics() {
        let mut hand = sample_cash_hand();
        hand.hero_player_id = 7;
        assert_valid_hand_history(&hand);
    }
}
