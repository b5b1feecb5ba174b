use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, trace};

use crate::core::{Amount, FieldPath};
use crate::hand_history::{
    HandFlag, HandHistory, PlayerObj, PotObj, RoundObj, Street, TournamentInfoObj,
};

use super::{ValidatorConfig, Violation, ViolationKind};

const TABLE_SIZES: std::ops::RangeInclusive<u64> = 2..=10;
const RANKS: &str = "23456789TJQKA";
const SUITS: &str = "cdhs";

/// Checks the cross references and arithmetic a decoder does not.
///
/// Every violation is collected; validation never stops at the first one.
/// The result is ordered the way the offending values appear in the
/// document, with whole-hand findings such as a missing street reported at
/// the list they concern.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    #[instrument(level = "trace", skip_all, fields(game_number = %hand.game_number))]
    pub fn validate(&self, hand: &HandHistory) -> Vec<Violation> {
        let mut pass = Pass::new(&self.config, hand);
        pass.run();
        debug!(
            game_number = %hand.game_number,
            violations = pass.violations.len(),
            "Validated hand history"
        );
        pass.violations
    }
}

/// Validate with [`ValidatorConfig::default`].
pub fn validate(hand: &HandHistory) -> Vec<Violation> {
    Validator::default().validate(hand)
}

/// State for a single validation run.
struct Pass<'a> {
    config: &'a ValidatorConfig,
    hand: &'a HandHistory,
    players: HashMap<u64, &'a PlayerObj>,
    root: FieldPath,
    violations: Vec<Violation>,
}

impl<'a> Pass<'a> {
    fn new(config: &'a ValidatorConfig, hand: &'a HandHistory) -> Self {
        let mut players = HashMap::with_capacity(hand.players.len());
        for player in &hand.players {
            players.entry(player.id).or_insert(player);
        }
        Self {
            config,
            hand,
            players,
            root: FieldPath::root(),
            violations: Vec::new(),
        }
    }

    fn report(&mut self, path: FieldPath, kind: ViolationKind) {
        trace!(%path, %kind, "Violation");
        self.violations.push(Violation::new(path, kind));
    }

    fn run(&mut self) {
        let hand = self.hand;

        if !self.players.contains_key(&hand.hero_player_id) {
            self.report(
                self.root.field("hero_player_id"),
                ViolationKind::UnknownHero(hand.hero_player_id),
            );
        }

        self.check_bet_limit();

        if !TABLE_SIZES.contains(&hand.table_size) {
            self.report(
                self.root.field("table_size"),
                ViolationKind::TableSizeOutOfRange(hand.table_size),
            );
        }
        if hand.player_at_seat(hand.dealer_seat).is_none() {
            self.report(
                self.root.field("dealer_seat"),
                ViolationKind::DealerSeatVacant(hand.dealer_seat),
            );
        }
        self.check_currency(self.root.field("currency"), &hand.currency);
        self.check_amount(self.root.field("small_blind_amount"), hand.small_blind_amount);
        self.check_amount(self.root.field("big_blind_amount"), hand.big_blind_amount);
        if let Some(ante) = hand.ante_amount {
            self.check_amount(self.root.field("ante_amount"), ante);
        }

        self.check_players();
        self.check_rounds();
        self.check_pots();
        self.check_tournament();
    }

    fn check_bet_limit(&mut self) {
        let path = self.root.field("bet_limit").field("bet_cap");
        if let Some(cap) = self.hand.bet_limit.bet_cap {
            if !self.hand.has_flag(&HandFlag::Cap) {
                self.report(path.clone(), ViolationKind::BetCapWithoutCapFlag);
            }
            self.check_amount(path, cap);
        }
    }

    fn check_players(&mut self) {
        let hand = self.hand;
        let mut seen = HashSet::with_capacity(hand.players.len());
        for (idx, player) in hand.players.iter().enumerate() {
            let path = self.root.field("players").index(idx);
            if !seen.insert(player.id) {
                self.report(path.field("id"), ViolationKind::DuplicatePlayerId(player.id));
            }
            self.check_amount(path.field("starting_stack"), player.starting_stack);
            if let Some(bounty) = player.player_bounty {
                self.check_amount(path.field("player_bounty"), bounty);
            }
        }
    }

    fn check_rounds(&mut self) {
        let hand = self.hand;
        let rounds_path = self.root.field("rounds");
        let run_it_twice = hand.has_flag(&HandFlag::RunItTwice);

        let mut previous: Option<&RoundObj> = None;
        for (idx, round) in hand.rounds.iter().enumerate() {
            let path = rounds_path.index(idx);
            if let Some(prev) = previous {
                if round.id < prev.id {
                    self.report(
                        path.field("id"),
                        ViolationKind::RoundIdNotIncreasing {
                            previous: prev.id,
                            id: round.id,
                        },
                    );
                } else if round.id == prev.id && !(run_it_twice && round.street == prev.street) {
                    self.report(path.field("id"), ViolationKind::RoundIdRepeated { id: round.id });
                }
            }
            previous = Some(round);

            for (c_idx, card) in round.cards.iter().enumerate() {
                self.check_card(path.field("cards").index(c_idx), card);
            }
            self.check_actions(&path, round);
        }

        self.require_street(&rounds_path, Street::Preflop);
        if self.config.require_showdown {
            self.require_street(&rounds_path, Street::Showdown);
        }
    }

    fn require_street(&mut self, path: &FieldPath, street: Street) {
        if self.hand.rounds_on(&street).next().is_none() {
            self.report(path.clone(), ViolationKind::MissingStreet { street });
        }
    }

    fn check_actions(&mut self, round_path: &FieldPath, round: &RoundObj) {
        for (idx, (expected, action)) in (0u64..).zip(&round.actions).enumerate() {
            let path = round_path.field("actions").index(idx);
            if action.action_number != expected {
                self.report(
                    path.field("action_number"),
                    ViolationKind::ActionNumberOutOfSequence {
                        expected,
                        found: action.action_number,
                    },
                );
            }
            self.check_player(path.field("player_id"), action.player_id);
            self.check_amount(path.field("amount"), action.amount);
            for (c_idx, card) in action.cards.iter().flatten().enumerate() {
                self.check_card(path.field("cards").index(c_idx), card);
            }
        }
    }

    fn check_pots(&mut self) {
        let hand = self.hand;
        for (idx, (expected, pot)) in (0u64..).zip(&hand.pots).enumerate() {
            let path = self.root.field("pots").index(idx);
            if pot.number != expected {
                self.report(
                    path.field("number"),
                    ViolationKind::PotNumberOutOfSequence {
                        expected,
                        found: pot.number,
                    },
                );
            }
            self.check_amount(path.field("amount"), pot.amount);
            self.check_amount(path.field("rake"), pot.rake);
            self.check_pot_total(&path, pot);

            for (w_idx, win) in pot.player_wins.iter().enumerate() {
                let win_path = path.field("player_wins").index(w_idx);
                self.check_player(win_path.field("player_id"), win.player_id);
                self.check_amount(win_path.field("win_amount"), win.win_amount);
                self.check_amount(win_path.field("contributed_rake"), win.contributed_rake);
            }
        }
    }

    fn check_pot_total(&mut self, path: &FieldPath, pot: &PotObj) {
        let paid = pot.total_won() + pot.rake;
        let difference = pot.amount.abs_diff(paid);
        if difference > self.config.pot_epsilon {
            self.report(
                path.field("amount"),
                ViolationKind::PotMismatch {
                    amount: pot.amount,
                    paid,
                    difference,
                },
            );
        }
    }

    fn check_tournament(&mut self) {
        let hand = self.hand;
        match &hand.tournament_info {
            Some(info) => self.check_tournament_info(info),
            None => {
                if !hand.tournament_rebuys.is_empty() {
                    self.report(
                        self.root.field("tournament_rebuys"),
                        ViolationKind::TournamentDataWithoutTournament,
                    );
                }
                if !hand.tournament_bounties.is_empty() {
                    self.report(
                        self.root.field("tournament_bounties"),
                        ViolationKind::TournamentDataWithoutTournament,
                    );
                }
            }
        }

        for (idx, rebuy) in hand.tournament_rebuys.iter().enumerate() {
            let path = self.root.field("tournament_rebuys").index(idx);
            self.check_player(path.field("player_id"), rebuy.player_id);
            self.check_amount(path.field("amount"), rebuy.amount);
        }

        for (idx, bounty) in hand.tournament_bounties.iter().enumerate() {
            let path = self.root.field("tournament_bounties").index(idx);
            self.check_player(path.field("player_id"), bounty.player_id);
            self.check_amount(path.field("bounty_won"), bounty.bounty_won);
            if bounty.defeated_player_id == bounty.player_id {
                self.report(
                    path.field("defeated_player_id"),
                    ViolationKind::SelfBounty(bounty.player_id),
                );
            } else {
                self.check_player(path.field("defeated_player_id"), bounty.defeated_player_id);
            }
        }
    }

    fn check_tournament_info(&mut self, info: &TournamentInfoObj) {
        let path = self.root.field("tournament_info");
        if info.currency != self.hand.currency {
            self.report(
                path.field("currency"),
                ViolationKind::CurrencyMismatch {
                    hand: self.hand.currency.clone(),
                    tournament: info.currency.clone(),
                },
            );
        }
        self.check_amount(path.field("buyin_amount"), info.buyin_amount);
        self.check_amount(path.field("fee_amount"), info.fee_amount);
        self.check_amount(path.field("bounty_fee_amount"), info.bounty_fee_amount);
    }

    fn check_player(&mut self, path: FieldPath, id: u64) {
        if !self.players.contains_key(&id) {
            self.report(path, ViolationKind::UnknownPlayer(id));
        }
    }

    fn check_amount(&mut self, path: FieldPath, amount: Amount) {
        if amount.is_negative() {
            self.report(path, ViolationKind::NegativeAmount(amount));
        }
    }

    fn check_currency(&mut self, path: FieldPath, currency: &str) {
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_alphabetic()) {
            self.report(path, ViolationKind::InvalidCurrency(currency.to_string()));
        }
    }

    fn check_card(&mut self, path: FieldPath, card: &str) {
        if !is_card_code(card) {
            self.report(path, ViolationKind::MalformedCard(card.to_string()));
        }
    }
}

/// A rank character followed by a suit character, e.g. `Td` or `2c`.
fn is_card_code(code: &str) -> bool {
    let mut chars = code.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(rank), Some(suit), None) => RANKS.contains(rank) && SUITS.contains(suit),
        _ => false,
    }
}
