use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Amount;

use super::serde_utils::{
    empty_string_is_empty, empty_string_is_none, is_none_or_zero, iso8601, one_or_many,
    zero_is_none,
};
use super::{
    ActionKind, BetType, GameType, HandFlag, RebuyAction, SpeedType, Street, TournamentFlag,
    TournamentType,
};

/// Version of the hand history format this crate writes.
pub const SPEC_VERSION: &str = "1.0.0";

/// Producer version written alongside [`SPEC_VERSION`].
///
/// Any change to generated output bumps this, bug fixes included.
pub const INTERNAL_VERSION: &str = "1.0.5";

/// The betting limitations of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLimitObj {
    pub bet_type: BetType,

    /// Cap on the amount a player can wager per hand.
    ///
    /// Only meaningful for hands flagged [`HandFlag::Cap`]. Absent, `null`
    /// and `0` on the wire all decode to `None`.
    #[serde(
        default,
        deserialize_with = "zero_is_none",
        skip_serializing_if = "is_none_or_zero"
    )]
    pub bet_cap: Option<Amount>,
}

impl BetLimitObj {
    pub fn new(bet_type: BetType, bet_cap: Option<Amount>) -> Self {
        Self {
            bet_type,
            bet_cap: Amount::non_zero(bet_cap),
        }
    }

    pub fn no_limit() -> Self {
        Self::new(BetType::NoLimit, None)
    }
}

/// One of the players dealt into the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerObj {
    /// Identifier of the player within this hand only.
    ///
    /// Every other entity refers to the player by this id. It does not need
    /// to match across hand histories.
    pub id: u64,
    pub seat: u64,
    /// Name as displayed at the table
    pub name: String,
    pub starting_stack: Amount,
    /// Bounty paid to whoever eliminates this player (bounty tournaments only)
    #[serde(
        default,
        deserialize_with = "zero_is_none",
        skip_serializing_if = "is_none_or_zero"
    )]
    pub player_bounty: Option<Amount>,
}

impl PlayerObj {
    pub fn new(
        id: u64,
        seat: u64,
        name: impl Into<String>,
        starting_stack: Amount,
        player_bounty: Option<Amount>,
    ) -> Self {
        Self {
            id,
            seat,
            name: name.into(),
            starting_stack,
            player_bounty: Amount::non_zero(player_bounty),
        }
    }
}

/// A single action taken by a player within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionObj {
    /// Position of the action within its round, starting at 0.
    pub action_number: u64,
    pub player_id: u64,
    pub action: ActionKind,
    /// Total put in during this action, not the increment over a previous
    /// bet. Facing a 50 bet and raising 100 more is an amount of 150.
    pub amount: Amount,
    pub is_allin: bool,
    /// Cards involved in the action. Omitted when none are.
    #[serde(
        default,
        deserialize_with = "empty_string_is_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cards: Option<Vec<String>>,
}

impl ActionObj {
    pub fn new(
        action_number: u64,
        player_id: u64,
        action: ActionKind,
        amount: Amount,
        is_allin: bool,
    ) -> Self {
        Self {
            action_number,
            player_id,
            action,
            amount,
            is_allin,
            cards: None,
        }
    }

    pub fn with_cards<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cards = Some(cards.into_iter().map(Into::into).collect());
        self
    }
}

/// A betting round of the hand.
///
/// Streets may repeat: a run-it-twice hand has two `flop` rounds. The `id`
/// gives the order the rounds happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundObj {
    pub id: u64,
    pub street: Street,
    /// Board cards added during this round; empty when none were.
    #[serde(default, deserialize_with = "empty_string_is_empty")]
    pub cards: Vec<String>,
    /// Actions in the order they happened.
    pub actions: Vec<ActionObj>,
}

impl RoundObj {
    pub fn new(id: u64, street: Street, cards: Vec<String>, actions: Vec<ActionObj>) -> Self {
        Self {
            id,
            street,
            cards,
            actions,
        }
    }
}

/// One player's share of a pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWinsObj {
    pub player_id: u64,
    pub win_amount: Amount,
    /// The player's contribution to the rake taken from the pot
    #[serde(default)]
    pub contributed_rake: Amount,
}

impl PlayerWinsObj {
    pub fn new(player_id: u64, win_amount: Amount, contributed_rake: Amount) -> Self {
        Self {
            player_id,
            win_amount,
            contributed_rake,
        }
    }
}

/// The main pot or a side pot, and who won it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotObj {
    /// 0 for the main pot, then 1, 2, .. for side pots in creation order.
    pub number: u64,
    /// Total in the pot, rake included.
    pub amount: Amount,
    #[serde(default)]
    pub rake: Amount,
    pub player_wins: Vec<PlayerWinsObj>,
}

impl PotObj {
    pub fn new(number: u64, amount: Amount, rake: Amount, player_wins: Vec<PlayerWinsObj>) -> Self {
        Self {
            number,
            amount,
            rake,
            player_wins,
        }
    }

    /// Sum of the winnings paid out of this pot.
    pub fn total_won(&self) -> Amount {
        self.player_wins.iter().map(|w| w.win_amount).sum()
    }
}

/// Blind level speed of a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedObj {
    #[serde(rename = "type")]
    pub speed_type: SpeedType,

    /// Seconds between blind increases. Blinds going up every 10 minutes
    /// is a round time of 600.
    pub round_time: u64,
}

impl SpeedObj {
    pub fn new(speed_type: SpeedType, round_time: u64) -> Self {
        Self {
            speed_type,
            round_time,
        }
    }
}

/// Tournament level properties. Omitted for cash games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentInfoObj {
    /// Tournament number as assigned by the site
    pub tournament_number: String,
    pub name: String,
    #[serde(with = "iso8601")]
    pub start_date_utc: DateTime<Utc>,
    /// Currency of the buy-in and fee
    pub currency: String,
    pub buyin_amount: Amount,
    pub fee_amount: Amount,
    pub bounty_fee_amount: Amount,
    /// Chips each entrant starts with
    pub initial_stack: u64,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    #[serde(default, deserialize_with = "empty_string_is_empty")]
    pub flags: Vec<TournamentFlag>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub speed: Vec<SpeedObj>,
}

/// A rebuy, add-on or re-entry made during the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRebuyObj {
    pub player_id: u64,
    pub rebuy_action: RebuyAction,
    /// Total paid for the rebuy, in the tournament currency
    pub amount: Amount,
    /// Chips received
    pub chips: u64,
}

impl TournamentRebuyObj {
    pub fn new(player_id: u64, rebuy_action: RebuyAction, amount: Amount, chips: u64) -> Self {
        Self {
            player_id,
            rebuy_action,
            amount,
            chips,
        }
    }
}

/// A bounty collected by `player_id` for eliminating `defeated_player_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentBountyObj {
    pub player_id: u64,
    pub bounty_won: Amount,
    pub defeated_player_id: u64,
}

impl TournamentBountyObj {
    pub fn new(player_id: u64, bounty_won: Amount, defeated_player_id: u64) -> Self {
        Self {
            player_id,
            bounty_won,
            defeated_player_id,
        }
    }
}

/// A single played hand.
///
/// Entities reference players by [`PlayerObj::id`], never by pointer, so the
/// whole record is a tree and serializes to plain JSON. Use
/// [`HandHistoryBuilder`](super::HandHistoryBuilder) to construct one and
/// [`validate`](crate::validation::validate) to check the cross references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandHistory {
    pub spec_version: String,
    pub internal_version: String,
    /// The player the hand history is recorded for
    pub hero_player_id: u64,
    #[serde(alias = "size_name")]
    pub site_name: String,
    pub network_name: String,
    /// Identifies the hand uniquely on the network
    pub game_number: String,
    pub game_type: GameType,
    pub bet_limit: BetLimitObj,
    #[serde(with = "iso8601")]
    pub start_date_utc: DateTime<Utc>,
    pub table_name: String,
    /// Seats available at the table
    pub table_size: u64,
    /// Seat of the button
    pub dealer_seat: u64,
    #[serde(alias = "curency")]
    pub currency: String,
    pub small_blind_amount: Amount,
    pub big_blind_amount: Amount,
    #[serde(
        default,
        deserialize_with = "zero_is_none",
        skip_serializing_if = "is_none_or_zero"
    )]
    pub ante_amount: Option<Amount>,
    #[serde(
        default,
        deserialize_with = "empty_string_is_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub flags: Vec<HandFlag>,
    pub players: Vec<PlayerObj>,
    pub rounds: Vec<RoundObj>,
    pub pots: Vec<PotObj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_info: Option<TournamentInfoObj>,
    #[serde(
        default,
        deserialize_with = "empty_string_is_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tournament_rebuys: Vec<TournamentRebuyObj>,
    #[serde(
        default,
        deserialize_with = "empty_string_is_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tournament_bounties: Vec<TournamentBountyObj>,
}

impl HandHistory {
    pub fn player(&self, id: u64) -> Option<&PlayerObj> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_at_seat(&self, seat: u64) -> Option<&PlayerObj> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn hero(&self) -> Option<&PlayerObj> {
        self.player(self.hero_player_id)
    }

    /// Map from player id to player. Later duplicates shadow earlier ones.
    pub fn players_by_id(&self) -> HashMap<u64, &PlayerObj> {
        self.players.iter().map(|p| (p.id, p)).collect()
    }

    pub fn has_flag(&self, flag: &HandFlag) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_tournament(&self) -> bool {
        self.tournament_info.is_some()
    }

    /// All rounds for the given street, in order.
    pub fn rounds_on(&self, street: &Street) -> impl Iterator<Item = &RoundObj> {
        let street = street.clone();
        self.rounds.iter().filter(move |r| r.street == street)
    }

    /// Every action of the hand in round order.
    pub fn actions(&self) -> impl Iterator<Item = &ActionObj> {
        self.rounds.iter().flat_map(|r| r.actions.iter())
    }

    /// Board cards in the order they were dealt, across all rounds.
    pub fn board(&self) -> Vec<&str> {
        self.rounds
            .iter()
            .flat_map(|r| r.cards.iter().map(String::as_str))
            .collect()
    }
}
