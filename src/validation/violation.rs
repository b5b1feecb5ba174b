use std::fmt;

use thiserror::Error;

use crate::core::{Amount, FieldPath};
use crate::hand_history::Street;

/// What is wrong with a value in an otherwise well formed hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    #[error("player id {0} appears more than once")]
    DuplicatePlayerId(u64),
    #[error("player id {0} does not match any player")]
    UnknownPlayer(u64),
    #[error("hero player id {0} does not match any player")]
    UnknownHero(u64),
    #[error("no player sits in dealer seat {0}")]
    DealerSeatVacant(u64),
    #[error("table size {0} is outside 2..=10")]
    TableSizeOutOfRange(u64),
    #[error("hand has no {street} round")]
    MissingStreet { street: Street },
    #[error("round id {id} follows round id {previous}")]
    RoundIdNotIncreasing { previous: u64, id: u64 },
    #[error("round id {id} is repeated")]
    RoundIdRepeated { id: u64 },
    #[error("expected action number {expected}, found {found}")]
    ActionNumberOutOfSequence { expected: u64, found: u64 },
    #[error("expected pot number {expected}, found {found}")]
    PotNumberOutOfSequence { expected: u64, found: u64 },
    #[error("pot amount {amount} differs from wins plus rake {paid} by {difference}")]
    PotMismatch {
        amount: Amount,
        paid: Amount,
        difference: Amount,
    },
    #[error("player {0} is credited with their own bounty")]
    SelfBounty(u64),
    #[error("tournament data present without tournament_info")]
    TournamentDataWithoutTournament,
    #[error("tournament currency {tournament:?} differs from hand currency {hand:?}")]
    CurrencyMismatch { hand: String, tournament: String },
    #[error("currency {0:?} is not a three letter code")]
    InvalidCurrency(String),
    #[error("bet cap set without the CAP flag")]
    BetCapWithoutCapFlag,
    #[error("amount {0} is negative")]
    NegativeAmount(Amount),
    #[error("card {0:?} is not a rank followed by a suit")]
    MalformedCard(String),
}

/// A single problem found by the validator, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: FieldPath, kind: ViolationKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

impl std::error::Error for Violation {}
