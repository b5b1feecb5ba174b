use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::Amount;

use super::{
    BetLimitObj, GameType, HandFlag, HandHistory, PlayerObj, PotObj, RoundObj, TournamentBountyObj,
    TournamentInfoObj, TournamentRebuyObj, INTERNAL_VERSION, SPEC_VERSION,
};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BuildError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// # HandHistoryBuilder
///
/// Assembles a [`HandHistory`] in one go. The version fields are filled in
/// with [`SPEC_VERSION`] and [`INTERNAL_VERSION`], zero ante / bet cap /
/// player bounties collapse to `None`, and every required scalar must have
/// been set or `build` fails with [`BuildError::MissingField`].
///
/// Collections default to empty; a hand with no rounds will build but will
/// not validate.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use standardized_hand_history::core::Amount;
/// use standardized_hand_history::hand_history::{
///     BetLimitObj, GameType, HandHistoryBuilder, PlayerObj,
/// };
///
/// let hand = HandHistoryBuilder::new()
///     .site_name("ExampleSite")
///     .network_name("ExampleNetwork")
///     .game_number("1")
///     .game_type(GameType::Holdem)
///     .bet_limit(BetLimitObj::no_limit())
///     .start_date_utc(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
///     .table_name("Table 1")
///     .table_size(6)
///     .dealer_seat(1)
///     .currency("USD")
///     .blinds(Amount::from_cents(50), Amount::from_units(1).unwrap())
///     .hero_player_id(0)
///     .player(PlayerObj::new(0, 1, "Hero", Amount::from_units(100).unwrap(), None))
///     .build()
///     .unwrap();
///
/// assert_eq!(hand.spec_version, "1.0.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandHistoryBuilder {
    hero_player_id: Option<u64>,
    site_name: Option<String>,
    network_name: Option<String>,
    game_number: Option<String>,
    game_type: Option<GameType>,
    bet_limit: Option<BetLimitObj>,
    start_date_utc: Option<DateTime<Utc>>,
    table_name: Option<String>,
    table_size: Option<u64>,
    dealer_seat: Option<u64>,
    currency: Option<String>,
    small_blind_amount: Option<Amount>,
    big_blind_amount: Option<Amount>,
    ante_amount: Option<Amount>,
    flags: Vec<HandFlag>,
    players: Vec<PlayerObj>,
    rounds: Vec<RoundObj>,
    pots: Vec<PotObj>,
    tournament_info: Option<TournamentInfoObj>,
    tournament_rebuys: Vec<TournamentRebuyObj>,
    tournament_bounties: Vec<TournamentBountyObj>,
}

impl HandHistoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hero_player_id(mut self, id: u64) -> Self {
        self.hero_player_id = Some(id);
        self
    }

    pub fn site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = Some(name.into());
        self
    }

    pub fn network_name(mut self, name: impl Into<String>) -> Self {
        self.network_name = Some(name.into());
        self
    }

    pub fn game_number(mut self, number: impl Into<String>) -> Self {
        self.game_number = Some(number.into());
        self
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = Some(game_type);
        self
    }

    pub fn bet_limit(mut self, bet_limit: BetLimitObj) -> Self {
        self.bet_limit = Some(bet_limit);
        self
    }

    pub fn start_date_utc(mut self, start: DateTime<Utc>) -> Self {
        self.start_date_utc = Some(start);
        self
    }

    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    pub fn table_size(mut self, size: u64) -> Self {
        self.table_size = Some(size);
        self
    }

    pub fn dealer_seat(mut self, seat: u64) -> Self {
        self.dealer_seat = Some(seat);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the small and big blind amounts.
    pub fn blinds(mut self, small_blind: Amount, big_blind: Amount) -> Self {
        self.small_blind_amount = Some(small_blind);
        self.big_blind_amount = Some(big_blind);
        self
    }

    pub fn ante_amount(mut self, ante: Amount) -> Self {
        self.ante_amount = Some(ante);
        self
    }

    pub fn flag(mut self, flag: HandFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    pub fn player(mut self, player: PlayerObj) -> Self {
        self.players.push(player);
        self
    }

    pub fn players(mut self, players: Vec<PlayerObj>) -> Self {
        self.players = players;
        self
    }

    pub fn round(mut self, round: RoundObj) -> Self {
        self.rounds.push(round);
        self
    }

    pub fn rounds(mut self, rounds: Vec<RoundObj>) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn pot(mut self, pot: PotObj) -> Self {
        self.pots.push(pot);
        self
    }

    pub fn pots(mut self, pots: Vec<PotObj>) -> Self {
        self.pots = pots;
        self
    }

    pub fn tournament_info(mut self, info: TournamentInfoObj) -> Self {
        self.tournament_info = Some(info);
        self
    }

    pub fn tournament_rebuy(mut self, rebuy: TournamentRebuyObj) -> Self {
        self.tournament_rebuys.push(rebuy);
        self
    }

    pub fn tournament_bounty(mut self, bounty: TournamentBountyObj) -> Self {
        self.tournament_bounties.push(bounty);
        self
    }

    pub fn build(self) -> Result<HandHistory, BuildError> {
        let bet_limit = self
            .bet_limit
            .ok_or(BuildError::MissingField("bet_limit"))?;
        let players = self
            .players
            .into_iter()
            .map(|p| PlayerObj {
                player_bounty: Amount::non_zero(p.player_bounty),
                ..p
            })
            .collect();

        Ok(HandHistory {
            spec_version: SPEC_VERSION.to_string(),
            internal_version: INTERNAL_VERSION.to_string(),
            hero_player_id: self
                .hero_player_id
                .ok_or(BuildError::MissingField("hero_player_id"))?,
            site_name: self.site_name.ok_or(BuildError::MissingField("site_name"))?,
            network_name: self
                .network_name
                .ok_or(BuildError::MissingField("network_name"))?,
            game_number: self
                .game_number
                .ok_or(BuildError::MissingField("game_number"))?,
            game_type: self.game_type.ok_or(BuildError::MissingField("game_type"))?,
            bet_limit: BetLimitObj::new(bet_limit.bet_type, bet_limit.bet_cap),
            start_date_utc: self
                .start_date_utc
                .ok_or(BuildError::MissingField("start_date_utc"))?,
            table_name: self
                .table_name
                .ok_or(BuildError::MissingField("table_name"))?,
            table_size: self
                .table_size
                .ok_or(BuildError::MissingField("table_size"))?,
            dealer_seat: self
                .dealer_seat
                .ok_or(BuildError::MissingField("dealer_seat"))?,
            currency: self.currency.ok_or(BuildError::MissingField("currency"))?,
            small_blind_amount: self
                .small_blind_amount
                .ok_or(BuildError::MissingField("small_blind_amount"))?,
            big_blind_amount: self
                .big_blind_amount
                .ok_or(BuildError::MissingField("big_blind_amount"))?,
            ante_amount: Amount::non_zero(self.ante_amount),
            flags: self.flags,
            players,
            rounds: self.rounds,
            pots: self.pots,
            tournament_info: self.tournament_info,
            tournament_rebuys: self.tournament_rebuys,
            tournament_bounties: self.tournament_bounties,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::hand_history::BetType;

    fn minimal() -> HandHistoryBuilder {
        HandHistoryBuilder::new()
            .site_name("site")
            .network_name("network")
            .game_number("77")
            .game_type(GameType::Omaha)
            .bet_limit(BetLimitObj::new(BetType::PotLimit, None))
            .start_date_utc(Utc.with_ymd_and_hms(2023, 7, 1, 9, 30, 0).unwrap())
            .table_name("Table")
            .table_size(9)
            .dealer_seat(4)
            .currency("EUR")
            .blinds(Amount::from_units(1).unwrap(), Amount::from_units(2).unwrap())
            .hero_player_id(0)
    }

    #[test]
    fn test_build_fills_versions() {
        let hand = minimal().build().unwrap();
        assert_eq!(hand.spec_version, SPEC_VERSION);
        assert_eq!(hand.internal_version, INTERNAL_VERSION);
        assert_eq!(hand.game_type, GameType::Omaha);
        assert!(hand.players.is_empty());
        assert!(hand.tournament_info.is_none());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let result = HandHistoryBuilder::new().site_name("site").build();
        assert_eq!(result, Err(BuildError::MissingField("bet_limit")));

        let result = minimal().build().map(|_| ());
        assert!(result.is_ok());

        let mut builder = minimal();
        builder.currency = None;
        assert_eq!(builder.build(), Err(BuildError::MissingField("currency")));
    }

    #[test]
    fn test_zero_optionals_collapse() {
        let mut player = PlayerObj::new(0, 1, "Hero", Amount::from_units(50).unwrap(), None);
        player.player_bounty = Some(Amount::ZERO);

        let hand = minimal()
            .ante_amount(Amount::ZERO)
            .bet_limit(BetLimitObj {
                bet_type: BetType::NoLimit,
                bet_cap: Some(Amount::ZERO),
            })
            .player(player)
            .build()
            .unwrap();

        assert_eq!(hand.ante_amount, None);
        assert_eq!(hand.bet_limit.bet_cap, None);
        assert_eq!(hand.players[0].player_bounty, None);
    }

    #[test]
    fn test_flags_are_deduplicated() {
        let hand = minimal()
            .flag(HandFlag::Fast)
            .flag(HandFlag::Fast)
            .flag(HandFlag::Anonymous)
            .build()
            .unwrap();
        assert_eq!(hand.flags, vec![HandFlag::Fast, HandFlag::Anonymous]);
    }
}
