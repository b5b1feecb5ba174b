//! Open-set enumerations used by the hand history schema.
//!
//! Every enumeration in the format is documented as extensible: sites add
//! flags, action names and speed classes without a format change. Each enum
//! therefore has its known variants plus an `Unrecognized` fallback that
//! keeps the raw string, so a lenient reader never loses data and a strict
//! reader can reject the value with a precise path.
//!
//! Conversion from a string matches known variants ignoring ASCII case
//! (`"Preflop"` and `"preflop"` are the same street), and values are always
//! written back in their canonical spelling. A strict decoder accepts only
//! the canonical spellings listed in [`WireEnum::VARIANTS`].

/// Common surface of the open-set enums, used by the strict decode pass.
pub trait WireEnum {
    /// Name of the enumeration, used in error messages.
    const KIND: &'static str;

    /// Canonical wire spellings of the known variants.
    const VARIANTS: &'static [&'static str];

    /// The raw wire string when the value is not one of the known variants.
    fn unrecognized(&self) -> Option<&str>;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value outside the known set, kept verbatim.
            Unrecognized(String),
        }

        impl $name {
            /// The canonical wire spelling, or the raw string when unrecognized.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Unrecognized(raw) => raw.as_str(),
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $(
                    if raw.eq_ignore_ascii_case($wire) {
                        return $name::$variant;
                    }
                )+
                $name::Unrecognized(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match $name::from(raw.as_str()) {
                    $name::Unrecognized(_) => $name::Unrecognized(raw),
                    known => known,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Unrecognized(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::hand_history::WireEnum for $name {
            const KIND: &'static str = stringify!($name);
            const VARIANTS: &'static [&'static str] = &[$($wire),+];

            fn unrecognized(&self) -> Option<&str> {
                match self {
                    $name::Unrecognized(raw) => Some(raw.as_str()),
                    _ => None,
                }
            }
        }
    };
}

wire_enum! {
    /// The betting structure of the game.
    pub enum BetType {
        NoLimit => "NL",
        PotLimit => "PL",
        FixedLimit => "FL",
    }
}

wire_enum! {
    /// The betting round a [`RoundObj`](super::RoundObj) belongs to.
    pub enum Street {
        Preflop => "preflop",
        Flop => "flop",
        Turn => "turn",
        River => "river",
        Showdown => "showdown",
    }
}

wire_enum! {
    /// What a player did in an [`ActionObj`](super::ActionObj).
    pub enum ActionKind {
        /// Player is dealt cards
        DealtCards => "Dealt Cards",
        /// Player mucks (does not show) their cards
        MucksCards => "Mucks Cards",
        ShowsCards => "Shows Cards",
        PostAnte => "Post Ante",
        PostSmallBlind => "Post SB",
        PostBigBlind => "Post BB",
        /// Player posts a straddle to buy the button
        Straddle => "Straddle",
        PostDead => "Post Dead",
        /// Any other kind of blind
        PostExtraBlind => "Post Extra Blind",
        Fold => "Fold",
        Check => "Check",
        /// A bet into an unbet pot
        Bet => "Bet",
        Raise => "Raise",
        Call => "Call",
        /// Player adds chips to their stack (cash games only)
        AddedChips => "Added Chips",
        SitsDown => "Sits Down",
        StandsUp => "Stands Up",
    }
}

wire_enum! {
    pub enum GameType {
        Holdem => "Holdem",
        Omaha => "Omaha",
        OmahaHiLo => "OmahaHiLo",
        Stud => "Stud",
        StudHiLo => "StudHiLo",
        Draw => "Draw",
    }
}

wire_enum! {
    /// Special characteristics of a hand needed to fully understand it.
    pub enum HandFlag {
        /// Two sets of board cards are used in the play of the same hand
        RunItTwice => "RUN_IT_TWICE",
        /// Players at the table have no name or id kept for historical records
        Anonymous => "ANONYMOUS",
        /// The hand was observed and the hero was not dealt in
        Observed => "OBSERVED",
        /// Fast fold variant: folding moves the player straight to the next hand
        Fast => "FAST",
        /// The amount each player can wager per hand is capped
        Cap => "CAP",
    }
}

wire_enum! {
    pub enum TournamentType {
        SingleTable => "STT",
        MultiTable => "MTT",
    }
}

wire_enum! {
    /// Descriptive properties of a tournament.
    pub enum TournamentFlag {
        SitNGo => "SNG",
        /// Half of the players win double their buy-in
        DoubleOrNothing => "DON",
        Bounty => "BOUNTY",
        Shootout => "SHOOTOUT",
        Rebuy => "REBUY",
        /// One buy-in split between multiple games
        Matrix => "MATRIX",
        PushOrFold => "PUSH_OR_FOLD",
        /// Prize includes entry into another tournament
        Satellite => "SATELLITE",
        Steps => "STEPS",
        Deep => "DEEP",
        MultiEntry => "MULTI-ENTRY",
        FiftyFifty => "FIFTY50",
        Flipout => "FLIPOUT",
        TripleUp => "TRIPLEUP",
        Lottery => "LOTTERY",
        ReEntry => "RE-ENTRY",
        PowerUp => "POWER_UP",
        ProgressiveBounty => "PROGRESSIVE-BOUNTY",
    }
}

wire_enum! {
    /// How quickly blind levels increase relative to a normal tournament.
    pub enum SpeedType {
        Normal => "NORMAL",
        SemiTurbo => "SEMI-TURBO",
        Turbo => "TURBO",
        SuperTurbo => "SUPER-TURBO",
        HyperTurbo => "HYPER-TURBO",
        UltraTurbo => "ULTRA-TURBO",
    }
}

wire_enum! {
    pub enum RebuyAction {
        /// Chips bought at set points of the tournament
        Rebuy => "REBUY",
        Addon => "ADDON",
        /// Buying back in after being felted
        ReEntry => "REENTRY",
    }
}
