//! Structural pass run on the parsed JSON tree before typed decoding.
//!
//! serde reports where in the text a document went wrong, not which field.
//! Walking the tree against a table of expected fields first gives errors
//! like `rounds[2].actions[0].amount: expected number, found string`.

use serde_json::{Map, Value};

use tracing::debug;

use crate::core::{Amount, FieldPath};
use crate::hand_history::{
    parse_timestamp, ActionKind, BetType, GameType, HandFlag, RebuyAction, SpeedType, Street,
    TournamentFlag, TournamentType, WireEnum,
};

use super::{DecodeError, DecodeMode, StructureProblem};

#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Non-negative integer
    Integer,
    /// Decimal amount, number or numeric string
    Number,
    Bool,
    Text,
    Timestamp,
    /// Open enumeration; strict decoding requires one of the canonical spellings
    Enum {
        kind: &'static str,
        variants: &'static [&'static str],
    },
    Object(&'static [Field]),
    List(&'static Shape),
    /// A list some producers write as `""` when empty
    ListOrBlank(&'static Shape),
    /// A list some producers write as its single element
    OneOrList(&'static Shape),
}

#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    alias: Option<&'static str>,
    shape: Shape,
    required: bool,
}

const fn required(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        alias: None,
        shape,
        required: true,
    }
}

const fn optional(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        alias: None,
        shape,
        required: false,
    }
}

const fn required_or(name: &'static str, alias: &'static str, shape: Shape) -> Field {
    Field {
        name,
        alias: Some(alias),
        shape,
        required: true,
    }
}

const fn wire<E: WireEnum>() -> Shape {
    Shape::Enum {
        kind: E::KIND,
        variants: E::VARIANTS,
    }
}

const TEXT: Shape = Shape::Text;
const HAND_FLAG: Shape = wire::<HandFlag>();
const TOURNAMENT_FLAG: Shape = wire::<TournamentFlag>();

const BET_LIMIT_FIELDS: &[Field] = &[
    required("bet_type", wire::<BetType>()),
    optional("bet_cap", Shape::Number),
];

const PLAYER_FIELDS: &[Field] = &[
    required("id", Shape::Integer),
    required("seat", Shape::Integer),
    required("name", Shape::Text),
    required("starting_stack", Shape::Number),
    optional("player_bounty", Shape::Number),
];

const ACTION_FIELDS: &[Field] = &[
    required("action_number", Shape::Integer),
    required("player_id", Shape::Integer),
    required("action", wire::<ActionKind>()),
    required("amount", Shape::Number),
    required("is_allin", Shape::Bool),
    optional("cards", Shape::ListOrBlank(&TEXT)),
];
const ACTION: Shape = Shape::Object(ACTION_FIELDS);

const ROUND_FIELDS: &[Field] = &[
    required("id", Shape::Integer),
    required("street", wire::<Street>()),
    optional("cards", Shape::ListOrBlank(&TEXT)),
    required("actions", Shape::List(&ACTION)),
];
const ROUND: Shape = Shape::Object(ROUND_FIELDS);

const PLAYER_WINS_FIELDS: &[Field] = &[
    required("player_id", Shape::Integer),
    required("win_amount", Shape::Number),
    optional("contributed_rake", Shape::Number),
];
const PLAYER_WINS: Shape = Shape::Object(PLAYER_WINS_FIELDS);

const POT_FIELDS: &[Field] = &[
    required("number", Shape::Integer),
    required("amount", Shape::Number),
    optional("rake", Shape::Number),
    required("player_wins", Shape::List(&PLAYER_WINS)),
];
const POT: Shape = Shape::Object(POT_FIELDS);

const SPEED_FIELDS: &[Field] = &[
    required("type", wire::<SpeedType>()),
    required("round_time", Shape::Integer),
];
const SPEED: Shape = Shape::Object(SPEED_FIELDS);

const TOURNAMENT_INFO_FIELDS: &[Field] = &[
    required("tournament_number", Shape::Text),
    required("name", Shape::Text),
    required("start_date_utc", Shape::Timestamp),
    required("currency", Shape::Text),
    required("buyin_amount", Shape::Number),
    required("fee_amount", Shape::Number),
    required("bounty_fee_amount", Shape::Number),
    required("initial_stack", Shape::Integer),
    required("type", wire::<TournamentType>()),
    optional("flags", Shape::ListOrBlank(&TOURNAMENT_FLAG)),
    optional("speed", Shape::OneOrList(&SPEED)),
];

const REBUY_FIELDS: &[Field] = &[
    required("player_id", Shape::Integer),
    required("rebuy_action", wire::<RebuyAction>()),
    required("amount", Shape::Number),
    required("chips", Shape::Integer),
];
const REBUY: Shape = Shape::Object(REBUY_FIELDS);

const BOUNTY_FIELDS: &[Field] = &[
    required("player_id", Shape::Integer),
    required("bounty_won", Shape::Number),
    required("defeated_player_id", Shape::Integer),
];
const BOUNTY: Shape = Shape::Object(BOUNTY_FIELDS);

const PLAYER: Shape = Shape::Object(PLAYER_FIELDS);

const HAND_HISTORY_FIELDS: &[Field] = &[
    required("spec_version", Shape::Text),
    required("internal_version", Shape::Text),
    required("hero_player_id", Shape::Integer),
    required_or("site_name", "size_name", Shape::Text),
    required("network_name", Shape::Text),
    required("game_number", Shape::Text),
    required("game_type", wire::<GameType>()),
    required("bet_limit", Shape::Object(BET_LIMIT_FIELDS)),
    required("start_date_utc", Shape::Timestamp),
    required("table_name", Shape::Text),
    required("table_size", Shape::Integer),
    required("dealer_seat", Shape::Integer),
    required_or("currency", "curency", Shape::Text),
    required("small_blind_amount", Shape::Number),
    required("big_blind_amount", Shape::Number),
    optional("ante_amount", Shape::Number),
    optional("flags", Shape::ListOrBlank(&HAND_FLAG)),
    required("players", Shape::List(&PLAYER)),
    required("rounds", Shape::List(&ROUND)),
    required("pots", Shape::List(&POT)),
    optional("tournament_info", Shape::Object(TOURNAMENT_INFO_FIELDS)),
    optional("tournament_rebuys", Shape::ListOrBlank(&REBUY)),
    optional("tournament_bounties", Shape::ListOrBlank(&BOUNTY)),
];

/// Check `value` against the hand history layout.
///
/// In [`DecodeMode::Strict`] an enumeration value that is not one of the
/// canonical spellings fails with [`DecodeError::UnknownVariant`].
pub(crate) fn check_hand_history(value: &Value, mode: DecodeMode) -> Result<(), DecodeError> {
    Walk { mode }.check_shape(value, Shape::Object(HAND_HISTORY_FIELDS), &FieldPath::root())
}

/// Remove misspelled root keys whose correct spelling is also present.
///
/// Both spellings would otherwise reach serde as the same field. The
/// correctly spelled key is the one the structural pass checked, so it wins.
pub(crate) fn drop_shadowed_aliases(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    for field in HAND_HISTORY_FIELDS {
        if let Some(alias) = field.alias {
            if map.contains_key(field.name) && map.remove(alias).is_some() {
                debug!(field = field.name, alias, "Ignoring shadowed alias");
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(path: &FieldPath, expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::Structure {
        path: path.clone(),
        problem: StructureProblem::WrongType {
            expected,
            found: json_type(found),
        },
    }
}

struct Walk {
    mode: DecodeMode,
}

impl Walk {
    fn check_shape(&self, value: &Value, shape: Shape, path: &FieldPath) -> Result<(), DecodeError> {
        match shape {
            Shape::Integer => match value {
                Value::Number(n) if n.is_u64() => Ok(()),
                Value::Number(n) => Err(DecodeError::Structure {
                    path: path.clone(),
                    problem: StructureProblem::InvalidNumber(format!(
                        "{n} is not a non-negative integer"
                    )),
                }),
                other => Err(wrong_type(path, "integer", other)),
            },
            Shape::Number => match value {
                Value::Number(_) | Value::String(_) => {
                    serde_json::from_value::<Amount>(value.clone())
                        .map(|_| ())
                        .map_err(|e| DecodeError::Structure {
                            path: path.clone(),
                            problem: StructureProblem::InvalidNumber(e.to_string()),
                        })
                }
                other => Err(wrong_type(path, "number", other)),
            },
            Shape::Bool => match value {
                Value::Bool(_) => Ok(()),
                other => Err(wrong_type(path, "boolean", other)),
            },
            Shape::Text => match value {
                Value::String(_) => Ok(()),
                other => Err(wrong_type(path, "string", other)),
            },
            Shape::Enum { kind, variants } => match value {
                Value::String(raw)
                    if self.mode == DecodeMode::Strict && !variants.contains(&raw.as_str()) =>
                {
                    Err(DecodeError::UnknownVariant {
                        path: path.clone(),
                        kind,
                        value: raw.clone(),
                    })
                }
                Value::String(_) => Ok(()),
                other => Err(wrong_type(path, "string", other)),
            },
            Shape::Timestamp => match value {
                Value::String(raw) => {
                    parse_timestamp(raw)
                        .map(|_| ())
                        .map_err(|_| DecodeError::Structure {
                            path: path.clone(),
                            problem: StructureProblem::InvalidTimestamp(raw.clone()),
                        })
                }
                other => Err(wrong_type(path, "timestamp string", other)),
            },
            Shape::Object(fields) => match value {
                Value::Object(map) => self.check_fields(map, fields, path),
                other => Err(wrong_type(path, "object", other)),
            },
            Shape::List(inner) => match value {
                Value::Array(items) => self.check_items(items, *inner, path),
                other => Err(wrong_type(path, "array", other)),
            },
            Shape::ListOrBlank(inner) => match value {
                Value::Array(items) => self.check_items(items, *inner, path),
                Value::String(s) if s.is_empty() => Ok(()),
                other => Err(wrong_type(path, "array", other)),
            },
            Shape::OneOrList(inner) => match value {
                Value::Array(items) => self.check_items(items, *inner, path),
                single => self.check_shape(single, *inner, path),
            },
        }
    }

    fn check_items(&self, items: &[Value], shape: Shape, path: &FieldPath) -> Result<(), DecodeError> {
        for (idx, item) in items.iter().enumerate() {
            self.check_shape(item, shape, &path.index(idx))?;
        }
        Ok(())
    }

    fn check_fields(
        &self,
        map: &Map<String, Value>,
        fields: &[Field],
        path: &FieldPath,
    ) -> Result<(), DecodeError> {
        for field in fields {
            let (name, value) = match map.get(field.name) {
                Some(value) => (field.name, Some(value)),
                None => match field.alias {
                    Some(alias) => (alias, map.get(alias)),
                    None => (field.name, None),
                },
            };
            match value {
                Some(Value::Null) | None if !field.required => {}
                None => {
                    return Err(DecodeError::Structure {
                        path: path.field(field.name),
                        problem: StructureProblem::Missing,
                    })
                }
                Some(value) => self.check_shape(value, field.shape, &path.field(name))?,
            }
        }
        Ok(())
    }
}
