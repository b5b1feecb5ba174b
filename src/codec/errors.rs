use thiserror::Error;

use crate::core::FieldPath;

/// What was wrong with a field during the structural pass.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StructureProblem {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("invalid ISO-8601 timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("{0}")]
    Rejected(String),
}

/// Reasons a byte sequence could not be decoded into a hand history.
///
/// Decoding stops at the first error; no partial value is returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid field `{path}`: {problem}")]
    Structure {
        path: FieldPath,
        problem: StructureProblem,
    },

    #[error("Unrecognized {kind} value {value:?} at `{path}`")]
    UnknownVariant {
        path: FieldPath,
        kind: &'static str,
        value: String,
    },

    #[error("Error reading hand history caused by IO error")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// The field the error points at, if it points at one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            DecodeError::Structure { path, .. } | DecodeError::UnknownVariant { path, .. } => {
                Some(path)
            }
            DecodeError::Line { source, .. } => source.path(),
            DecodeError::Syntax { .. } | DecodeError::Io(_) => None,
        }
    }

    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        if err.is_io() {
            return DecodeError::Io(err.into());
        }
        DecodeError::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Encoding a hand history cannot fail on the value itself; these are
/// failures of the output sink.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Error writing hand history caused by IO error")]
    Io(#[from] std::io::Error),

    #[error("Error serializing hand history")]
    Json(#[source] serde_json::Error),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            EncodeError::Io(err.into())
        } else {
            EncodeError::Json(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = DecodeError::Structure {
            path: FieldPath::root().field("players").index(1).field("seat"),
            problem: StructureProblem::WrongType {
                expected: "integer",
                found: "string",
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid field `players[1].seat`: expected integer, found string"
        );
    }

    #[test]
    fn test_line_error_exposes_inner_path() {
        let inner = DecodeError::UnknownVariant {
            path: FieldPath::root().field("game_type"),
            kind: "GameType",
            value: "Badugi".to_string(),
        };
        let err = DecodeError::Line {
            line: 3,
            source: Box::new(inner),
        };
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("game_type"));
        assert!(err.to_string().starts_with("Line 3: Unrecognized GameType"));
    }
}
