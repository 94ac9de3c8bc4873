//! Codec error type.

use redmine_wire::WireError;
use thiserror::Error;

/// Coarse classification of [`Error`], stable across variants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The token stream does not have the expected shape.
    Structural,
    /// A scalar failed to parse as its declared type.
    ValueFormat,
    /// An entity violates an invariant and was not serialized.
    Validation,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("unexpected root `{found}`, expected `{expected}`")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    #[error("document has no `{0}` collection")]
    MissingCollection(&'static str),
    #[error("reference without id at byte {0}")]
    MissingId(u64),
    #[error("invalid {expected} value `{text}` at byte {position}")]
    ValueFormat {
        expected: &'static str,
        text: String,
        position: u64,
    },
    #[error("invalid {entity}: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Wire(_)
            | Error::UnexpectedRoot { .. }
            | Error::MissingCollection(_)
            | Error::MissingId(_) => ErrorKind::Structural,
            Error::ValueFormat { .. } => ErrorKind::ValueFormat,
            Error::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub(crate) fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            entity,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Wire(WireError::Io(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        let cases = [
            (Error::MissingId(3), ErrorKind::Structural),
            (Error::MissingCollection("issues"), ErrorKind::Structural),
            (
                Error::ValueFormat {
                    expected: "integer",
                    text: "x".into(),
                    position: 0,
                },
                ErrorKind::ValueFormat,
            ),
            (Error::validation("relation", "undefined"), ErrorKind::Validation),
            (
                Error::from(std::io::Error::other("closed")),
                ErrorKind::Structural,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }
}
