//! Wire-level error type.

use thiserror::Error;

use crate::WireFormat;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid {format} at byte {position}: {message}")]
    Syntax {
        format: WireFormat,
        position: u64,
        message: String,
    },
    #[error("unexpected end of {0} input at byte {1}")]
    UnexpectedEof(WireFormat, u64),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(u64),
    #[error("{found} found where {expected} was expected (byte {position})")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
        position: u64,
    },
    #[error("writer misuse: {0}")]
    Writer(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl WireError {
    pub(crate) fn syntax(format: WireFormat, position: u64, message: impl Into<String>) -> Self {
        WireError::Syntax {
            format,
            position,
            message: message.into(),
        }
    }
}
