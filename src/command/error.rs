//! Command parsing errors.

use thiserror::Error;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Command parsing errors.
///
/// Both variants are reported to the user as `UNKNOWN COMMAND`; the detail
/// only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown verb: {verb}")]
    UnknownCommand { verb: String },

    #[error("{verb} takes {expected} argument(s), got {found}")]
    WrongArity {
        verb: &'static str,
        expected: usize,
        found: usize,
    },
}
