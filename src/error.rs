//! Crate error type. Manually implemented (no `thiserror`), matching the
//! reference repository's `ProcessError`-style hand-rolled `Display`/`Error`.

use std::fmt;

use crate::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A specific expected token was not found at a position.
    ParseToken {
        expected: TokenKind,
        actual: TokenKind,
        line: usize,
        col: usize,
    },
    /// File-level failure: every non-blank line failed to parse.
    InvalidFeed,
    /// A single post line could not be split into timestamp + body.
    InvalidTwtLine(String),
    /// An otherwise-syntactic post whose body is empty after trimming.
    EmptyPost,
    /// Byte-layer failure (non-UTF-8 input, or I/O failure reading the feed).
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseToken { expected, actual, line, col } => write!(
                f,
                "parse error at {}:{}: expected {}, got {}",
                line, col, expected, actual
            ),
            Error::InvalidFeed => write!(f, "invalid feed: every non-blank line failed to parse"),
            Error::InvalidTwtLine(line) => write!(f, "invalid twt line: {:?}", line),
            Error::EmptyPost => write!(f, "empty post"),
            Error::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
