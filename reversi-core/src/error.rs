//! Errors for the few fallible edges of the engine: notation, fixtures and config.
//!
//! Game operations themselves never fail; an illegal action is reported as a
//! rejection and leaves the session untouched.

use derive_more::{Display, Error};

/// A location string was not of the form "D3".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display(fmt = "invalid location notation")]
pub struct ParseLocationError;

/// A board string could not be read as 64 squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    #[display(fmt = "unexpected character {:?} in board string", found)]
    InvalidCharacter { found: char },
    #[display(fmt = "board string has {} squares, expected 64", squares)]
    WrongLength { squares: usize },
}

/// A session configuration was unreadable or out of range.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "cannot parse config: {}", _0)]
    Parse(toml::de::Error),
    #[display(fmt = "countdown_seconds must be at least 1")]
    ZeroCountdown,
    #[display(fmt = "tick_interval_ms must be at least 1")]
    ZeroTickInterval,
    #[display(fmt = "cursor_start ({}, {}) is off the board", x, y)]
    CursorOffBoard { x: u8, y: u8 },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
