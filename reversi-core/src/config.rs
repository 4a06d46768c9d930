//! Session tunables, readable from TOML.

use crate::error::ConfigError;
use crate::location::Location;
use serde::Deserialize;

/// Where the cursor sits when a game starts.
pub const DEFAULT_CURSOR: Location = Location::from_coords(5, 3);

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds on the turn clock.
    pub countdown_seconds: u8,
    /// Milliseconds per countdown step.
    pub tick_interval_ms: u64,
    /// Cursor start as `[x, y]`.
    pub cursor_start: [u8; 2],
    /// Whether new games start with the turn clock on.
    pub timed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: 30,
            tick_interval_ms: 1000,
            cursor_start: [DEFAULT_CURSOR.x(), DEFAULT_CURSOR.y()],
            timed: false,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_seconds == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.cursor_location().is_none() {
            let [x, y] = self.cursor_start;
            return Err(ConfigError::CursorOffBoard { x, y });
        }
        Ok(())
    }

    /// The cursor start, if it is on the board.
    pub fn cursor_location(&self) -> Option<Location> {
        let [x, y] = self.cursor_start;
        Location::new(i8::try_from(x).ok()?, i8::try_from(y).ok()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.countdown_seconds, 30);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.cursor_location(), Some(DEFAULT_CURSOR));
        assert!(!config.timed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SessionConfig::from_toml_str(
            r#"
            countdown_seconds = 10
            timed = true
            "#,
        )
        .unwrap();
        assert_eq!(config.countdown_seconds, 10);
        assert!(config.timed);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.cursor_start, [5, 3]);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            SessionConfig::from_toml_str("countdown_seconds = 0"),
            Err(ConfigError::ZeroCountdown)
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("tick_interval_ms = 0"),
            Err(ConfigError::ZeroTickInterval)
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("cursor_start = [8, 0]"),
            Err(ConfigError::CursorOffBoard { x: 8, y: 0 })
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("cursor_start = [200, 1]"),
            Err(ConfigError::CursorOffBoard { x: 200, y: 1 })
        ));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            SessionConfig::from_toml_str("countdown_seconds = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
