use anyhow::{Context, Result};
use reversi_core::{ConfigError, SessionConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub session: SessionConfig,
    pub flash_interval_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            flash_interval_ms: 500,
            poll_interval_ms: 20,
        }
    }
}

impl ConsoleConfig {
    /// Read `path` if it exists, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("failed to load {}", path.display()))?
        } else {
            info!(path = %path.display(), "config not found, using defaults");
            Self::default()
        };

        config.merge_env(|key| std::env::var(key).ok());
        config.session.validate()?;

        info!(
            countdown = config.session.countdown_seconds,
            timed = config.session.timed,
            flash_ms = config.flash_interval_ms,
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.session.validate()?;
        Ok(config)
    }

    fn merge_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("REVERSI_COUNTDOWN_SECONDS") {
            match val.parse() {
                Ok(parsed) => self.session.countdown_seconds = parsed,
                Err(_) => warn!(%val, "ignoring REVERSI_COUNTDOWN_SECONDS"),
            }
        }
        if let Some(val) = var("REVERSI_FLASH_INTERVAL_MS") {
            match val.parse() {
                Ok(parsed) => self.flash_interval_ms = parsed,
                Err(_) => warn!(%val, "ignoring REVERSI_FLASH_INTERVAL_MS"),
            }
        }
        if let Some(val) = var("REVERSI_TIMED") {
            match val.parse() {
                Ok(parsed) => self.session.timed = parsed,
                Err(_) => warn!(%val, "ignoring REVERSI_TIMED"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_session_table() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            flash_interval_ms = 250

            [session]
            countdown_seconds = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.flash_interval_ms, 250);
        assert_eq!(config.poll_interval_ms, 20);
        assert_eq!(config.session.countdown_seconds, 15);
        assert_eq!(config.session.tick_interval_ms, 1000);
    }

    #[test]
    fn invalid_session_is_rejected() {
        assert!(matches!(
            ConsoleConfig::from_toml_str("[session]\ncountdown_seconds = 0"),
            Err(ConfigError::ZeroCountdown)
        ));
    }

    #[test]
    fn env_overrides() {
        let mut config = ConsoleConfig::default();
        config.merge_env(|key| match key {
            "REVERSI_COUNTDOWN_SECONDS" => Some("12".to_string()),
            "REVERSI_TIMED" => Some("true".to_string()),
            "REVERSI_FLASH_INTERVAL_MS" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(config.session.countdown_seconds, 12);
        assert!(config.session.timed);
        assert_eq!(config.flash_interval_ms, 500);
    }

    #[test]
    fn missing_file_is_default() {
        let config = ConsoleConfig::load(Path::new("definitely/not/here/Reversi.toml")).unwrap();
        assert_eq!(config.poll_interval_ms, 20);
    }
}
