//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `spotswitch.toml` in the working directory. Every field has
//! a sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Executor tick settings.
    pub scheduler: SchedulerConfig,
    /// Seed file settings.
    pub schedules: SchedulesConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Executor tick configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between ticks. Schedule boundaries have minute
    /// precision, so the default of one tick per minute fits them.
    pub tick_interval_secs: u64,
}

/// Seed file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulesConfig {
    /// Path of the TOML file describing devices and schedules.
    pub path: String,
}

impl Config {
    /// Load configuration from `spotswitch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("spotswitch.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SPOTSWITCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("SPOTSWITCH_TICK_INTERVAL") {
            if let Ok(secs) = val.parse() {
                self.scheduler.tick_interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("SPOTSWITCH_SCHEDULES") {
            self.schedules.path = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.tick_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "tick interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the tick interval as a [`std::time::Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.scheduler.tick_interval_secs)
    }

    /// Return the seed file path.
    #[must_use]
    pub fn schedules_path(&self) -> &str {
        &self.schedules.path
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "spotswitchd=info,spotswitch=info".to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 60,
        }
    }
}

impl Default for SchedulesConfig {
    fn default() -> Self {
        Self {
            path: "schedules.toml".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.filter, "spotswitchd=info,spotswitch=info");
        assert_eq!(config.scheduler.tick_interval_secs, 60);
        assert_eq!(config.schedules.path, "schedules.toml");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scheduler.tick_interval_secs, 60);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [scheduler]
            tick_interval_secs = 30

            [schedules]
            path = '/etc/spotswitch/schedules.toml'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.scheduler.tick_interval_secs, 30);
        assert_eq!(config.schedules.path, "/etc/spotswitch/schedules.toml");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [scheduler]
            tick_interval_secs = 10
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scheduler.tick_interval_secs, 10);
        assert_eq!(config.logging.filter, "spotswitchd=info,spotswitch=info");
        assert_eq!(config.schedules.path, "schedules.toml");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.scheduler.tick_interval_secs, 60);
    }

    #[test]
    fn should_reject_zero_tick_interval() {
        let mut config = Config::default();
        config.scheduler.tick_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_default_tick_interval() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_expose_tick_interval_as_duration() {
        let mut config = Config::default();
        config.scheduler.tick_interval_secs = 30;
        assert_eq!(config.tick_interval(), std::time::Duration::from_secs(30));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
