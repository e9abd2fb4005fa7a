//! Environment variable names used to configure a transport without code.
//!
//! These are purely helpers; the transports themselves never read the
//! environment.

use std::str::FromStr;

use crate::config::TransportConfig;
use crate::error::ConfigError;

/// Log file path.
pub const SCREEBA_LOG_FILE_ENV: &str = "SCREEBA_LOG_FILE";

/// Transport format, `json` or `text`.
pub const SCREEBA_LOG_FORMAT_ENV: &str = "SCREEBA_LOG_FORMAT";

/// Comma-separated list of accepted levels. Unset or empty accepts all.
pub const SCREEBA_LOG_LEVELS_ENV: &str = "SCREEBA_LOG_LEVELS";

/// `true`/`false`, stamp records with the current time.
pub const SCREEBA_LOG_TIMESTAMP_ENV: &str = "SCREEBA_LOG_TIMESTAMP";

/// `true`/`false`, apply level colors.
pub const SCREEBA_LOG_COLORIZE_ENV: &str = "SCREEBA_LOG_COLORIZE";

/// `true`/`false`, pretty-print JSON records.
pub const SCREEBA_LOG_PRETTYPRINT_ENV: &str = "SCREEBA_LOG_PRETTYPRINT";

/// Indentation width for pretty-printed records.
pub const SCREEBA_LOG_INDENTATION_ENV: &str = "SCREEBA_LOG_INDENTATION";

/// JSON framing, `comma-terminated` or `ndjson`.
pub const SCREEBA_LOG_FRAMING_ENV: &str = "SCREEBA_LOG_FRAMING";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl TransportConfig {
    /// Build a configuration from `SCREEBA_LOG_*` variables, starting from
    /// the defaults. Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TransportConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = TransportConfig::default();

        if let Some(path) = lookup(SCREEBA_LOG_FILE_ENV) {
            cfg.filename = path.into();
        }
        if let Some(format) = lookup(SCREEBA_LOG_FORMAT_ENV) {
            cfg.format = format.parse()?;
        }
        if let Some(levels) = lookup(SCREEBA_LOG_LEVELS_ENV) {
            cfg.levels = levels
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(framing) = lookup(SCREEBA_LOG_FRAMING_ENV) {
            cfg.framing = framing.parse()?;
        }
        if let Some(v) = lookup(SCREEBA_LOG_TIMESTAMP_ENV) {
            cfg.timestamp = parse_value(SCREEBA_LOG_TIMESTAMP_ENV, &v)?;
        }
        if let Some(v) = lookup(SCREEBA_LOG_COLORIZE_ENV) {
            cfg.colorize = parse_value(SCREEBA_LOG_COLORIZE_ENV, &v)?;
        }
        if let Some(v) = lookup(SCREEBA_LOG_PRETTYPRINT_ENV) {
            cfg.prettyprint = parse_value(SCREEBA_LOG_PRETTYPRINT_ENV, &v)?;
        }
        if let Some(v) = lookup(SCREEBA_LOG_INDENTATION_ENV) {
            cfg.indentation = parse_value(SCREEBA_LOG_INDENTATION_ENV, &v)?;
        }

        Ok(cfg)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}
