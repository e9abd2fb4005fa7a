use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::color::{default_colors, LevelColors};
use crate::error::ConfigError;

/// Which persistence strategy a transport uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Structured records appended to the file, queryable.
    #[default]
    Json,
    /// A single rendered line, overwritten on every event.
    Text,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(TransportKind::Json),
            "text" => Ok(TransportKind::Text),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// How JSON records are separated on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsonFraming {
    /// Every record followed by `,\n`. Needs a repair step (strip the last
    /// comma, wrap in brackets) before the file parses as a JSON array.
    #[default]
    CommaTerminated,
    /// One compact record per line.
    Ndjson,
}

impl JsonFraming {
    pub fn terminator(self) -> &'static str {
        match self {
            JsonFraming::CommaTerminated => ",\n",
            JsonFraming::Ndjson => "\n",
        }
    }
}

impl FromStr for JsonFraming {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma-terminated" | "comma" => Ok(JsonFraming::CommaTerminated),
            "ndjson" | "jsonl" => Ok(JsonFraming::Ndjson),
            _ => Err(ConfigError::UnknownFraming(s.to_string())),
        }
    }
}

/// Transport configuration.
///
/// Every field has a default, so a configuration object only needs to name
/// what it changes. A field explicitly set to `false` stays `false`.
///
/// **Fields**
/// - `filename`: log file path, `screeba.log` by default.
/// - `levels`: levels to accept; empty accepts every level.
/// - `timestamp`: stamp records with the current UTC time.
/// - `colorize`: attach/apply the level color.
/// - `colors`: level → color name. A supplied map replaces the defaults.
/// - `prettyprint` / `indentation`: JSON mode only.
/// - `format`: `json` or `text`.
/// - `framing`: JSON mode only, `comma-terminated` or `ndjson`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    pub filename: PathBuf,
    pub levels: Vec<String>,
    pub timestamp: bool,
    pub colorize: bool,
    pub colors: BTreeMap<String, String>,
    pub prettyprint: bool,
    pub indentation: usize,
    pub format: TransportKind,
    pub framing: JsonFraming,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from("screeba.log"),
            levels: Vec::new(),
            timestamp: true,
            colorize: true,
            colors: default_colors(),
            prettyprint: false,
            indentation: 4,
            format: TransportKind::Json,
            framing: JsonFraming::CommaTerminated,
        }
    }
}

impl TransportConfig {
    /// Default configuration writing to `filename`.
    pub fn with_filename(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON configuration object, e.g.
    /// `{"filename": "app.log", "levels": ["error"], "timestamp": false}`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Check the configuration and resolve it into the settings a transport
    /// runs with.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        if self.prettyprint && self.framing == JsonFraming::Ndjson {
            return Err(ConfigError::PrettyNdjson);
        }
        let colors = if self.colorize {
            LevelColors::from_names(&self.colors)?
        } else {
            LevelColors::default()
        };

        Ok(Settings {
            filename: self.filename.clone(),
            levels: LevelFilter::new(self.levels.iter().cloned()),
            timestamp: self.timestamp,
            colors,
            prettyprint: self.prettyprint,
            indentation: self.indentation,
            framing: self.framing,
        })
    }
}

/// Accepted-levels set. Empty accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelFilter {
    accepted: Vec<String>,
}

impl LevelFilter {
    pub fn new(levels: impl IntoIterator<Item = String>) -> Self {
        let mut accepted: Vec<String> = levels.into_iter().collect();
        accepted.sort();
        accepted.dedup();
        LevelFilter { accepted }
    }

    pub fn accepts(&self, level: &str) -> bool {
        self.accepted.is_empty() || self.accepted.iter().any(|l| l == level)
    }
}

/// Validated, immutable settings captured by a transport at construction.
#[derive(Debug, Clone)]
pub struct Settings {
    pub filename: PathBuf,
    pub levels: LevelFilter,
    pub timestamp: bool,
    /// Empty when colorization is disabled.
    pub colors: LevelColors,
    pub prettyprint: bool,
    pub indentation: usize,
    pub framing: JsonFraming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = TransportConfig::default();
        assert_eq!(cfg.filename, PathBuf::from("screeba.log"));
        assert!(cfg.levels.is_empty());
        assert!(cfg.timestamp);
        assert!(cfg.colorize);
        assert!(!cfg.prettyprint);
        assert_eq!(cfg.indentation, 4);
        assert_eq!(cfg.colors.get("info").map(String::as_str), Some("green"));
    }

    #[test]
    fn explicit_false_is_respected() {
        let cfg = TransportConfig::from_json_str(r#"{"timestamp": false, "colorize": false}"#).unwrap();
        assert!(!cfg.timestamp);
        assert!(!cfg.colorize);
        assert_eq!(cfg.filename, PathBuf::from("screeba.log"));
    }

    #[test]
    fn supplied_colors_replace_defaults() {
        let cfg = TransportConfig::from_json_str(r#"{"colors": {"debug": "blue"}}"#).unwrap();
        let settings = cfg.validate().unwrap();
        assert_eq!(settings.colors.name("debug"), Some("blue"));
        assert_eq!(settings.colors.name("info"), None);
    }

    #[test]
    fn colorize_off_drops_palette() {
        let cfg = TransportConfig {
            colorize: false,
            ..TransportConfig::default()
        };
        let settings = cfg.validate().unwrap();
        assert_eq!(settings.colors.name("info"), None);
    }

    #[test]
    fn parses_format_and_framing() {
        let cfg = TransportConfig::from_json_str(r#"{"format": "text", "framing": "ndjson"}"#).unwrap();
        assert_eq!(cfg.format, TransportKind::Text);
        assert_eq!(cfg.framing, JsonFraming::Ndjson);
        assert_eq!("JSON".parse::<TransportKind>().unwrap(), TransportKind::Json);
        assert!("csv".parse::<TransportKind>().is_err());
    }

    #[test]
    fn pretty_ndjson_is_rejected() {
        let cfg = TransportConfig {
            prettyprint: true,
            framing: JsonFraming::Ndjson,
            ..TransportConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::PrettyNdjson)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(TransportConfig::from_json_str(r#"{"filname": "typo.log"}"#).is_err());
    }

    #[test]
    fn level_filter_semantics() {
        assert!(LevelFilter::default().accepts("anything"));
        let only_errors = LevelFilter::new(vec!["error".to_string()]);
        assert!(only_errors.accepts("error"));
        assert!(!only_errors.accepts("info"));
    }
}
