use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arbitrary key/value data attached to a single event.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One logged event as it is persisted by a transport.
///
/// `level` and `message` are always present. The other fields depend on the
/// transport configuration (`timestamp`, `color`) and on the call itself
/// (`metadata` is only kept when non-empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: String,
    pub message: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "millis_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LogRecord {
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        LogRecord {
            level: level.into(),
            message: message.into(),
            timestamp: None,
            metadata: None,
            color: None,
        }
    }
}

/// Format a timestamp the way records carry it: RFC 3339, millisecond
/// precision, `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod millis_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn optional_fields_are_omitted() {
        let record = LogRecord::new("info", "message");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"level":"info","message":"message"}"#);
    }

    #[test]
    fn fields_keep_declaration_order() {
        let mut record = LogRecord::new("info", "message");
        record.timestamp = Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap());
        record.color = Some("green".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"level":"info","message":"message","timestamp":"2024-05-01T10:20:30.000Z","color":"green"}"#
        );
    }

    #[test]
    fn parses_records_without_optional_fields() {
        let record: LogRecord =
            serde_json::from_str(r#"{"level":"error","message":"oops","timestamp":"2024-05-01T10:20:30.123Z"}"#)
                .unwrap();
        assert_eq!(record.level, "error");
        assert_eq!(record.metadata, None);
        assert_eq!(
            record.timestamp.map(|ts| format_timestamp(&ts)),
            Some("2024-05-01T10:20:30.123Z".to_string())
        );
    }
}
