//! Turning an event into a [`LogRecord`] and into the bytes a transport
//! writes for it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Settings;
use crate::record::{format_timestamp, LogRecord, Metadata};

/// Build the record for one event. `now` is only used when timestamping is
/// enabled.
pub fn build_record(
    settings: &Settings,
    level: &str,
    message: &str,
    metadata: Option<&Metadata>,
    now: DateTime<Utc>,
) -> LogRecord {
    LogRecord {
        level: level.to_string(),
        message: message.to_string(),
        timestamp: settings.timestamp.then_some(now),
        metadata: metadata.filter(|m| !m.is_empty()).cloned(),
        color: settings.colors.name(level).map(str::to_string),
    }
}

/// Serialize a record for JSON mode, including the framing terminator.
pub fn encode_json(settings: &Settings, record: &LogRecord) -> Result<String, serde_json::Error> {
    let mut out = if settings.prettyprint {
        let indent = " ".repeat(settings.indentation);
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        record.serialize(&mut ser)?;
        String::from_utf8(buf).expect("serde_json emits UTF-8")
    } else {
        serde_json::to_string(record)?
    };
    out.push_str(settings.framing.terminator());
    Ok(out)
}

/// Render a record as a single text line:
/// `[<timestamp> - <level>]: <message> <metadata-json>`, wrapped in the
/// level's color when one applies.
pub fn render_text(settings: &Settings, record: &LogRecord) -> Result<String, serde_json::Error> {
    let mut line = match &record.timestamp {
        Some(ts) => format!("[{} - {}]: ", format_timestamp(ts), record.level),
        None => format!("[{}]: ", record.level),
    };
    line.push_str(&record.message);
    if let Some(metadata) = &record.metadata {
        line.push(' ');
        line.push_str(&serde_json::to_string(metadata)?);
    }

    Ok(settings.colors.paint(&record.level, &line).unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JsonFraming, TransportConfig};
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
    }

    fn settings(cfg: TransportConfig) -> Settings {
        cfg.validate().unwrap()
    }

    #[test]
    fn record_carries_inputs_and_configured_fields() {
        let s = settings(TransportConfig::default());
        let record = build_record(&s, "info", "message", None, fixed_now());
        assert_eq!(record.level, "info");
        assert_eq!(record.message, "message");
        assert_eq!(record.timestamp, Some(fixed_now()));
        assert_eq!(record.color.as_deref(), Some("green"));
        assert_eq!(record.metadata, None);
    }

    #[test]
    fn empty_metadata_is_dropped() {
        let s = settings(TransportConfig::default());
        let empty = Metadata::new();
        let record = build_record(&s, "info", "m", Some(&empty), fixed_now());
        assert_eq!(record.metadata, None);

        let mut meta = Metadata::new();
        meta.insert("k".to_string(), json!(1));
        let record = build_record(&s, "info", "m", Some(&meta), fixed_now());
        assert_eq!(record.metadata, Some(meta));
    }

    #[test]
    fn level_without_color_gets_none() {
        let s = settings(TransportConfig::default());
        let record = build_record(&s, "debug", "m", None, fixed_now());
        assert_eq!(record.color, None);
    }

    #[test]
    fn compact_comma_terminated() {
        let s = settings(TransportConfig::default());
        let record = build_record(&s, "info", "message", None, fixed_now());
        assert_eq!(
            encode_json(&s, &record).unwrap(),
            "{\"level\":\"info\",\"message\":\"message\",\"timestamp\":\"2024-05-01T10:20:30.000Z\",\"color\":\"green\"},\n"
        );
    }

    #[test]
    fn ndjson_uses_newline_only() {
        let s = settings(TransportConfig {
            framing: JsonFraming::Ndjson,
            timestamp: false,
            colorize: false,
            ..TransportConfig::default()
        });
        let record = build_record(&s, "error", "oops", None, fixed_now());
        assert_eq!(
            encode_json(&s, &record).unwrap(),
            "{\"level\":\"error\",\"message\":\"oops\"}\n"
        );
    }

    #[test]
    fn pretty_print_uses_configured_indentation() {
        let s = settings(TransportConfig {
            prettyprint: true,
            indentation: 2,
            timestamp: false,
            colorize: false,
            ..TransportConfig::default()
        });
        let record = build_record(&s, "info", "m", None, fixed_now());
        assert_eq!(
            encode_json(&s, &record).unwrap(),
            "{\n  \"level\": \"info\",\n  \"message\": \"m\"\n},\n"
        );
    }

    #[test]
    fn text_line_with_timestamp_and_color() {
        let s = settings(TransportConfig::default());
        let record = build_record(&s, "error", "boom", None, fixed_now());
        assert_eq!(
            render_text(&s, &record).unwrap(),
            "\x1b[31m[2024-05-01T10:20:30.000Z - error]: boom\x1b[0m"
        );
    }

    #[test]
    fn plain_text_line_with_metadata() {
        let s = settings(TransportConfig {
            timestamp: false,
            colorize: false,
            ..TransportConfig::default()
        });
        let mut meta = Metadata::new();
        meta.insert("user".to_string(), json!(42));
        let record = build_record(&s, "info", "hello", Some(&meta), fixed_now());
        assert_eq!(render_text(&s, &record).unwrap(), "[info]: hello {\"user\":42}");
    }

    #[test]
    fn identical_configs_render_identically() {
        let a = settings(TransportConfig::default());
        let b = settings(TransportConfig::default());
        let mut meta = Metadata::new();
        meta.insert("a".to_string(), json!([1, 2]));
        let ra = build_record(&a, "warning", "w", Some(&meta), fixed_now());
        let rb = build_record(&b, "warning", "w", Some(&meta), fixed_now());
        assert_eq!(encode_json(&a, &ra).unwrap(), encode_json(&b, &rb).unwrap());
        assert_eq!(render_text(&a, &ra).unwrap(), render_text(&b, &rb).unwrap());
    }
}
