use crate::config::{Settings, TransportConfig};
use crate::error::{ConfigError, TransportError};
use crate::filter::Filter;
use crate::record::{LogRecord, Metadata};
use crate::render::{build_record, encode_json};
use crate::sink::{Delivered, LogOutcome, Transport};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

/// JSON-mode file transport: appends one serialized [`LogRecord`] per event
/// and answers queries by re-reading the whole file.
///
/// On disk the records are either comma-terminated (`{...},\n`, the default)
/// or newline-delimited (`{...}\n`). Reading accepts both.
#[derive(Debug, Clone)]
pub struct JsonFileTransport {
    settings: Settings,
}

impl JsonFileTransport {
    /// Construct a transport from configuration.
    ///
    /// **Returns**
    /// - `Err(ConfigError)` for unknown color names or pretty-printed ndjson.
    pub fn new(config: TransportConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_settings(config.validate()?))
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn path(&self) -> &Path {
        &self.settings.filename
    }

    /// Same as [`Transport::log`] with an explicit clock value.
    pub async fn log_at(
        &self,
        level: &str,
        message: &str,
        metadata: Option<&Metadata>,
        now: DateTime<Utc>,
    ) -> Result<LogOutcome, TransportError> {
        if !self.settings.levels.accepts(level) {
            trace!(level, "level not accepted, record dropped");
            return Ok(LogOutcome::Filtered);
        }

        let record = build_record(&self.settings, level, message, metadata, now);
        let rendered = encode_json(&self.settings, &record)?;
        append(self.path(), rendered.as_bytes()).await?;
        debug!(path = %self.path().display(), level, bytes = rendered.len(), "record appended");

        Ok(LogOutcome::Delivered(Delivered { record, rendered }))
    }

    /// Every record in the file, in write order.
    pub async fn read_records(&self) -> Result<Vec<LogRecord>, TransportError> {
        self.find_all(&Filter::any()).await
    }

    async fn read_values(&self) -> Result<Vec<Value>, TransportError> {
        let content = tokio::fs::read_to_string(self.path()).await?;
        let values = parse_log(&content)?;
        trace!(path = %self.path().display(), records = values.len(), "log file parsed");
        Ok(values)
    }
}

#[async_trait]
impl Transport for JsonFileTransport {
    async fn log(
        &self,
        level: &str,
        message: &str,
        metadata: Option<&Metadata>,
    ) -> Result<LogOutcome, TransportError> {
        self.log_at(level, message, metadata, Utc::now()).await
    }

    async fn find_first(&self, filter: &Filter) -> Result<Option<LogRecord>, TransportError> {
        let values = self.read_values().await?;
        match values.into_iter().find(|v| filter.matches(v)) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<LogRecord>, TransportError> {
        let values = self.read_values().await?;
        let records = values
            .into_iter()
            .filter(|v| filter.matches(v))
            .map(serde_json::from_value::<LogRecord>)
            .collect::<Result<Vec<LogRecord>, _>>()?;
        Ok(records)
    }
}

async fn append(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    // tokio's File finishes writes in the background; flush waits for them.
    file.flush().await
}

/// Parse the content of a JSON-mode log file into raw JSON values.
///
/// Values are read one after another; a single `,` between (or after) two
/// values is skipped. That covers comma-terminated files (pretty-printed
/// included), ndjson files, and files that switched framing midway. Blank
/// content is an empty log.
pub fn parse_log(content: &str) -> Result<Vec<Value>, serde_json::Error> {
    let mut values = Vec::new();
    let mut rest = content.trim_start();

    while !rest.is_empty() {
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(value) => values.push(value?),
            None => break,
        }
        rest = rest[stream.byte_offset()..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
        }
    }

    Ok(values)
}
