use crate::config::{Settings, TransportConfig};
use crate::error::{ConfigError, TransportError};
use crate::record::Metadata;
use crate::render::{build_record, render_text};
use crate::sink::{Delivered, LogOutcome, Transport};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, trace};

/// Text-mode file transport.
///
/// Each event is rendered as one optionally colorized line and the file is
/// **overwritten** with it, so the file only ever holds the most recent
/// event. Not queryable.
#[derive(Debug, Clone)]
pub struct TextFileTransport {
    settings: Settings,
}

impl TextFileTransport {
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
            trace!(level, "level not accepted, line dropped");
            return Ok(LogOutcome::Filtered);
        }

        let record = build_record(&self.settings, level, message, metadata, now);
        let rendered = render_text(&self.settings, &record)?;
        tokio::fs::write(self.path(), rendered.as_bytes()).await?;
        debug!(path = %self.path().display(), level, "log line overwritten");

        Ok(LogOutcome::Delivered(Delivered { record, rendered }))
    }
}

#[async_trait]
impl Transport for TextFileTransport {
    async fn log(
        &self,
        level: &str,
        message: &str,
        metadata: Option<&Metadata>,
    ) -> Result<LogOutcome, TransportError> {
        self.log_at(level, message, metadata, Utc::now()).await
    }
}
