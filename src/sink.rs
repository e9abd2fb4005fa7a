use crate::error::TransportError;
use crate::filter::Filter;
use crate::record::{LogRecord, Metadata};
use async_trait::async_trait;

/// A record that was written, together with the exact text written for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered {
    pub record: LogRecord,
    pub rendered: String,
}

/// How a `log` call completed.
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutcome {
    /// The event was rendered and written.
    Delivered(Delivered),
    /// The level is not in the accepted set; nothing was written.
    Filtered,
}

impl LogOutcome {
    pub fn record(&self) -> Option<&LogRecord> {
        match self {
            LogOutcome::Delivered(d) => Some(&d.record),
            LogOutcome::Filtered => None,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, LogOutcome::Filtered)
    }
}

/// Destination for leveled log events.
///
/// Every call completes exactly once: with the written record, with
/// [`LogOutcome::Filtered`] for a level the transport does not accept, or with
/// the underlying error. Implementations do not retry and do not lock the
/// file; concurrent calls are only as atomic as the OS append/write is.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Render and persist one event.
    ///
    /// **Parameters**
    /// - `level`: level name, e.g. `"info"`; any string is accepted.
    /// - `message`: the message text.
    /// - `metadata`: extra data; an empty map is treated as absent.
    ///
    /// **Returns**
    /// - `Ok(LogOutcome::Delivered(..))` once the write finished.
    /// - `Ok(LogOutcome::Filtered)` when the level is not accepted.
    /// - `Err(TransportError::Io(..))` if the file could not be written.
    async fn log(
        &self,
        level: &str,
        message: &str,
        metadata: Option<&Metadata>,
    ) -> Result<LogOutcome, TransportError>;

    /// First record matching `filter`, in file order.
    ///
    /// Default implementation reports the transport as not queryable.
    async fn find_first(&self, _filter: &Filter) -> Result<Option<LogRecord>, TransportError> {
        Err(TransportError::Unsupported("query"))
    }

    /// Every record matching `filter`, in file order.
    ///
    /// Default implementation reports the transport as not queryable.
    async fn find_all(&self, _filter: &Filter) -> Result<Vec<LogRecord>, TransportError> {
        Err(TransportError::Unsupported("query"))
    }

    /// Flush any buffered output.
    ///
    /// Default implementation is a no-op; both file transports finish their
    /// writes before `log` returns.
    async fn flush(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Callback-style helpers on top of [`Transport`].
#[async_trait]
pub trait TransportExt: Transport {
    /// Log and hand the result to `callback` exactly once, filtered levels
    /// included, then return the same result.
    async fn log_with<F>(
        &self,
        level: &str,
        message: &str,
        metadata: Option<&Metadata>,
        callback: F,
    ) -> Result<LogOutcome, TransportError>
    where
        F: FnOnce(&Result<LogOutcome, TransportError>) + Send,
    {
        let result = self.log(level, message, metadata).await;
        callback(&result);
        result
    }

    /// Single-match query: the first record matching `filter`.
    async fn query(&self, filter: &Filter) -> Result<Option<LogRecord>, TransportError> {
        self.find_first(filter).await
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}
